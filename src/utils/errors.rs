//! Sistema de manejo de errores
//!
//! Este módulo define los errores del dominio (reglas de validación,
//! almacenamiento, registro de mantenimiento) y su conversión a respuestas
//! HTTP en la frontera de la API.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveTime;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::vehicle::VehicleType;

/// Violaciones de las reglas de dominio de vehículos y asignaciones
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} cannot have a capacity greater than {limit}.", .vehicle_type.plural_name())]
    CapacityExceeded {
        vehicle_type: VehicleType,
        capacity: u32,
        limit: u32,
    },

    #[error("End time must be after start time.")]
    InvalidTimeWindow {
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
}

/// Errores de la capa de persistencia
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errores del MaintenanceRecorder
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("Vehicle '{0}' not found")]
    VehicleNotFound(String),

    #[error("{0}")]
    InvalidMaintenanceLog(String),

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] StorageError),
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Rule(#[from] ValidationError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request_error(&rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        bad_request_error(&rejection.body_text())
    }
}

impl From<RecorderError> for AppError {
    fn from(err: RecorderError) -> Self {
        match err {
            RecorderError::VehicleNotFound(id) => not_found_error("Vehicle", &id),
            RecorderError::InvalidMaintenanceLog(detail) => AppError::BadRequest(detail),
            RecorderError::StorageFailure(e) => AppError::Storage(e),
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Storage(StorageError::Conflict(msg)) => {
                warn!("Storage conflict: {}", msg);
                (StatusCode::CONFLICT, msg)
            }
            AppError::Storage(StorageError::MissingReference(msg)) => {
                warn!("Missing reference: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::Storage(e) => {
                error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while accessing the database".to_string(),
                )
            }
            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Rule(e) => {
                warn!("Rule violation: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                (StatusCode::UNAUTHORIZED, msg)
            }
            AppError::Forbidden(msg) => {
                warn!("Forbidden access: {}", msg);
                (StatusCode::FORBIDDEN, msg)
            }
            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, msg)
            }
            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(message: &str) -> AppError {
    AppError::Forbidden(message.to_string())
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
