//! DTOs de la API
//!
//! Payloads de entrada que no se deserializan directamente con serde y
//! respuestas genéricas.

pub mod maintenance_dto;

use serde::Serialize;

pub use maintenance_dto::MaintenancePayload;

// Response genérica con mensaje
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
