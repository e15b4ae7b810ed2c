//! Middleware de identidad
//! 
//! La autenticación la resuelve un gateway externo, que reenvía la identidad
//! en los headers `x-user-id` y `x-user-staff`. Este módulo sólo los lee e
//! inyecta un `AuthenticatedUser` en las extensions de la request.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::utils::errors::{forbidden_error, AppError};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_STAFF_HEADER: &str = "x-user-staff";

pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to perform this action.";

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub is_staff: bool,
}

impl AuthenticatedUser {
    /// Falla con 403 si el usuario no es staff
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff {
            Ok(())
        } else {
            Err(forbidden_error(PERMISSION_DENIED_MESSAGE))
        }
    }
}

fn user_from_headers(headers: &HeaderMap) -> Option<AuthenticatedUser> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())?;

    let is_staff = headers
        .get(USER_STAFF_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false);

    Some(AuthenticatedUser {
        user_id: user_id.to_string(),
        is_staff,
    })
}

/// Middleware de identidad: exige `x-user-id`
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, AppError> {
    let user = user_from_headers(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Authentication credentials were not provided.".to_string()))?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
