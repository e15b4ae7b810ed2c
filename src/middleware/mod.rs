//! Middleware del sistema
//! 
//! Este módulo contiene el middleware de identidad (lee lo que el gateway de
//! autenticación ya resolvió) y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
