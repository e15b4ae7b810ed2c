//! Configuración del proyecto
//! 
//! Este módulo contiene la configuración de base de datos y variables de
//! entorno del servicio.

pub mod database;
pub mod environment;

use thiserror::Error;

pub use database::DatabaseConfig;
pub use environment::*;

/// Errores al leer la configuración del entorno
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Leer una variable opcional y parsearla, usando `default` si no existe
pub(crate) fn env_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
