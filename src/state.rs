//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::FleetStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn FleetStorage>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(storage: Arc<dyn FleetStorage>, config: EnvironmentConfig) -> Self {
        Self { storage, config }
    }
}
