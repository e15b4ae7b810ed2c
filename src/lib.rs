//! Transit Fleet
//!
//! Servicio de gestión de flota de transporte público: vehículos, rutas,
//! asignaciones de conductores, registro de mantenimiento y reporte de
//! eficiencia por ruta.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
