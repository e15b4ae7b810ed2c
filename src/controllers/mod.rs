//! Controladores de la API
//!
//! Orquestan validación, servicios y almacenamiento para cada recurso.

pub mod vehicle_controller;
pub mod route_controller;
pub mod assignment_controller;
pub mod maintenance_controller;
