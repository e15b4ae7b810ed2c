//! Services module
//! 
//! Este módulo contiene la lógica de negocio de la flota: validación de
//! dominio, registro de mantenimiento y agregación de eficiencia por ruta.

pub mod validation_engine;
pub mod maintenance_recorder;
pub mod efficiency_aggregator;

pub use efficiency_aggregator::{compute_route_efficiency, EfficiencyAggregator};
pub use maintenance_recorder::MaintenanceRecorder;
pub use validation_engine::{validate_assignment, validate_vehicle};
