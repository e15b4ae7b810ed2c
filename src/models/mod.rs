//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos de la flota: vehículos, rutas,
//! asignaciones, logs de mantenimiento y el reporte de eficiencia.

pub mod vehicle;
pub mod route;
pub mod route_assignment;
pub mod maintenance_log;
pub mod efficiency;

pub use efficiency::RouteEfficiency;
pub use maintenance_log::{MaintenanceHistoryResponse, MaintenanceLog};
pub use route::Route;
pub use route_assignment::{AssignmentCapacity, RouteAssignment};
pub use vehicle::{Vehicle, VehicleType};
