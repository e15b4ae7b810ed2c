//! Estadísticas de eficiencia por ruta

use serde::Serialize;

use super::route::Route;

/// Fila del reporte de eficiencia.
///
/// `total_capacity` y `average_capacity` son `None` cuando la ruta no tiene
/// asignaciones: la suma de un conjunto vacío no es cero en este reporte.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEfficiency {
    pub route: Route,
    pub total_capacity: Option<i64>,
    pub average_capacity: Option<f64>,
    pub assignment_count: usize,
}
