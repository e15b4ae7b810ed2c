//! Modelo de Route
//!
//! Una ruta es un trayecto con número único, punto de inicio y punto final.
//! Sus asignaciones se eliminan en cascada con ella.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::route_assignment::AssignmentCapacity;

/// Route principal - mapea a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    pub route_number: String,
    pub start_point: String,
    pub end_point: String,
}

impl Route {
    pub fn new(
        route_number: impl Into<String>,
        start_point: impl Into<String>,
        end_point: impl Into<String>,
    ) -> Self {
        Self {
            route_number: route_number.into(),
            start_point: start_point.into(),
            end_point: end_point.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route {}: {} to {}",
            self.route_number, self.start_point, self.end_point
        )
    }
}

/// Request para crear una nueva ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 10))]
    pub route_number: String,

    #[validate(length(max = 100))]
    pub start_point: String,

    #[validate(length(max = 100))]
    pub end_point: String,
}

impl From<CreateRouteRequest> for Route {
    fn from(request: CreateRouteRequest) -> Self {
        Route::new(request.route_number, request.start_point, request.end_point)
    }
}

/// Detalle de una ruta con sus asignaciones ordenadas por hora de inicio
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    pub route: Route,
    pub assignments: Vec<AssignmentCapacity>,
}
