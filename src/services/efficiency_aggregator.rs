//! Agregador de eficiencia por ruta
//!
//! Para cada ruta calcula capacidad total, capacidad media y número de
//! asignaciones. Sólo lectura; nunca falla por datos vacíos.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::models::{AssignmentCapacity, Route, RouteEfficiency};
use crate::repositories::{FleetStorage, StorageResult};

/// Estadísticas por ruta, en el mismo orden que `routes`.
///
/// Una ruta sin asignaciones (o ausente del mapa) produce
/// `total_capacity = None`, `average_capacity = None`, `assignment_count = 0`.
pub fn compute_route_efficiency(
    routes: &[Route],
    assignments_by_route: &HashMap<String, Vec<AssignmentCapacity>>,
) -> Vec<RouteEfficiency> {
    routes
        .iter()
        .map(|route| {
            let assignments = assignments_by_route
                .get(&route.route_number)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            summarize(route, assignments)
        })
        .collect()
}

fn summarize(route: &Route, assignments: &[AssignmentCapacity]) -> RouteEfficiency {
    let assignment_count = assignments.len();

    let total_capacity = (assignment_count > 0).then(|| {
        assignments
            .iter()
            .map(|a| i64::from(a.capacity))
            .sum::<i64>()
    });
    let average_capacity = total_capacity.map(|total| total as f64 / assignment_count as f64);

    RouteEfficiency {
        route: route.clone(),
        total_capacity,
        average_capacity,
        assignment_count,
    }
}

pub struct EfficiencyAggregator {
    storage: Arc<dyn FleetStorage>,
}

impl EfficiencyAggregator {
    pub fn new(storage: Arc<dyn FleetStorage>) -> Self {
        Self { storage }
    }

    /// Reporte completo: todas las rutas ordenadas por número
    pub async fn route_efficiency_report(&self) -> StorageResult<Vec<RouteEfficiency>> {
        let routes = self.storage.list_routes().await?;

        let mut assignments_by_route = HashMap::with_capacity(routes.len());
        for route in &routes {
            let assignments = self
                .storage
                .list_assignments_for_route(&route.route_number)
                .await?;
            assignments_by_route.insert(route.route_number.clone(), assignments);
        }

        let report = compute_route_efficiency(&routes, &assignments_by_route);
        debug!("📊 Route efficiency computed for {} routes", report.len());
        Ok(report)
    }
}
