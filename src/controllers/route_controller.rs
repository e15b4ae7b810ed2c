use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::models::route::{CreateRouteRequest, RouteDetailResponse};
use crate::models::{Route, RouteEfficiency};
use crate::repositories::FleetStorage;
use crate::services::EfficiencyAggregator;
use crate::utils::errors::{conflict_error, not_found_error, AppResult, StorageError};

pub struct RouteController {
    storage: Arc<dyn FleetStorage>,
}

impl RouteController {
    pub fn new(storage: Arc<dyn FleetStorage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, request: CreateRouteRequest) -> AppResult<Route> {
        request.validate()?;

        let route = Route::from(request);
        match self.storage.insert_route(&route).await {
            Ok(()) => {}
            Err(StorageError::Conflict(_)) => {
                return Err(conflict_error("Route", "route_number", &route.route_number))
            }
            Err(e) => return Err(e.into()),
        }

        info!("🛣️ Route created: {}", route);
        Ok(route)
    }

    pub async fn list(&self) -> AppResult<Vec<Route>> {
        Ok(self.storage.list_routes().await?)
    }

    /// Ruta con sus asignaciones ordenadas por hora de inicio
    pub async fn detail(&self, route_number: &str) -> AppResult<RouteDetailResponse> {
        let route = self
            .storage
            .get_route(route_number)
            .await?
            .ok_or_else(|| not_found_error("Route", route_number))?;

        let assignments = self.storage.list_assignments_for_route(route_number).await?;

        Ok(RouteDetailResponse { route, assignments })
    }

    pub async fn delete(&self, route_number: &str) -> AppResult<()> {
        if !self.storage.delete_route(route_number).await? {
            return Err(not_found_error("Route", route_number));
        }
        info!("🗑️ Route {} deleted", route_number);
        Ok(())
    }

    pub async fn efficiency_report(&self) -> AppResult<Vec<RouteEfficiency>> {
        let aggregator = EfficiencyAggregator::new(self.storage.clone());
        Ok(aggregator.route_efficiency_report().await?)
    }
}
