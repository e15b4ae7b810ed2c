use std::sync::Arc;

use crate::dto::MaintenancePayload;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{MaintenanceHistoryResponse, MaintenanceLog};
use crate::repositories::FleetStorage;
use crate::services::MaintenanceRecorder;
use crate::utils::errors::{not_found_error, AppResult};

pub struct MaintenanceController {
    storage: Arc<dyn FleetStorage>,
    recorder: MaintenanceRecorder,
}

impl MaintenanceController {
    pub fn new(storage: Arc<dyn FleetStorage>) -> Self {
        Self {
            recorder: MaintenanceRecorder::new(storage.clone()),
            storage,
        }
    }

    pub async fn history(&self, vehicle_id: &str) -> AppResult<MaintenanceHistoryResponse> {
        Ok(self.recorder.maintenance_history(vehicle_id).await?)
    }

    /// Orden de las comprobaciones: staff (403), vehículo (404), payload (400)
    pub async fn record(
        &self,
        user: &AuthenticatedUser,
        vehicle_id: &str,
        body: &[u8],
    ) -> AppResult<MaintenanceLog> {
        user.require_staff()?;

        if self.storage.get_vehicle(vehicle_id).await?.is_none() {
            return Err(not_found_error("Vehicle", vehicle_id));
        }

        let payload = MaintenancePayload::from_json(body)?;

        let log = self
            .recorder
            .record_maintenance(
                vehicle_id,
                payload.maintenance_date,
                payload.description,
                payload.cost,
            )
            .await?;

        Ok(log)
    }
}
