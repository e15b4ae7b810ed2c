use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::Vehicle;
use crate::repositories::FleetStorage;
use crate::services::validate_vehicle;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult, StorageError};

pub struct VehicleController {
    storage: Arc<dyn FleetStorage>,
}

impl VehicleController {
    pub fn new(storage: Arc<dyn FleetStorage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let vehicle = Vehicle::from(request);
        validate_vehicle(&vehicle)?;

        match self.storage.insert_vehicle(&vehicle).await {
            Ok(()) => {}
            Err(StorageError::Conflict(_)) => {
                return Err(conflict_error("Vehicle", "vehicle_id", &vehicle.vehicle_id))
            }
            Err(e) => return Err(e.into()),
        }

        info!("🚌 Vehicle created: {}", vehicle);
        Ok(vehicle)
    }

    pub async fn get_by_id(&self, vehicle_id: &str) -> AppResult<Vehicle> {
        self.storage
            .get_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.storage.list_vehicles().await?)
    }

    pub async fn update(&self, vehicle_id: &str, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        let current = self.get_by_id(vehicle_id).await?;
        let vehicle = request.apply_to(current);
        validate_vehicle(&vehicle)?;

        self.storage.save_vehicle(&vehicle).await.map_err(|e| match e {
            StorageError::MissingReference(_) => not_found_error("Vehicle", vehicle_id),
            other => AppError::from(other),
        })?;

        Ok(vehicle)
    }

    pub async fn delete(&self, vehicle_id: &str) -> AppResult<()> {
        if !self.storage.delete_vehicle(vehicle_id).await? {
            return Err(not_found_error("Vehicle", vehicle_id));
        }
        info!("🗑️ Vehicle {} deleted", vehicle_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleType;
    use crate::repositories::MemoryFleetRepository;
    use chrono::NaiveDate;

    async fn controller_with_bus() -> VehicleController {
        let controller = VehicleController::new(Arc::new(MemoryFleetRepository::new()));
        controller
            .create(CreateVehicleRequest {
                vehicle_id: "B1".to_string(),
                vehicle_type: VehicleType::Bus,
                capacity: 40,
                last_maintenance: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            })
            .await
            .unwrap();
        controller
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let controller = controller_with_bus().await;

        let updated = controller
            .update(
                "B1",
                UpdateVehicleRequest {
                    capacity: Some(90),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.capacity, 90);
        assert_eq!(updated.vehicle_type, VehicleType::Bus);
        assert_eq!(controller.get_by_id("B1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_rechecks_capacity_rule() {
        let controller = controller_with_bus().await;

        let err = controller
            .update(
                "B1",
                UpdateVehicleRequest {
                    capacity: Some(101),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Rule(_)));
        assert_eq!(controller.get_by_id("B1").await.unwrap().capacity, 40);
    }

    #[tokio::test]
    async fn test_update_unknown_vehicle_is_not_found() {
        let controller = controller_with_bus().await;
        let err = controller
            .update("NOPE", UpdateVehicleRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
