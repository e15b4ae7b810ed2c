//! Registro de mantenimiento
//!
//! Inserta un `MaintenanceLog` y actualiza `last_maintenance` del vehículo
//! como una sola unidad de trabajo. Si cualquiera de las dos escrituras falla,
//! la transacción se deshace y el llamador recibe el error.
//!
//! La autorización (sólo staff) la aplica el llamador antes de invocar.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::models::{MaintenanceHistoryResponse, MaintenanceLog};
use crate::repositories::{FleetStorage, FleetTransaction};
use crate::services::validation_engine::validate_maintenance_cost;
use crate::utils::errors::RecorderError;

pub struct MaintenanceRecorder {
    storage: Arc<dyn FleetStorage>,
}

impl MaintenanceRecorder {
    pub fn new(storage: Arc<dyn FleetStorage>) -> Self {
        Self { storage }
    }

    pub async fn record_maintenance(
        &self,
        vehicle_id: &str,
        maintenance_date: NaiveDate,
        description: String,
        cost: Decimal,
    ) -> Result<MaintenanceLog, RecorderError> {
        let mut tx = self.storage.begin().await?;

        match record_within(&mut tx, vehicle_id, maintenance_date, description, cost).await {
            Ok(log) => {
                tx.commit().await?;
                info!(
                    "🔧 Maintenance recorded for vehicle {} on {} (cost {})",
                    vehicle_id, log.maintenance_date, log.cost
                );
                Ok(log)
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!(
                        "⚠️ Rollback failed for vehicle {}: {}",
                        vehicle_id, rollback_error
                    );
                }
                Err(e)
            }
        }
    }

    /// Vehículo con sus logs (fecha descendente) y el costo total
    pub async fn maintenance_history(
        &self,
        vehicle_id: &str,
    ) -> Result<MaintenanceHistoryResponse, RecorderError> {
        let vehicle = self
            .storage
            .get_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| RecorderError::VehicleNotFound(vehicle_id.to_string()))?;

        let logs = self
            .storage
            .list_maintenance_logs_for_vehicle(vehicle_id)
            .await?;

        Ok(MaintenanceHistoryResponse::new(vehicle, logs))
    }
}

async fn record_within(
    tx: &mut Box<dyn FleetTransaction>,
    vehicle_id: &str,
    maintenance_date: NaiveDate,
    description: String,
    cost: Decimal,
) -> Result<MaintenanceLog, RecorderError> {
    let mut vehicle = tx
        .lock_vehicle(vehicle_id)
        .await?
        .ok_or_else(|| RecorderError::VehicleNotFound(vehicle_id.to_string()))?;

    let cost = validate_maintenance_cost(cost).map_err(RecorderError::InvalidMaintenanceLog)?;
    let log = MaintenanceLog::new(vehicle_id, maintenance_date, description, cost);

    tx.save_maintenance_log(&log).await?;

    vehicle.last_maintenance = maintenance_date;
    tx.save_vehicle(&vehicle).await?;

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Vehicle, VehicleType};
    use crate::repositories::MemoryFleetRepository;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (MemoryFleetRepository, MaintenanceRecorder) {
        let repo = MemoryFleetRepository::new();
        repo.insert_vehicle(&Vehicle::new("V1", VehicleType::Bus, 60, date(2024, 1, 1)))
            .await
            .unwrap();
        let recorder = MaintenanceRecorder::new(Arc::new(repo.clone()));
        (repo, recorder)
    }

    #[tokio::test]
    async fn test_record_updates_last_maintenance() {
        let (repo, recorder) = setup().await;
        let cost = Decimal::from_str("100.00").unwrap();

        let log = recorder
            .record_maintenance("V1", date(2024, 6, 1), "x".to_string(), cost)
            .await
            .unwrap();

        assert_eq!(log.vehicle_id, "V1");
        assert_eq!(log.maintenance_date, date(2024, 6, 1));
        assert_eq!(log.description, "x");
        assert_eq!(log.cost, cost);

        let vehicle = repo.get_vehicle("V1").await.unwrap().unwrap();
        assert_eq!(vehicle.last_maintenance, date(2024, 6, 1));
        assert_eq!(repo.maintenance_log_count().await, 1);
    }

    #[tokio::test]
    async fn test_older_date_still_becomes_last_maintenance() {
        let (repo, recorder) = setup().await;

        recorder
            .record_maintenance("V1", date(2023, 12, 1), String::new(), Decimal::ZERO)
            .await
            .unwrap();

        let vehicle = repo.get_vehicle("V1").await.unwrap().unwrap();
        assert_eq!(vehicle.last_maintenance, date(2023, 12, 1));
    }

    #[tokio::test]
    async fn test_unknown_vehicle_persists_nothing() {
        let (repo, recorder) = setup().await;

        let err = recorder
            .record_maintenance("NOPE", date(2024, 6, 1), "x".to_string(), Decimal::ONE)
            .await
            .unwrap_err();

        assert!(matches!(err, RecorderError::VehicleNotFound(id) if id == "NOPE"));
        assert_eq!(repo.maintenance_log_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_cost_persists_nothing() {
        let (repo, recorder) = setup().await;

        let err = recorder
            .record_maintenance(
                "V1",
                date(2024, 6, 1),
                "x".to_string(),
                Decimal::from_str("10.999").unwrap(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, RecorderError::InvalidMaintenanceLog(_)));
        assert_eq!(repo.maintenance_log_count().await, 0);
        let vehicle = repo.get_vehicle("V1").await.unwrap().unwrap();
        assert_eq!(vehicle.last_maintenance, date(2024, 1, 1));
    }

    #[tokio::test]
    async fn test_vehicle_update_failure_rolls_back_log() {
        let (repo, recorder) = setup().await;
        repo.fail_transactional_vehicle_saves(true);

        let err = recorder
            .record_maintenance("V1", date(2024, 6, 1), "x".to_string(), Decimal::ONE)
            .await
            .unwrap_err();

        assert!(matches!(err, RecorderError::StorageFailure(_)));
        assert_eq!(repo.maintenance_log_count().await, 0);
        let vehicle = repo.get_vehicle("V1").await.unwrap().unwrap();
        assert_eq!(vehicle.last_maintenance, date(2024, 1, 1));
    }

    #[tokio::test]
    async fn test_concurrent_recordings_serialize() {
        let (repo, recorder) = setup().await;
        let recorder = Arc::new(recorder);

        let handles: Vec<_> = (1..=5)
            .map(|day| {
                let recorder = recorder.clone();
                tokio::spawn(async move {
                    recorder
                        .record_maintenance("V1", date(2024, 7, day), format!("visit {}", day), Decimal::ONE)
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.maintenance_log_count().await, 5);
    }

    #[tokio::test]
    async fn test_history_totals_costs() {
        let (_repo, recorder) = setup().await;
        recorder
            .record_maintenance("V1", date(2024, 2, 1), "a".into(), Decimal::from_str("10.50").unwrap())
            .await
            .unwrap();
        recorder
            .record_maintenance("V1", date(2024, 3, 1), "b".into(), Decimal::from_str("4.50").unwrap())
            .await
            .unwrap();

        let history = recorder.maintenance_history("V1").await.unwrap();
        assert_eq!(history.logs.len(), 2);
        assert_eq!(history.logs[0].maintenance_date, date(2024, 3, 1));
        assert_eq!(history.total_cost, Some(Decimal::from_str("15.00").unwrap()));
        assert_eq!(history.vehicle.last_maintenance, date(2024, 3, 1));
    }
}
