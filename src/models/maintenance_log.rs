//! Modelo de MaintenanceLog
//!
//! Registro de un evento de mantenimiento: fecha, descripción libre y costo
//! decimal con dos decimales. Sólo se crea a través del MaintenanceRecorder.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::vehicle::Vehicle;

/// Escala con la que se almacena el costo
pub const COST_DECIMAL_PLACES: u32 = 2;

/// Dígitos totales permitidos para el costo (NUMERIC(10, 2))
pub const COST_MAX_DIGITS: u32 = 10;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub vehicle_id: String,
    pub maintenance_date: NaiveDate,
    pub description: String,
    pub cost: Decimal,
}

impl MaintenanceLog {
    pub fn new(
        vehicle_id: impl Into<String>,
        maintenance_date: NaiveDate,
        description: impl Into<String>,
        cost: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: vehicle_id.into(),
            maintenance_date,
            description: description.into(),
            cost,
        }
    }
}

impl fmt::Display for MaintenanceLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Maintenance for {} on {}",
            self.vehicle_id, self.maintenance_date
        )
    }
}

/// Historial de mantenimiento de un vehículo (logs por fecha descendente)
#[derive(Debug, Serialize)]
pub struct MaintenanceHistoryResponse {
    pub vehicle: Vehicle,
    pub logs: Vec<MaintenanceLog>,
    /// Suma de costos; `None` cuando no hay logs
    pub total_cost: Option<Decimal>,
}

impl MaintenanceHistoryResponse {
    pub fn new(vehicle: Vehicle, logs: Vec<MaintenanceLog>) -> Self {
        let total_cost = logs
            .iter()
            .map(|log| log.cost)
            .reduce(|acc, cost| acc + cost);

        Self {
            vehicle,
            logs,
            total_cost,
        }
    }
}
