//! Modelo de RouteAssignment
//!
//! Asignación de un vehículo a una ruta dentro de una ventana horaria
//! `[start_time, end_time)` con un conductor. La unicidad es sólo sobre
//! `(vehicle_id, start_time, end_time)`: ventanas solapadas pero distintas
//! se aceptan.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::vehicle::VehicleType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteAssignment {
    pub id: Uuid,
    pub vehicle_id: String,
    pub route_number: String,
    pub driver_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl RouteAssignment {
    /// Crear una asignación candidata (todavía no persistida)
    pub fn new(
        vehicle_id: impl Into<String>,
        route_number: impl Into<String>,
        driver_name: impl Into<String>,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: vehicle_id.into(),
            route_number: route_number.into(),
            driver_name: driver_name.into(),
            start_time,
            end_time,
        }
    }

    /// Dos asignaciones chocan con la restricción de unicidad sólo si comparten
    /// vehículo y exactamente la misma ventana
    pub fn same_slot(&self, other: &RouteAssignment) -> bool {
        self.vehicle_id == other.vehicle_id
            && self.start_time == other.start_time
            && self.end_time == other.end_time
    }
}

impl fmt::Display for RouteAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on route {} ({}-{})",
            self.vehicle_id, self.route_number, self.start_time, self.end_time
        )
    }
}

/// Asignación con la capacidad del vehículo (join con vehicles)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssignmentCapacity {
    #[serde(flatten)]
    pub assignment: RouteAssignment,
    pub vehicle_type: VehicleType,
    pub capacity: u32,
}

/// Request para crear una asignación
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1, max = 10))]
    pub vehicle_id: String,

    #[validate(length(min = 1, max = 10))]
    pub route_number: String,

    #[validate(length(min = 1, max = 100))]
    pub driver_name: String,

    pub start_time: NaiveTime,

    pub end_time: NaiveTime,
}

impl From<CreateAssignmentRequest> for RouteAssignment {
    fn from(request: CreateAssignmentRequest) -> Self {
        RouteAssignment::new(
            request.vehicle_id,
            request.route_number,
            request.driver_name,
            request.start_time,
            request.end_time,
        )
    }
}
