//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, su tipo (Bus/Tram/Subway) y los
//! requests de creación y actualización.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tipo de vehículo - se guarda como `BUS`, `TRAM` o `SUBWAY`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleType {
    Bus,
    Tram,
    Subway,
}

impl VehicleType {
    /// Valor almacenado en la columna `vehicle_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Bus => "BUS",
            VehicleType::Tram => "TRAM",
            VehicleType::Subway => "SUBWAY",
        }
    }

    /// Nombre legible del tipo
    pub fn display_name(&self) -> &'static str {
        match self {
            VehicleType::Bus => "Bus",
            VehicleType::Tram => "Tram",
            VehicleType::Subway => "Subway",
        }
    }

    pub fn plural_name(&self) -> &'static str {
        match self {
            VehicleType::Bus => "Buses",
            VehicleType::Tram => "Trams",
            VehicleType::Subway => "Subways",
        }
    }

    /// Capacidad máxima permitida para el tipo; `None` si no hay techo
    pub fn capacity_limit(&self) -> Option<u32> {
        match self {
            VehicleType::Bus => Some(100),
            VehicleType::Tram => Some(250),
            VehicleType::Subway => None,
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "BUS" => Ok(VehicleType::Bus),
            "TRAM" => Ok(VehicleType::Tram),
            "SUBWAY" => Ok(VehicleType::Subway),
            other => Err(format!("unknown vehicle type '{}'", other)),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub vehicle_id: String,
    pub vehicle_type: VehicleType,
    pub capacity: u32,
    pub last_maintenance: NaiveDate,
}

impl Vehicle {
    pub fn new(
        vehicle_id: impl Into<String>,
        vehicle_type: VehicleType,
        capacity: u32,
        last_maintenance: NaiveDate,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            vehicle_type,
            capacity,
            last_maintenance,
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.vehicle_type, self.vehicle_id)
    }
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 10))]
    pub vehicle_id: String,

    pub vehicle_type: VehicleType,

    pub capacity: u32,

    pub last_maintenance: NaiveDate,
}

impl From<CreateVehicleRequest> for Vehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Vehicle::new(
            request.vehicle_id,
            request.vehicle_type,
            request.capacity,
            request.last_maintenance,
        )
    }
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVehicleRequest {
    pub vehicle_type: Option<VehicleType>,
    pub capacity: Option<u32>,
    pub last_maintenance: Option<NaiveDate>,
}

impl UpdateVehicleRequest {
    /// Aplica los campos presentes sobre el vehículo actual
    pub fn apply_to(self, current: Vehicle) -> Vehicle {
        Vehicle {
            vehicle_id: current.vehicle_id,
            vehicle_type: self.vehicle_type.unwrap_or(current.vehicle_type),
            capacity: self.capacity.unwrap_or(current.capacity),
            last_maintenance: self.last_maintenance.unwrap_or(current.last_maintenance),
        }
    }
}
