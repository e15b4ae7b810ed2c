//! Motor de validación de dominio
//!
//! Funciones puras que revisan un registro candidato antes de persistirlo.
//! No consultan el almacenamiento, así que sirven igual para creación que
//! para actualización.

use rust_decimal::Decimal;

use crate::models::maintenance_log::{COST_DECIMAL_PLACES, COST_MAX_DIGITS};
use crate::models::{RouteAssignment, Vehicle};
use crate::utils::errors::ValidationError;
use crate::utils::validation::{validate_decimal_precision, validate_non_negative, validation_message};

/// La capacidad no puede superar el techo de su tipo (Bus 100, Tram 250).
/// Subway no tiene techo.
pub fn validate_vehicle(vehicle: &Vehicle) -> Result<(), ValidationError> {
    match vehicle.vehicle_type.capacity_limit() {
        Some(limit) if vehicle.capacity > limit => Err(ValidationError::CapacityExceeded {
            vehicle_type: vehicle.vehicle_type,
            capacity: vehicle.capacity,
            limit,
        }),
        _ => Ok(()),
    }
}

/// La ventana debe cumplir `start_time < end_time` estrictamente
pub fn validate_assignment(assignment: &RouteAssignment) -> Result<(), ValidationError> {
    if assignment.start_time >= assignment.end_time {
        return Err(ValidationError::InvalidTimeWindow {
            start_time: assignment.start_time,
            end_time: assignment.end_time,
        });
    }
    Ok(())
}

/// Validar el costo de un log de mantenimiento y normalizarlo a dos decimales.
///
/// Devuelve el mensaje del campo inválido en caso de error.
pub fn validate_maintenance_cost(cost: Decimal) -> Result<Decimal, String> {
    validate_non_negative(cost).map_err(|e| validation_message(&e))?;
    validate_decimal_precision(&cost, COST_MAX_DIGITS, COST_DECIMAL_PLACES)
        .map_err(|e| validation_message(&e))?;

    let mut normalized = cost;
    normalized.rescale(COST_DECIMAL_PLACES);
    Ok(normalized)
}
