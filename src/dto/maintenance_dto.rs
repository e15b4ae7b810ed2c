use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::utils::errors::RecorderError;
use crate::utils::validation::{validate_date, validate_decimal_str, validation_message};

// Payload de POST /api/vehicles/:vehicle_id/maintenance
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenancePayload {
    pub maintenance_date: NaiveDate,
    pub description: String,
    pub cost: Decimal,
}

impl MaintenancePayload {
    /// Parsear el cuerpo JSON.
    ///
    /// Los campos se leen en el orden `maintenance_date`, `description`,
    /// `cost`; el primero que falte define el mensaje de error.
    pub fn from_json(body: &[u8]) -> Result<Self, RecorderError> {
        let invalid_json = || RecorderError::InvalidMaintenanceLog("Invalid JSON".to_string());

        let value: Value = serde_json::from_slice(body).map_err(|_| invalid_json())?;
        let object = value.as_object().ok_or_else(invalid_json)?;

        let raw_date = required_field(object, "maintenance_date")?;
        let raw_description = required_field(object, "description")?;
        let raw_cost = required_field(object, "cost")?;

        let maintenance_date = match raw_date {
            Value::String(s) => validate_date(s).map_err(|e| invalid(validation_message(&e)))?,
            _ => return Err(invalid("'maintenance_date' must be a date string in YYYY-MM-DD format.".to_string())),
        };

        let description = match raw_description {
            Value::String(s) => s.clone(),
            _ => return Err(invalid("'description' must be a string.".to_string())),
        };

        let cost = match raw_cost {
            Value::String(s) => validate_decimal_str(s).map_err(|e| invalid(validation_message(&e)))?,
            Value::Number(n) => {
                validate_decimal_str(&n.to_string()).map_err(|e| invalid(validation_message(&e)))?
            }
            _ => return Err(invalid("'cost' value must be a decimal number.".to_string())),
        };

        Ok(Self {
            maintenance_date,
            description,
            cost,
        })
    }
}

fn invalid(message: String) -> RecorderError {
    RecorderError::InvalidMaintenanceLog(message)
}

fn required_field<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value, RecorderError> {
    match object.get(field) {
        None => Err(invalid(format!("Missing required field: '{}'", field))),
        Some(Value::Null) => Err(invalid(format!("'{}' cannot be null.", field))),
        Some(value) => Ok(value),
    }
}
