//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de campos y
//! conversión de tipos. Todas devuelven `validator::ValidationError` con un
//! mensaje legible listo para la respuesta de la API.

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

fn with_message(mut error: ValidationError, message: String) -> ValidationError {
    error.message = Some(Cow::Owned(message));
    error
}

/// Mensaje legible de un error de validación (o su código si no tiene)
pub fn validation_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        with_message(
            error,
            format!(
                "'{}' value has an invalid date format. It must be in YYYY-MM-DD format.",
                value
            ),
        )
    })
}

/// Validar y convertir string a decimal
pub fn validate_decimal_str(value: &str) -> Result<Decimal, ValidationError> {
    value.trim().parse::<Decimal>().map_err(|_| {
        let mut error = ValidationError::new("decimal");
        error.add_param("value".into(), &value.to_string());
        with_message(error, format!("'{}' value must be a decimal number.", value))
    })
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(with_message(
            error,
            "Ensure this value is greater than or equal to 0.".to_string(),
        ));
    }
    Ok(())
}

/// Validar precisión de un decimal (NUMERIC(max_digits, decimal_places))
pub fn validate_decimal_precision(
    value: &Decimal,
    max_digits: u32,
    decimal_places: u32,
) -> Result<(), ValidationError> {
    // Igual que NUMERIC: los ceros a la derecha de la mantisa cuentan
    let scale = value.scale();
    let mantissa_digits = value.mantissa().unsigned_abs().to_string().len() as u32;
    let digits = mantissa_digits.max(scale);
    let whole_digits = digits - scale;

    if digits > max_digits {
        let mut error = ValidationError::new("max_digits");
        error.add_param("max".into(), &max_digits);
        error.add_param("actual".into(), &digits);
        return Err(with_message(
            error,
            format!("Ensure that there are no more than {} digits in total.", max_digits),
        ));
    }

    if scale > decimal_places {
        let mut error = ValidationError::new("decimal_places");
        error.add_param("max".into(), &decimal_places);
        error.add_param("actual".into(), &scale);
        return Err(with_message(
            error,
            format!("Ensure that there are no more than {} decimal places.", decimal_places),
        ));
    }

    if whole_digits > max_digits - decimal_places {
        let mut error = ValidationError::new("whole_digits");
        error.add_param("max".into(), &(max_digits - decimal_places));
        error.add_param("actual".into(), &whole_digits);
        return Err(with_message(
            error,
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                max_digits - decimal_places
            ),
        ));
    }

    Ok(())
}
