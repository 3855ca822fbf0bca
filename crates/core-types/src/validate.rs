//! Range checks shared by every calculation crate.
//!
//! Each helper returns `CoreError::InvalidInput` naming the parameter and the
//! domain it must fall in. NaN and infinities are rejected everywhere.

use crate::error::CoreError;

pub fn finite(field: &str, value: f64) -> Result<f64, CoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::invalid(field, "must be a finite number"))
    }
}

pub fn non_negative(field: &str, value: f64) -> Result<f64, CoreError> {
    if finite(field, value)? < 0.0 {
        return Err(CoreError::invalid(field, "must be non-negative"));
    }
    Ok(value)
}

pub fn positive(field: &str, value: f64) -> Result<f64, CoreError> {
    if finite(field, value)? <= 0.0 {
        return Err(CoreError::invalid(field, "must be positive"));
    }
    Ok(value)
}

/// Accepts values in the closed interval `[0, 1]`.
pub fn unit_interval(field: &str, value: f64) -> Result<f64, CoreError> {
    if !(0.0..=1.0).contains(&finite(field, value)?) {
        return Err(CoreError::invalid(field, "must be between 0 and 1"));
    }
    Ok(value)
}

pub fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64, CoreError> {
    if !(min..=max).contains(&finite(field, value)?) {
        return Err(CoreError::invalid(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
    Ok(value)
}
