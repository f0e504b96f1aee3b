//! Operator input capability.
//!
//! The parking service asks an [`InputReader`] for the vehicle type and the
//! registration number. The console implementation lives in
//! [`crate::infrastructure::console`].

use crate::error::AppError;
use validator::Validate;

/// Maximum registration length, matching the `vehicle_reg_number` column.
pub const MAX_REGISTRATION_LEN: u64 = 10;

/// Source of operator input.
#[cfg_attr(test, mockall::automock)]
pub trait InputReader: Send + Sync {
    /// Shows `prompt` and reads a numeric selection.
    ///
    /// Returns `-1` when the input is not a number.
    fn read_selection(&self, prompt: &str) -> i32;

    /// Reads a vehicle registration number, trimmed and validated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the registration is empty or
    /// longer than [`MAX_REGISTRATION_LEN`] characters after trimming.
    fn read_vehicle_registration_number(&self) -> Result<String, AppError>;
}

/// A registration number as typed by the operator.
///
/// Any characters are accepted; the length is counted in characters.
#[derive(Debug, Validate)]
struct VehicleRegistration {
    #[validate(length(min = 1, max = 10, message = "must be 1 to 10 characters"))]
    value: String,
}

/// Trims and validates a raw registration number.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] describing the failed rule.
pub fn parse_registration(raw: &str) -> Result<String, AppError> {
    let registration = VehicleRegistration {
        value: raw.trim().to_string(),
    };

    registration.validate().map_err(|e| {
        AppError::InvalidInput(format!("invalid vehicle registration number: {e}"))
    })?;

    Ok(registration.value)
}
