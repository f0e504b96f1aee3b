//! Error type shared by every layer of the parking system.
//!
//! Each variant is a distinct failure kind the caller can branch on. The
//! interactive shell reports them to the operator, the admin tool wraps them
//! in `anyhow` context.

use crate::domain::entities::ParkingType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The operator picked a vehicle type outside the menu.
    #[error("unsupported vehicle type selection: {0}")]
    InvalidSelection(i32),

    /// Every spot of the requested category is occupied.
    #[error("no parking spot available for {0}")]
    NoSpotAvailable(ParkingType),

    /// No open ticket exists for the vehicle.
    #[error("no open ticket found for vehicle {0}")]
    TicketNotFound(String),

    /// The vehicle already holds an open ticket.
    #[error("vehicle {0} is already parked")]
    VehicleAlreadyParked(String),

    /// Exit time missing or earlier than entry time.
    #[error("invalid parking interval: {0}")]
    InvalidInterval(String),

    /// A stored or typed category that is neither CAR nor BIKE.
    #[error("unknown parking type: {0}")]
    UnknownCategory(String),

    /// Malformed operator input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl AppError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidSelection(_) => "invalid_selection",
            AppError::NoSpotAvailable(_) => "no_spot_available",
            AppError::TicketNotFound(_) => "ticket_not_found",
            AppError::VehicleAlreadyParked(_) => "vehicle_already_parked",
            AppError::InvalidInterval(_) => "invalid_interval",
            AppError::UnknownCategory(_) => "unknown_category",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Storage(_) => "storage_failure",
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Returns true for failures of the persistence layer.
    pub fn is_storage(&self) -> bool {
        matches!(self, AppError::Storage(_))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::Storage(e.to_string())
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(e: dialoguer::Error) -> Self {
        AppError::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidSelection(3).code(), "invalid_selection");
        assert_eq!(
            AppError::NoSpotAvailable(ParkingType::Bike).code(),
            "no_spot_available"
        );
        assert_eq!(
            AppError::TicketNotFound("ABCDEF".into()).code(),
            "ticket_not_found"
        );
        assert_eq!(AppError::storage("down").code(), "storage_failure");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NoSpotAvailable(ParkingType::Car).to_string(),
            "no parking spot available for CAR"
        );
        assert_eq!(
            AppError::InvalidSelection(7).to_string(),
            "unsupported vehicle type selection: 7"
        );
    }

    #[test]
    fn test_sqlx_error_maps_to_storage() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(err.is_storage());
    }
}
