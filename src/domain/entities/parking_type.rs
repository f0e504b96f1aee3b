//! Vehicle categories accepted by the parking lot.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle category of a spot, which also selects the hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParkingType {
    Car,
    Bike,
}

impl ParkingType {
    /// Every category, in menu order.
    pub const ALL: [ParkingType; 2] = [ParkingType::Car, ParkingType::Bike];

    /// Resolves the operator's menu selection (`1` car, `2` bike).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidSelection`] for any other value.
    pub fn from_selection(selection: i32) -> Result<Self, AppError> {
        match selection {
            1 => Ok(ParkingType::Car),
            2 => Ok(ParkingType::Bike),
            other => Err(AppError::InvalidSelection(other)),
        }
    }

    /// Text stored in the `parking.type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParkingType::Car => "CAR",
            ParkingType::Bike => "BIKE",
        }
    }
}

impl fmt::Display for ParkingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParkingType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAR" => Ok(ParkingType::Car),
            "BIKE" => Ok(ParkingType::Bike),
            _ => Err(AppError::UnknownCategory(s.to_string())),
        }
    }
}
