//! Business logic services for the application layer.

pub mod fare_calculator_service;
pub mod parking_service;

pub use fare_calculator_service::{FareCalculatorService, FareRates};
pub use parking_service::ParkingService;
