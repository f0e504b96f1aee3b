//! Fare computation from parking duration, category and loyalty discount.

use chrono::{DateTime, Utc};

use crate::domain::entities::{ParkingType, Ticket};
use crate::error::AppError;

/// Default hourly rate for cars.
pub const CAR_RATE_PER_HOUR: f64 = 1.5;
/// Default hourly rate for bikes.
pub const BIKE_RATE_PER_HOUR: f64 = 1.0;
/// Multiplier applied to the hourly rate of returning vehicles.
pub const DISCOUNT_RATE: f64 = 0.95;
/// Stays up to this many minutes are free.
pub const FREE_PARKING_MINUTES: f64 = 30.0;

/// Hourly rate per vehicle category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareRates {
    pub car_per_hour: f64,
    pub bike_per_hour: f64,
}

impl FareRates {
    pub fn hourly_rate(&self, parking_type: ParkingType) -> f64 {
        match parking_type {
            ParkingType::Car => self.car_per_hour,
            ParkingType::Bike => self.bike_per_hour,
        }
    }
}

impl Default for FareRates {
    fn default() -> Self {
        Self {
            car_per_hour: CAR_RATE_PER_HOUR,
            bike_per_hour: BIKE_RATE_PER_HOUR,
        }
    }
}

/// Pure fare calculator.
///
/// Stays of at most [`FREE_PARKING_MINUTES`] cost nothing. Longer stays are
/// billed pro rata to the minute: `minutes * rate / 60`. A discounted stay
/// multiplies the rate by [`DISCOUNT_RATE`] before the formula is applied.
/// Prices are not rounded.
#[derive(Debug, Clone, Default)]
pub struct FareCalculatorService {
    rates: FareRates,
}

impl FareCalculatorService {
    pub fn new(rates: FareRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> FareRates {
        self.rates
    }

    /// Computes the price of a stay.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInterval`] if `out_time` is missing or
    /// earlier than `in_time`.
    pub fn calculate_fare(
        &self,
        in_time: DateTime<Utc>,
        out_time: Option<DateTime<Utc>>,
        parking_type: ParkingType,
        discount: bool,
    ) -> Result<f64, AppError> {
        let out_time = match out_time {
            Some(out_time) if out_time >= in_time => out_time,
            Some(out_time) => {
                return Err(AppError::InvalidInterval(format!(
                    "out time {out_time} precedes in time {in_time}"
                )));
            }
            None => {
                return Err(AppError::InvalidInterval(
                    "out time is not set".to_string(),
                ));
            }
        };

        let duration_minutes = (out_time - in_time).num_milliseconds() as f64 / 60_000.0;

        if duration_minutes <= FREE_PARKING_MINUTES {
            return Ok(0.0);
        }

        let mut rate = self.rates.hourly_rate(parking_type);
        if discount {
            rate *= DISCOUNT_RATE;
        }

        Ok(duration_minutes * rate / 60.0)
    }

    /// Computes the fare of `ticket` and stores it as the ticket price.
    ///
    /// # Errors
    ///
    /// See [`Self::calculate_fare`]. The ticket is left untouched on error.
    pub fn apply(&self, ticket: &mut Ticket, discount: bool) -> Result<(), AppError> {
        ticket.price = self.calculate_fare(
            ticket.in_time,
            ticket.out_time,
            ticket.parking_spot.parking_type(),
            discount,
        )?;
        Ok(())
    }
}
