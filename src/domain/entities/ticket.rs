//! Ticket entity, the billing record of one parking session.

use super::ParkingSpot;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted ticket.
///
/// A ticket is open while `out_time` is `None`. Price stays at zero until the
/// vehicle leaves.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub id: i64,
    pub parking_spot: ParkingSpot,
    pub vehicle_reg_number: String,
    pub price: f64,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
    pub discount: bool,
}

impl Ticket {
    /// Returns true while the vehicle is still parked.
    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }
}

/// Input data for opening a ticket. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub parking_spot: ParkingSpot,
    pub vehicle_reg_number: String,
    pub in_time: DateTime<Utc>,
    pub discount: bool,
}

impl NewTicket {
    /// Materializes the stored ticket once the store has assigned an id.
    pub fn into_ticket(self, id: i64) -> Ticket {
        Ticket {
            id,
            parking_spot: self.parking_spot,
            vehicle_reg_number: self.vehicle_reg_number,
            price: 0.0,
            in_time: self.in_time,
            out_time: None,
            discount: self.discount,
        }
    }
}
