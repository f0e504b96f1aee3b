//! Core domain entities of the parking lot.
//!
//! # Entity Types
//!
//! - [`ParkingType`] - Vehicle category (car or bike)
//! - [`ParkingSpot`] - A physical spot and its availability
//! - [`Ticket`] - The billing record of one parking session
//!
//! Creation follows the same split as the rest of the crate: [`NewTicket`]
//! carries the fields of a ticket the store has not yet assigned an id to.

pub mod parking_spot;
pub mod parking_type;
pub mod ticket;

pub use parking_spot::ParkingSpot;
pub use parking_type::ParkingType;
pub use ticket::{NewTicket, Ticket};
