//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the storage of spots and tickets. Implementations
//! live in `crate::infrastructure::persistence` (PostgreSQL) and
//! `crate::infrastructure::memory` (in-process). Mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ParkingSpotRepository`] - Spot availability and provisioning
//! - [`TicketRepository`] - Ticket lifecycle and visit counts

pub mod parking_spot_repository;
pub mod ticket_repository;

pub use parking_spot_repository::{MAX_PROVISION_BATCH, ParkingSpotRepository, provision_range};
pub use ticket_repository::TicketRepository;

#[cfg(test)]
pub use parking_spot_repository::MockParkingSpotRepository;
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
