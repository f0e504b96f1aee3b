//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-bound parameters.
//!
//! # Repositories
//!
//! - [`PgParkingSpotRepository`] - Spot availability and provisioning
//! - [`PgTicketRepository`] - Ticket storage and visit counts

pub mod pg_parking_spot_repository;
pub mod pg_ticket_repository;

pub use pg_parking_spot_repository::PgParkingSpotRepository;
pub use pg_ticket_repository::PgTicketRepository;
