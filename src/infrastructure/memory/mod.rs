//! In-process repository implementations.
//!
//! State lives in memory and disappears with the process. Used by the
//! `--in-memory` mode of the shell and by end-to-end tests.
//!
//! # Repositories
//!
//! - [`MemoryParkingSpotRepository`] - Spots held in an ordered map
//! - [`MemoryTicketRepository`] - Tickets held in issue order, joined with
//!   the spot repository on read

pub mod memory_parking_spot_repository;
pub mod memory_ticket_repository;

pub use memory_parking_spot_repository::MemoryParkingSpotRepository;
pub use memory_ticket_repository::MemoryTicketRepository;
