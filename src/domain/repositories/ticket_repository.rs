//! Repository trait for ticket data access.

use crate::domain::entities::{NewTicket, Ticket};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for parking tickets.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTicketRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryTicketRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_ticket.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Persists a new open ticket and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn save_ticket(&self, new_ticket: NewTicket) -> Result<Ticket, AppError>;

    /// Finds the ticket of a vehicle: its open ticket if there is one,
    /// otherwise its most recent one.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Ticket))` if the vehicle has any ticket
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_ticket(&self, vehicle_reg_number: &str) -> Result<Option<Ticket>, AppError>;

    /// Writes price, exit time and discount flag of an existing ticket.
    ///
    /// Returns `Ok(false)` if no ticket with that id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn update_ticket(&self, ticket: &Ticket) -> Result<bool, AppError>;

    /// Counts every ticket ever issued to a vehicle, open ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_nb_ticket(&self, vehicle_reg_number: &str) -> Result<i64, AppError>;

    /// Lists all tickets of a vehicle, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn list_by_vehicle(&self, vehicle_reg_number: &str) -> Result<Vec<Ticket>, AppError>;
}
