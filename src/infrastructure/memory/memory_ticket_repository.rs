//! In-memory implementation of ticket repository.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::entities::{NewTicket, Ticket};
use crate::domain::repositories::TicketRepository;
use crate::error::AppError;
use crate::infrastructure::memory::MemoryParkingSpotRepository;

/// Tickets in issue order; a ticket's id is its position plus one.
///
/// Reads report the current availability of the ticket's spot, the way the
/// PostgreSQL repository joins the `parking` table.
pub struct MemoryTicketRepository {
    tickets: RwLock<Vec<Ticket>>,
    spots: Arc<MemoryParkingSpotRepository>,
}

impl MemoryTicketRepository {
    pub fn new(spots: Arc<MemoryParkingSpotRepository>) -> Self {
        Self {
            tickets: RwLock::new(Vec::new()),
            spots,
        }
    }

    fn joined(&self, ticket: &Ticket) -> Ticket {
        let mut ticket = ticket.clone();
        if let Some(available) = self.spots.availability_of(ticket.parking_spot.number()) {
            ticket.parking_spot = ticket.parking_spot.with_availability(available);
        }
        ticket
    }
}

#[async_trait]
impl TicketRepository for MemoryTicketRepository {
    async fn save_ticket(&self, new_ticket: NewTicket) -> Result<Ticket, AppError> {
        let mut tickets = self.tickets.write().unwrap_or_else(PoisonError::into_inner);
        let ticket = new_ticket.into_ticket(tickets.len() as i64 + 1);
        tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn get_ticket(&self, vehicle_reg_number: &str) -> Result<Option<Ticket>, AppError> {
        let tickets = self.tickets.read().unwrap_or_else(PoisonError::into_inner);

        let ticket = tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .max_by_key(|t| (t.is_open(), t.in_time, t.id));

        Ok(ticket.map(|t| self.joined(t)))
    }

    async fn update_ticket(&self, ticket: &Ticket) -> Result<bool, AppError> {
        let mut tickets = self.tickets.write().unwrap_or_else(PoisonError::into_inner);

        match tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(stored) => {
                stored.price = ticket.price;
                stored.out_time = ticket.out_time;
                stored.discount = ticket.discount;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_nb_ticket(&self, vehicle_reg_number: &str) -> Result<i64, AppError> {
        let tickets = self.tickets.read().unwrap_or_else(PoisonError::into_inner);
        let count = tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .count();
        Ok(count as i64)
    }

    async fn list_by_vehicle(&self, vehicle_reg_number: &str) -> Result<Vec<Ticket>, AppError> {
        let tickets = self.tickets.read().unwrap_or_else(PoisonError::into_inner);

        let mut matching: Vec<Ticket> = tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .map(|t| self.joined(t))
            .collect();
        matching.sort_by(|a, b| b.in_time.cmp(&a.in_time).then(b.id.cmp(&a.id)));

        Ok(matching)
    }
}
