//! Vehicle entry and exit orchestration.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::application::clock::Clock;
use crate::application::input::InputReader;
use crate::application::services::FareCalculatorService;
use crate::domain::entities::{NewTicket, ParkingSpot, ParkingType, Ticket};
use crate::domain::repositories::{ParkingSpotRepository, TicketRepository};
use crate::error::AppError;

/// Prompt shown when asking for the vehicle type.
pub const VEHICLE_TYPE_PROMPT: &str = "Please select vehicle type from menu\n1 CAR\n2 BIKE";

/// Service running the parking workflow: select → reserve → bill → release.
///
/// Entry and exit operations on one instance are serialized by an internal
/// lock, so the availability lookup, the reservation and the ticket write of
/// one operation never interleave with another operation on the same
/// service.
pub struct ParkingService<S: ParkingSpotRepository, T: TicketRepository> {
    spot_repository: Arc<S>,
    ticket_repository: Arc<T>,
    fare_calculator: FareCalculatorService,
    clock: Arc<dyn Clock>,
    /// Held across operator input, so one instance serves one operator at a
    /// time while a blocking reader waits on the terminal.
    operation_lock: Mutex<()>,
}

impl<S: ParkingSpotRepository, T: TicketRepository> ParkingService<S, T> {
    /// Creates a new parking service.
    pub fn new(
        spot_repository: Arc<S>,
        ticket_repository: Arc<T>,
        fare_calculator: FareCalculatorService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            spot_repository,
            ticket_repository,
            fare_calculator,
            clock,
            operation_lock: Mutex::new(()),
        }
    }

    /// Asks the operator for the vehicle type.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidSelection`] for anything but `1` or `2`.
    pub fn get_vehicle_type<I: InputReader + ?Sized>(
        &self,
        input: &I,
    ) -> Result<ParkingType, AppError> {
        let selection = input.read_selection(VEHICLE_TYPE_PROMPT);
        ParkingType::from_selection(selection)
    }

    /// Asks for the vehicle type and finds the lowest free spot for it.
    ///
    /// The returned spot is still marked available; nothing is reserved.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSelection`] if the vehicle type is invalid
    /// - [`AppError::NoSpotAvailable`] if the category is full
    /// - [`AppError::Storage`] on repository errors
    pub async fn get_next_parking_number_if_available<I: InputReader + ?Sized>(
        &self,
        input: &I,
    ) -> Result<ParkingSpot, AppError> {
        let parking_type = self.get_vehicle_type(input)?;

        let number = self
            .spot_repository
            .get_next_available_slot(parking_type)
            .await?
            .filter(|number| *number > 0)
            .ok_or(AppError::NoSpotAvailable(parking_type))?;

        Ok(ParkingSpot::new(number, parking_type, true))
    }

    /// Registers an arriving vehicle and opens its ticket.
    ///
    /// # Flow
    ///
    /// 1. Resolve the vehicle type and pick the next free spot
    /// 2. Read the registration number
    /// 3. Refuse vehicles that already hold an open ticket
    /// 4. Mark the spot unavailable
    /// 5. Grant the loyalty discount if the vehicle has been here before
    /// 6. Save the open ticket
    ///
    /// Nothing is written before step 4. If a later step fails, the spot is
    /// released again before the error is returned.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSelection`], [`AppError::NoSpotAvailable`],
    ///   [`AppError::InvalidInput`], [`AppError::VehicleAlreadyParked`]
    ///   without any mutation
    /// - [`AppError::Storage`] if a repository call fails
    pub async fn process_incoming_vehicle<I: InputReader + ?Sized>(
        &self,
        input: &I,
    ) -> Result<Ticket, AppError> {
        let _guard = self.operation_lock.lock().await;

        let result = self.admit(input).await;
        if let Err(e) = &result {
            report_failure("entry", e);
        }
        result
    }

    /// Closes the ticket of a leaving vehicle, bills it and frees its spot.
    ///
    /// # Flow
    ///
    /// 1. Read the registration number and load the open ticket
    /// 2. Stamp the exit time
    /// 3. Grant the loyalty discount if this is not the first visit
    /// 4. Compute the fare and persist the ticket
    /// 5. Release the spot
    ///
    /// If the ticket cannot be persisted the spot stays unavailable.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] or [`AppError::TicketNotFound`] without
    ///   any mutation
    /// - [`AppError::InvalidInterval`] if the stored entry time lies after now
    /// - [`AppError::Storage`] if a repository call fails
    pub async fn process_exiting_vehicle<I: InputReader + ?Sized>(
        &self,
        input: &I,
    ) -> Result<Ticket, AppError> {
        let _guard = self.operation_lock.lock().await;

        let result = self.release(input).await;
        if let Err(e) = &result {
            report_failure("exit", e);
        }
        result
    }

    async fn admit<I: InputReader + ?Sized>(&self, input: &I) -> Result<Ticket, AppError> {
        let spot = self.get_next_parking_number_if_available(input).await?;
        let vehicle_reg_number = input.read_vehicle_registration_number()?;

        if let Some(existing) = self.ticket_repository.get_ticket(&vehicle_reg_number).await?
            && existing.is_open()
        {
            return Err(AppError::VehicleAlreadyParked(vehicle_reg_number));
        }

        let reserved = spot.with_availability(false);
        if !self.spot_repository.update_parking(&reserved).await? {
            return Err(AppError::storage(format!(
                "parking spot {} does not exist",
                reserved.number()
            )));
        }

        match self.open_ticket(&reserved, vehicle_reg_number).await {
            Ok(ticket) => {
                info!(
                    ticket_id = ticket.id,
                    spot = reserved.number(),
                    parking_type = %reserved.parking_type(),
                    vehicle = %ticket.vehicle_reg_number,
                    discount = ticket.discount,
                    "Vehicle entered"
                );
                Ok(ticket)
            }
            Err(e) => {
                self.undo_reservation(&reserved).await;
                Err(e)
            }
        }
    }

    async fn open_ticket(
        &self,
        spot: &ParkingSpot,
        vehicle_reg_number: String,
    ) -> Result<Ticket, AppError> {
        let previous_tickets = self
            .ticket_repository
            .get_nb_ticket(&vehicle_reg_number)
            .await?;

        let new_ticket = NewTicket {
            parking_spot: spot.clone(),
            vehicle_reg_number,
            in_time: self.clock.now(),
            discount: previous_tickets > 0,
        };

        self.ticket_repository.save_ticket(new_ticket).await
    }

    async fn undo_reservation(&self, reserved: &ParkingSpot) {
        let spot = reserved.with_availability(true);
        match self.spot_repository.update_parking(&spot).await {
            Ok(true) => warn!(spot = spot.number(), "Reservation released after failed entry"),
            Ok(false) => error!(spot = spot.number(), "Reserved spot vanished during entry"),
            Err(e) => error!(
                spot = spot.number(),
                error = %e,
                "Failed to release reservation, spot stays unavailable"
            ),
        }
    }

    async fn release<I: InputReader + ?Sized>(&self, input: &I) -> Result<Ticket, AppError> {
        let vehicle_reg_number = input.read_vehicle_registration_number()?;

        let mut ticket = match self.ticket_repository.get_ticket(&vehicle_reg_number).await? {
            Some(ticket) if ticket.is_open() => ticket,
            _ => return Err(AppError::TicketNotFound(vehicle_reg_number)),
        };

        ticket.out_time = Some(self.clock.now());

        let visits = self
            .ticket_repository
            .get_nb_ticket(&vehicle_reg_number)
            .await?;
        let discount = visits > 1;
        ticket.discount = discount;
        self.fare_calculator.apply(&mut ticket, discount)?;

        if !self.ticket_repository.update_ticket(&ticket).await? {
            return Err(AppError::storage(format!(
                "unable to update ticket information for ticket {}",
                ticket.id
            )));
        }

        let freed = ticket.parking_spot.with_availability(true);
        if !self.spot_repository.update_parking(&freed).await? {
            return Err(AppError::storage(format!(
                "parking spot {} does not exist",
                freed.number()
            )));
        }
        ticket.parking_spot = freed;

        info!(
            ticket_id = ticket.id,
            spot = ticket.parking_spot.number(),
            vehicle = %ticket.vehicle_reg_number,
            price = ticket.price,
            discount = ticket.discount,
            "Vehicle exited"
        );

        Ok(ticket)
    }
}

fn report_failure(operation: &'static str, e: &AppError) {
    if e.is_storage() {
        error!(operation, code = e.code(), error = %e, "Parking operation failed");
    } else {
        warn!(operation, code = e.code(), error = %e, "Parking operation rejected");
    }
}
