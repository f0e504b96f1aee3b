//! Interactive menu loop for the parking attendant.

use anyhow::Result;
use colored::*;

use crate::application::input::InputReader;
use crate::application::services::ParkingService;
use crate::domain::entities::Ticket;
use crate::domain::repositories::{ParkingSpotRepository, TicketRepository};
use crate::error::AppError;

/// Main menu shown before every operation.
pub const MAIN_MENU: &str = "Please select an option. Simply enter the number to choose an action\n\
1 New Vehicle Entering - Allocate Parking Space\n\
2 Vehicle Exiting - Generate Ticket Price\n\
3 Shutdown System";

/// Runs the menu loop until the operator picks "Shutdown System".
///
/// Failures of individual operations are printed and the loop continues.
///
/// # Errors
///
/// Never fails today; the `Result` leaves room for terminal errors that
/// should stop the loop.
pub async fn run_shell<S, T, I>(service: &ParkingService<S, T>, input: &I) -> Result<()>
where
    S: ParkingSpotRepository,
    T: TicketRepository,
    I: InputReader + ?Sized,
{
    println!("{}", "Welcome to Parking System!".bright_blue().bold());

    loop {
        match input.read_selection(MAIN_MENU) {
            1 => match service.process_incoming_vehicle(input).await {
                Ok(ticket) => print_entry(&ticket),
                Err(e) => print_error(&e),
            },
            2 => match service.process_exiting_vehicle(input).await {
                Ok(ticket) => print_exit(&ticket),
                Err(e) => print_error(&e),
            },
            3 => {
                println!("{}", "Exiting from the system!".bright_blue());
                break;
            }
            _ => println!(
                "{}",
                "Unsupported option. Please enter a number corresponding to the provided menu"
                    .yellow()
            ),
        }
    }

    Ok(())
}

fn print_entry(ticket: &Ticket) {
    println!();
    println!("{}", "✅ Generated Ticket and saved in DB".green().bold());
    if ticket.discount {
        println!(
            "{}",
            "Welcome back! As a regular user of our parking lot, you'll benefit from a 5% discount."
                .bright_cyan()
        );
    }
    println!(
        "  Please park your vehicle in spot number: {}",
        ticket.parking_spot.number().to_string().bright_yellow().bold()
    );
    println!(
        "  Recorded in-time for vehicle number: {} is: {}",
        ticket.vehicle_reg_number.cyan(),
        ticket.in_time.format("%Y-%m-%d %H:%M:%S")
    );
    println!();
}

fn print_exit(ticket: &Ticket) {
    println!();
    println!(
        "  Please pay the parking fare: {}",
        format!("{:.2}", ticket.price).bright_yellow().bold()
    );
    if let Some(out_time) = ticket.out_time {
        println!(
            "  Recorded out-time for vehicle number: {} is: {}",
            ticket.vehicle_reg_number.cyan(),
            out_time.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!();
}

fn print_error(e: &AppError) {
    let message = match e {
        AppError::InvalidSelection(_) => "Incorrect input provided".to_string(),
        AppError::NoSpotAvailable(parking_type) => format!(
            "Error fetching next available parking slot: parking slots might be full for {parking_type}"
        ),
        AppError::TicketNotFound(reg) => {
            format!("No vehicle with registration number {reg} is currently parked")
        }
        AppError::Storage(_) => format!("Unable to process request. Error occurred: {e}"),
        other => other.to_string(),
    };

    println!("{}", format!("❌ {message}").red());
}
