//! CLI administration tool for parking-system.
//!
//! Provides commands for provisioning spots, inspecting tickets and checking
//! the database without going through the attendant shell.
//!
//! # Usage
//!
//! ```bash
//! # List all spots
//! cargo run --bin admin -- spots list
//!
//! # Add two car spots and one bike spot
//! cargo run --bin admin -- spots provision --car 2 --bike 1
//!
//! # Show the current ticket of a vehicle as JSON
//! cargo run --bin admin -- tickets show ABCDEF
//!
//! # Show every ticket of a vehicle
//! cargo run --bin admin -- tickets history ABCDEF
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use parking_system::application::input::parse_registration;
use parking_system::config::{self, Config};
use parking_system::domain::entities::{ParkingType, Ticket};
use parking_system::domain::repositories::{
    MAX_PROVISION_BATCH, ParkingSpotRepository, TicketRepository,
};
use parking_system::infrastructure::persistence::{PgParkingSpotRepository, PgTicketRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing parking-system.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage parking spots
    Spots {
        #[command(subcommand)]
        action: SpotAction,
    },

    /// Inspect tickets
    Tickets {
        #[command(subcommand)]
        action: TicketAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Spot management subcommands.
#[derive(Subcommand)]
enum SpotAction {
    /// List all spots
    List,

    /// Append new spots after the highest existing number
    Provision {
        /// Number of car spots to add
        #[arg(long, default_value_t = 0, value_parser = batch_size)]
        car: u32,

        /// Number of bike spots to add
        #[arg(long, default_value_t = 0, value_parser = batch_size)]
        bike: u32,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Ticket inspection subcommands.
#[derive(Subcommand)]
enum TicketAction {
    /// Show the open (or latest) ticket of a vehicle as JSON
    Show {
        /// Vehicle registration number
        registration: String,
    },

    /// List every ticket of a vehicle, newest first
    History {
        /// Vehicle registration number
        registration: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env_with_backend(config::StorageBackend::Postgres)
        .context("DATABASE_URL must be set")?;
    let pool = parking_system::app::connect(&config).await?;

    match cli.command {
        Commands::Spots { action } => handle_spot_action(action, &pool).await?,
        Commands::Tickets { action } => handle_ticket_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Parses a provisioning count bounded by [`MAX_PROVISION_BATCH`].
fn batch_size(raw: &str) -> Result<u32, String> {
    let count: u32 = raw.parse().map_err(|e| format!("{e}"))?;
    if count > MAX_PROVISION_BATCH {
        return Err(format!("at most {MAX_PROVISION_BATCH} spots per batch"));
    }
    Ok(count)
}

/// Dispatches spot management commands.
async fn handle_spot_action(action: SpotAction, pool: &PgPool) -> Result<()> {
    let repo = PgParkingSpotRepository::new(Arc::new(pool.clone()));

    match action {
        SpotAction::List => list_spots(&repo).await?,
        SpotAction::Provision { car, bike, yes } => {
            provision_spots(&repo, car, bike, yes).await?;
        }
    }

    Ok(())
}

/// Lists all spots with availability indicators.
///
/// # Output Format
///
/// ```text
/// 🅿️  Parking Spots
///
///   No.  Type   Status
///   ─────────────────────────
///   1    CAR    OCCUPIED
///   4    BIKE   FREE
/// ```
async fn list_spots(repo: &PgParkingSpotRepository) -> Result<()> {
    println!("{}", "🅿️  Parking Spots".bright_blue().bold());
    println!();

    let spots = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list spots: {}", e))?;

    if spots.is_empty() {
        println!("{}", "  No spots provisioned".yellow());
        println!();
        println!(
            "  Add some with: {} admin spots provision --car 3 --bike 2",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<6} {:<10}",
        "No.".bright_white().bold(),
        "Type".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(25).bright_black());

    for spot in &spots {
        let status = if spot.is_available() {
            "FREE".green()
        } else {
            "OCCUPIED".red()
        };

        println!(
            "  {:<4} {:<6} {}",
            spot.number().to_string().bright_black(),
            spot.parking_type().as_str().cyan(),
            status
        );
    }

    let free = spots.iter().filter(|s| s.is_available()).count();
    println!();
    println!(
        "  Total: {}  Free: {}",
        spots.len().to_string().bright_white().bold(),
        free.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Appends new spots with a confirmation prompt.
async fn provision_spots(
    repo: &PgParkingSpotRepository,
    car: u32,
    bike: u32,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🏗️  Provision Parking Spots".bright_blue().bold());
    println!();

    if car == 0 && bike == 0 {
        println!("{}", "⚠️  Nothing to provision, pass --car and/or --bike".yellow());
        return Ok(());
    }

    println!("  Car spots:  {}", car.to_string().cyan());
    println!("  Bike spots: {}", bike.to_string().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Provision these spots?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    for (parking_type, count) in [(ParkingType::Car, car), (ParkingType::Bike, bike)] {
        if count == 0 {
            continue;
        }

        let added = repo
            .provision(parking_type, count)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to provision {} spots: {}", parking_type, e))?;

        let numbers: Vec<String> = added.iter().map(|s| s.number().to_string()).collect();
        println!(
            "  {} {}: {}",
            "✅".green(),
            parking_type.as_str().cyan(),
            numbers.join(", ").bright_white()
        );
    }

    println!();
    println!("{}", "✅ Spots provisioned successfully!".green().bold());
    println!();

    Ok(())
}

/// Dispatches ticket inspection commands.
async fn handle_ticket_action(action: TicketAction, pool: &PgPool) -> Result<()> {
    let repo = PgTicketRepository::new(Arc::new(pool.clone()));

    match action {
        TicketAction::Show { registration } => {
            let registration = parse_registration(&registration)?;
            let ticket = repo
                .get_ticket(&registration)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("No ticket found for this vehicle")?;

            println!("{}", serde_json::to_string_pretty(&ticket)?);
        }
        TicketAction::History { registration } => {
            let registration = parse_registration(&registration)?;
            let tickets = repo
                .list_by_vehicle(&registration)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            print_history(&registration, &tickets);
        }
    }

    Ok(())
}

/// Prints the ticket history of a vehicle.
fn print_history(registration: &str, tickets: &[Ticket]) {
    println!(
        "{} {}",
        "🎫 Tickets for".bright_blue().bold(),
        registration.cyan().bold()
    );
    println!();

    if tickets.is_empty() {
        println!("{}", "  No tickets found".yellow());
        return;
    }

    println!(
        "  {:<6} {:<5} {:<17} {:<17} {:>8} {}",
        "ID".bright_white().bold(),
        "Spot".bright_white().bold(),
        "In".bright_white().bold(),
        "Out".bright_white().bold(),
        "Price".bright_white().bold(),
        "Discount".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for ticket in tickets {
        let out = match ticket.out_time {
            Some(t) => t.format("%Y-%m-%d %H:%M").to_string().normal(),
            None => "PARKED".green(),
        };

        println!(
            "  {:<6} {:<5} {:<17} {:<17} {:>8.2} {}",
            ticket.id.to_string().bright_black(),
            ticket.parking_spot.number(),
            ticket.in_time.format("%Y-%m-%d %H:%M").to_string(),
            out,
            ticket.price,
            if ticket.discount { "5%" } else { "-" }
        );
    }

    println!();
    println!(
        "  Total: {}",
        tickets.len().to_string().bright_white().bold()
    );
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let spots: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking")
                .fetch_one(pool)
                .await?;

            let open_tickets: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM ticket WHERE out_time IS NULL")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL:   {}", version.bright_white());
            println!("  Spots:        {}", spots.to_string().bright_green().bold());
            println!(
                "  Open tickets: {}",
                open_tickets.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_bounds() {
        assert_eq!(batch_size("0"), Ok(0));
        assert_eq!(batch_size("1000"), Ok(MAX_PROVISION_BATCH));
        assert!(batch_size("1001").is_err());
        assert!(batch_size("4294967295").is_err());
        assert!(batch_size("-1").is_err());
    }

    #[test]
    fn test_provision_rejects_oversized_count() {
        let parsed = Cli::try_parse_from(["admin", "spots", "provision", "--car", "5000"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["admin", "spots", "provision", "--car", "2", "-y"]);
        assert!(parsed.is_ok());
    }
}
