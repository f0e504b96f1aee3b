//! Runtime setup: storage wiring and the interactive shell.
//!
//! Handles database connections, migrations and service construction for
//! the configured storage backend.

use crate::application::clock::{Clock, SystemClock};
use crate::application::services::{FareCalculatorService, ParkingService};
use crate::config::{Config, StorageBackend};
use crate::infrastructure::console::ConsoleInputReader;
use crate::infrastructure::memory::{MemoryParkingSpotRepository, MemoryTicketRepository};
use crate::infrastructure::persistence::{PgParkingSpotRepository, PgTicketRepository};
use crate::shell::run_shell;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Connects to PostgreSQL with the configured pool settings and applies
/// pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok(pool)
}

/// Runs the parking shell with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL pool and migrations, or the in-memory lot)
/// - Fare calculator with the configured rates
/// - Parking service
/// - Console input
///
/// # Errors
///
/// Returns an error if the database connection or a migration fails.
pub async fn run(config: Config) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let fare_calculator = FareCalculatorService::new(config.fare_rates);
    let input = ConsoleInputReader::new();

    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = Arc::new(connect(&config).await?);

            let service = ParkingService::new(
                Arc::new(PgParkingSpotRepository::new(pool.clone())),
                Arc::new(PgTicketRepository::new(pool)),
                fare_calculator,
                clock,
            );

            run_shell(&service, &input).await
        }
        StorageBackend::Memory => {
            let spots = Arc::new(
                MemoryParkingSpotRepository::with_layout(
                    config.memory_car_spots,
                    config.memory_bike_spots,
                )
                .context("Invalid in-memory lot layout")?,
            );
            tracing::info!(
                cars = config.memory_car_spots,
                bikes = config.memory_bike_spots,
                "Using in-memory storage, state is lost on exit"
            );

            let service = ParkingService::new(
                spots.clone(),
                Arc::new(MemoryTicketRepository::new(spots)),
                fare_calculator,
                clock,
            );

            run_shell(&service, &input).await
        }
    }
}
