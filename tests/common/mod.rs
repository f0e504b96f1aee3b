#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use parking_system::application::clock::ManualClock;
use parking_system::application::input::{InputReader, parse_registration};
use parking_system::application::services::{FareCalculatorService, ParkingService};
use parking_system::domain::entities::ParkingType;
use parking_system::error::AppError;
use parking_system::infrastructure::memory::{
    MemoryParkingSpotRepository, MemoryTicketRepository,
};
use sqlx::PgPool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub type MemoryParkingService = ParkingService<MemoryParkingSpotRepository, MemoryTicketRepository>;

/// Operator input replayed from a script.
///
/// Selections and registrations are consumed in order. An exhausted
/// selection queue answers `3` so a shell loop always terminates.
#[derive(Default)]
pub struct ScriptedInput {
    selections: Mutex<VecDeque<i32>>,
    registrations: Mutex<VecDeque<String>>,
}

impl ScriptedInput {
    pub fn new(selections: &[i32], registrations: &[&str]) -> Self {
        Self {
            selections: Mutex::new(selections.iter().copied().collect()),
            registrations: Mutex::new(registrations.iter().map(|r| r.to_string()).collect()),
        }
    }

    pub fn remaining_selections(&self) -> usize {
        self.selections.lock().unwrap().len()
    }

    pub fn remaining_registrations(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }
}

impl InputReader for ScriptedInput {
    fn read_selection(&self, _prompt: &str) -> i32 {
        self.selections.lock().unwrap().pop_front().unwrap_or(3)
    }

    fn read_vehicle_registration_number(&self) -> Result<String, AppError> {
        let raw = self
            .registrations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        parse_registration(&raw)
    }
}

/// Wiring of an in-memory parking lot driven by a manual clock.
pub struct MemoryLot {
    pub spots: Arc<MemoryParkingSpotRepository>,
    pub tickets: Arc<MemoryTicketRepository>,
    pub clock: Arc<ManualClock>,
    pub service: MemoryParkingService,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

/// Lot with `cars` car spots numbered first, then `bikes` bike spots.
pub fn create_memory_lot(cars: u32, bikes: u32) -> MemoryLot {
    let spots = Arc::new(MemoryParkingSpotRepository::with_layout(cars, bikes).unwrap());
    let tickets = Arc::new(MemoryTicketRepository::new(spots.clone()));
    let clock = Arc::new(ManualClock::new(start_time()));

    let service = ParkingService::new(
        spots.clone(),
        tickets.clone(),
        FareCalculatorService::default(),
        clock.clone(),
    );

    MemoryLot {
        spots,
        tickets,
        clock,
        service,
    }
}

pub async fn set_spot_availability(pool: &PgPool, number: i32, available: bool) {
    sqlx::query("UPDATE parking SET available = $1 WHERE parking_number = $2")
        .bind(available)
        .bind(number)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn spot_availability(pool: &PgPool, number: i32) -> bool {
    sqlx::query_scalar("SELECT available FROM parking WHERE parking_number = $1")
        .bind(number)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn occupy_all(pool: &PgPool, parking_type: ParkingType) {
    sqlx::query("UPDATE parking SET available = FALSE WHERE type = $1")
        .bind(parking_type.as_str())
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_ticket(
    pool: &PgPool,
    number: i32,
    reg: &str,
    in_time: DateTime<Utc>,
    out_time: Option<DateTime<Utc>>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO ticket (parking_number, vehicle_reg_number, price, in_time, out_time, discount) \
         VALUES ($1, $2, 0, $3, $4, FALSE) RETURNING id",
    )
    .bind(number)
    .bind(reg)
    .bind(in_time)
    .bind(out_time)
    .fetch_one(pool)
    .await
    .unwrap()
}
