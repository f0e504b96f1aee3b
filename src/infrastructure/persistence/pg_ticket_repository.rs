//! PostgreSQL implementation of ticket repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewTicket, ParkingSpot, Ticket};
use crate::domain::repositories::TicketRepository;
use crate::error::AppError;

/// Row of the `ticket` table joined with its spot.
#[derive(Debug, FromRow)]
struct TicketRow {
    id: i64,
    parking_number: i32,
    parking_type: String,
    spot_available: bool,
    vehicle_reg_number: String,
    price: f64,
    in_time: DateTime<Utc>,
    out_time: Option<DateTime<Utc>>,
    discount: bool,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = AppError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Ticket {
            id: row.id,
            parking_spot: ParkingSpot::new(
                row.parking_number,
                row.parking_type.parse()?,
                row.spot_available,
            ),
            vehicle_reg_number: row.vehicle_reg_number,
            price: row.price,
            in_time: row.in_time,
            out_time: row.out_time,
            discount: row.discount,
        })
    }
}

const SELECT_TICKET: &str = r#"
    SELECT t.id, t.parking_number, p.type AS parking_type, p.available AS spot_available,
           t.vehicle_reg_number, t.price, t.in_time, t.out_time, t.discount
    FROM ticket t
    JOIN parking p ON p.parking_number = t.parking_number
    WHERE t.vehicle_reg_number = $1
"#;

/// PostgreSQL repository for parking tickets.
pub struct PgTicketRepository {
    pool: Arc<PgPool>,
}

impl PgTicketRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn save_ticket(&self, new_ticket: NewTicket) -> Result<Ticket, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO ticket (parking_number, vehicle_reg_number, price, in_time, out_time, discount)
            VALUES ($1, $2, 0, $3, NULL, $4)
            RETURNING id
            "#,
        )
        .bind(new_ticket.parking_spot.number())
        .bind(&new_ticket.vehicle_reg_number)
        .bind(new_ticket.in_time)
        .bind(new_ticket.discount)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(new_ticket.into_ticket(id))
    }

    async fn get_ticket(&self, vehicle_reg_number: &str) -> Result<Option<Ticket>, AppError> {
        let query = format!(
            "{SELECT_TICKET} ORDER BY (t.out_time IS NULL) DESC, t.in_time DESC, t.id DESC LIMIT 1"
        );

        let row = sqlx::query_as::<_, TicketRow>(&query)
            .bind(vehicle_reg_number)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Ticket::try_from).transpose()
    }

    async fn update_ticket(&self, ticket: &Ticket) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE ticket
            SET price = $1, out_time = $2, discount = $3
            WHERE id = $4
            "#,
        )
        .bind(ticket.price)
        .bind(ticket.out_time)
        .bind(ticket.discount)
        .bind(ticket.id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_nb_ticket(&self, vehicle_reg_number: &str) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ticket WHERE vehicle_reg_number = $1")
                .bind(vehicle_reg_number)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn list_by_vehicle(&self, vehicle_reg_number: &str) -> Result<Vec<Ticket>, AppError> {
        let query = format!("{SELECT_TICKET} ORDER BY t.in_time DESC, t.id DESC");

        let rows = sqlx::query_as::<_, TicketRow>(&query)
            .bind(vehicle_reg_number)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Ticket::try_from).collect()
    }
}
