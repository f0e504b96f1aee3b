//! PostgreSQL implementation of parking spot repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{ParkingSpot, ParkingType};
use crate::domain::repositories::{ParkingSpotRepository, provision_range};
use crate::error::AppError;

/// Row of the `parking` table.
#[derive(Debug, FromRow)]
struct ParkingRow {
    parking_number: i32,
    available: bool,
    parking_type: String,
}

impl TryFrom<ParkingRow> for ParkingSpot {
    type Error = AppError;

    fn try_from(row: ParkingRow) -> Result<Self, Self::Error> {
        Ok(ParkingSpot::new(
            row.parking_number,
            row.parking_type.parse()?,
            row.available,
        ))
    }
}

/// PostgreSQL repository for parking spots.
pub struct PgParkingSpotRepository {
    pool: Arc<PgPool>,
}

impl PgParkingSpotRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParkingSpotRepository for PgParkingSpotRepository {
    async fn get_next_available_slot(
        &self,
        parking_type: ParkingType,
    ) -> Result<Option<i32>, AppError> {
        let number: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT MIN(parking_number)
            FROM parking
            WHERE type = $1 AND available = TRUE
            "#,
        )
        .bind(parking_type.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        debug!(%parking_type, ?number, "Next available spot");
        Ok(number)
    }

    async fn update_parking(&self, spot: &ParkingSpot) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE parking
            SET available = $1
            WHERE parking_number = $2
            "#,
        )
        .bind(spot.is_available())
        .bind(spot.number())
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_number(&self, number: i32) -> Result<Option<ParkingSpot>, AppError> {
        let row = sqlx::query_as::<_, ParkingRow>(
            r#"
            SELECT parking_number, available, type AS parking_type
            FROM parking
            WHERE parking_number = $1
            "#,
        )
        .bind(number)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ParkingSpot::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<ParkingSpot>, AppError> {
        let rows = sqlx::query_as::<_, ParkingRow>(
            r#"
            SELECT parking_number, available, type AS parking_type
            FROM parking
            ORDER BY parking_number
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(ParkingSpot::try_from).collect()
    }

    async fn provision(
        &self,
        parking_type: ParkingType,
        count: u32,
    ) -> Result<Vec<ParkingSpot>, AppError> {
        // Reject oversized batches before touching the database
        provision_range(0, count)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE parking IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let highest: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(parking_number), 0) FROM parking")
            .fetch_one(&mut *tx)
            .await?;

        let numbers = provision_range(highest, count)?;
        let mut spots = Vec::with_capacity(numbers.clone().count());
        for number in numbers {
            sqlx::query(
                r#"
                INSERT INTO parking (parking_number, available, type)
                VALUES ($1, TRUE, $2)
                "#,
            )
            .bind(number)
            .bind(parking_type.as_str())
            .execute(&mut *tx)
            .await?;

            spots.push(ParkingSpot::new(number, parking_type, true));
        }

        tx.commit().await?;

        Ok(spots)
    }
}
