//! Repository trait for parking spot data access.

use crate::domain::entities::{ParkingSpot, ParkingType};
use crate::error::AppError;
use async_trait::async_trait;
use std::ops::RangeInclusive;

/// Largest number of spots one `provision` call may add.
pub const MAX_PROVISION_BATCH: u32 = 1_000;

/// Numbers of the `count` spots appended after `highest`.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if `count` exceeds
/// [`MAX_PROVISION_BATCH`] or the numbers would overflow `i32`.
pub fn provision_range(highest: i32, count: u32) -> Result<RangeInclusive<i32>, AppError> {
    if count > MAX_PROVISION_BATCH {
        return Err(AppError::InvalidInput(format!(
            "cannot provision more than {MAX_PROVISION_BATCH} spots at once, got {count}"
        )));
    }
    if count == 0 {
        return Ok(1..=0);
    }

    let last = i32::try_from(count)
        .ok()
        .and_then(|count| highest.checked_add(count))
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "spot numbers after {highest} would exceed {}",
                i32::MAX
            ))
        })?;

    Ok(highest + 1..=last)
}

/// Repository interface for parking spots.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgParkingSpotRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryParkingSpotRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParkingSpotRepository: Send + Sync {
    /// Returns the lowest-numbered available spot of the given category.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(number))` if a spot is free
    /// - `Ok(None)` if the category is full
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_next_available_slot(&self, parking_type: ParkingType)
    -> Result<Option<i32>, AppError>;

    /// Writes the availability flag of `spot`.
    ///
    /// Returns `Ok(false)` if no spot with that number exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn update_parking(&self, spot: &ParkingSpot) -> Result<bool, AppError>;

    /// Finds a spot by its number.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors and
    /// [`AppError::UnknownCategory`] if the stored category cannot be decoded.
    async fn find_by_number(&self, number: i32) -> Result<Option<ParkingSpot>, AppError>;

    /// Lists every spot ordered by number.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn list(&self) -> Result<Vec<ParkingSpot>, AppError>;

    /// Appends `count` available spots of a category after the highest
    /// existing number and returns them.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the batch is too large, see
    ///   [`provision_range`]
    /// - [`AppError::Storage`] on database errors
    async fn provision(
        &self,
        parking_type: ParkingType,
        count: u32,
    ) -> Result<Vec<ParkingSpot>, AppError>;
}
