//! In-memory implementation of parking spot repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::domain::entities::{ParkingSpot, ParkingType};
use crate::domain::repositories::{ParkingSpotRepository, provision_range};
use crate::error::AppError;

/// Spots keyed by number.
#[derive(Debug, Default)]
pub struct MemoryParkingSpotRepository {
    spots: RwLock<BTreeMap<i32, ParkingSpot>>,
}

impl MemoryParkingSpotRepository {
    /// Creates an empty lot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a lot with `cars` car spots numbered from 1, followed by
    /// `bikes` bike spots. All spots start available.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if either count exceeds
    /// [`crate::domain::repositories::MAX_PROVISION_BATCH`].
    pub fn with_layout(cars: u32, bikes: u32) -> Result<Self, AppError> {
        let repository = Self::new();
        repository.append(ParkingType::Car, cars)?;
        repository.append(ParkingType::Bike, bikes)?;
        Ok(repository)
    }

    /// Creates a lot holding exactly `spots`.
    pub fn with_spots(spots: impl IntoIterator<Item = ParkingSpot>) -> Self {
        let spots = spots.into_iter().map(|s| (s.number(), s)).collect();
        Self {
            spots: RwLock::new(spots),
        }
    }

    /// Current availability of a spot, if it exists.
    pub fn availability_of(&self, number: i32) -> Option<bool> {
        self.spots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&number)
            .map(ParkingSpot::is_available)
    }

    fn append(&self, parking_type: ParkingType, count: u32) -> Result<Vec<ParkingSpot>, AppError> {
        let mut spots = self.spots.write().unwrap_or_else(PoisonError::into_inner);
        let highest = spots.keys().next_back().copied().unwrap_or(0);

        let added = provision_range(highest, count)?
            .map(|number| {
                let spot = ParkingSpot::new(number, parking_type, true);
                spots.insert(number, spot.clone());
                spot
            })
            .collect();

        Ok(added)
    }
}

#[async_trait]
impl ParkingSpotRepository for MemoryParkingSpotRepository {
    async fn get_next_available_slot(
        &self,
        parking_type: ParkingType,
    ) -> Result<Option<i32>, AppError> {
        let number = self
            .spots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find(|s| s.parking_type() == parking_type && s.is_available())
            .map(ParkingSpot::number);

        debug!(%parking_type, ?number, "Next available spot");
        Ok(number)
    }

    async fn update_parking(&self, spot: &ParkingSpot) -> Result<bool, AppError> {
        let mut spots = self.spots.write().unwrap_or_else(PoisonError::into_inner);

        match spots.get_mut(&spot.number()) {
            Some(stored) => {
                *stored = stored.with_availability(spot.is_available());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_number(&self, number: i32) -> Result<Option<ParkingSpot>, AppError> {
        Ok(self
            .spots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&number)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<ParkingSpot>, AppError> {
        Ok(self
            .spots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect())
    }

    async fn provision(
        &self,
        parking_type: ParkingType,
        count: u32,
    ) -> Result<Vec<ParkingSpot>, AppError> {
        self.append(parking_type, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_layout_numbers_cars_first() {
        let repo = MemoryParkingSpotRepository::with_layout(3, 2).unwrap();
        let spots = repo.list().await.unwrap();

        let numbers: Vec<i32> = spots.iter().map(ParkingSpot::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(spots[2].parking_type(), ParkingType::Car);
        assert_eq!(spots[3].parking_type(), ParkingType::Bike);
    }

    #[tokio::test]
    async fn test_next_available_is_lowest_free_of_category() {
        let repo = MemoryParkingSpotRepository::with_layout(3, 2).unwrap();

        repo.update_parking(&ParkingSpot::new(1, ParkingType::Car, false))
            .await
            .unwrap();

        assert_eq!(
            repo.get_next_available_slot(ParkingType::Car).await.unwrap(),
            Some(2)
        );
        assert_eq!(
            repo.get_next_available_slot(ParkingType::Bike).await.unwrap(),
            Some(4)
        );
    }

    #[tokio::test]
    async fn test_next_available_none_when_full() {
        let repo = MemoryParkingSpotRepository::with_layout(0, 1).unwrap();

        repo.update_parking(&ParkingSpot::new(1, ParkingType::Bike, false))
            .await
            .unwrap();

        assert_eq!(
            repo.get_next_available_slot(ParkingType::Bike).await.unwrap(),
            None
        );
        assert_eq!(
            repo.get_next_available_slot(ParkingType::Car).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_update_keeps_stored_category() {
        let repo = MemoryParkingSpotRepository::with_layout(1, 0).unwrap();

        // The caller's category is ignored; only availability is written.
        let updated = repo
            .update_parking(&ParkingSpot::new(1, ParkingType::Bike, false))
            .await
            .unwrap();

        assert!(updated);
        let spot = repo.find_by_number(1).await.unwrap().unwrap();
        assert_eq!(spot.parking_type(), ParkingType::Car);
        assert!(!spot.is_available());
    }

    #[tokio::test]
    async fn test_update_unknown_spot() {
        let repo = MemoryParkingSpotRepository::new();
        let updated = repo
            .update_parking(&ParkingSpot::new(9, ParkingType::Car, true))
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_provision_appends_after_highest() {
        let repo = MemoryParkingSpotRepository::with_layout(2, 0).unwrap();
        let added = repo.provision(ParkingType::Bike, 2).await.unwrap();

        let numbers: Vec<i32> = added.iter().map(ParkingSpot::number).collect();
        assert_eq!(numbers, vec![3, 4]);
        assert_eq!(repo.availability_of(4), Some(true));
        assert_eq!(repo.availability_of(5), None);
    }

    #[tokio::test]
    async fn test_provision_rejects_oversized_batch() {
        let repo = MemoryParkingSpotRepository::with_layout(1, 0).unwrap();

        let result = repo.provision(ParkingType::Car, u32::MAX).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_provision_rejects_numbers_past_i32_max() {
        let repo = MemoryParkingSpotRepository::with_spots([ParkingSpot::new(
            i32::MAX,
            ParkingType::Car,
            true,
        )]);

        let result = repo.provision(ParkingType::Bike, 1).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[test]
    fn test_layout_rejects_oversized_counts() {
        assert!(MemoryParkingSpotRepository::with_layout(u32::MAX, 0).is_err());
    }
}
