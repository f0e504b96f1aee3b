//! Parking spot entity.

use super::ParkingType;
use serde::Serialize;

/// A single physical parking location.
///
/// The number and category are fixed once the spot is provisioned. Only the
/// availability flag changes afterwards, through the parking service's
/// reserve and release steps.
#[derive(Debug, Clone, Serialize)]
pub struct ParkingSpot {
    number: i32,
    parking_type: ParkingType,
    available: bool,
}

impl ParkingSpot {
    /// Creates a new ParkingSpot instance.
    pub fn new(number: i32, parking_type: ParkingType, available: bool) -> Self {
        Self {
            number,
            parking_type,
            available,
        }
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn parking_type(&self) -> ParkingType {
        self.parking_type
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Copy of this spot with the availability flag replaced.
    pub(crate) fn with_availability(&self, available: bool) -> Self {
        Self {
            available,
            ..self.clone()
        }
    }
}

/// Spots are identified by their number alone.
impl PartialEq for ParkingSpot {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for ParkingSpot {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_creation() {
        let spot = ParkingSpot::new(4, ParkingType::Bike, true);

        assert_eq!(spot.number(), 4);
        assert_eq!(spot.parking_type(), ParkingType::Bike);
        assert!(spot.is_available());
    }

    #[test]
    fn test_with_availability_keeps_identity() {
        let spot = ParkingSpot::new(1, ParkingType::Car, true);
        let reserved = spot.with_availability(false);

        assert!(!reserved.is_available());
        assert_eq!(reserved.parking_type(), ParkingType::Car);
        assert_eq!(reserved, spot);
    }

    #[test]
    fn test_equality_by_number() {
        let a = ParkingSpot::new(2, ParkingType::Car, true);
        let b = ParkingSpot::new(2, ParkingType::Car, false);
        let c = ParkingSpot::new(3, ParkingType::Car, true);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
