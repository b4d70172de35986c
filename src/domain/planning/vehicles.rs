//! Threshold-based vehicle assignment.
//!
//! | guests | vehicle | count        | capacity |
//! |--------|---------|--------------|----------|
//! | 1-4    | sedan   | 1            | 4        |
//! | 5-8    | suv     | ceil(n / 6)  | 6        |
//! | 9+     | bus     | ceil(n / 15) | 15       |

use crate::domain::entities::VehicleType;

pub const SEDAN_CAPACITY: u32 = 4;
pub const SUV_CAPACITY: u32 = 6;
pub const BUS_CAPACITY: u32 = 15;

const SEDAN_MAX_GUESTS: usize = 4;
const SUV_MAX_GUESTS: usize = 8;

/// Vehicles chosen for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleAssignment {
    pub vehicle_type: VehicleType,
    pub vehicle_count: u32,
    pub vehicle_capacity: u32,
}

impl VehicleAssignment {
    pub fn total_seats(&self) -> u32 {
        self.vehicle_count * self.vehicle_capacity
    }
}

/// Picks vehicle type and count for `guest_count` passengers.
///
/// Returns `None` for an empty bucket. For any other count
/// `vehicle_count * vehicle_capacity >= guest_count`.
pub fn assign_vehicles(guest_count: usize) -> Option<VehicleAssignment> {
    let (vehicle_type, capacity) = match guest_count {
        0 => return None,
        1..=SEDAN_MAX_GUESTS => (VehicleType::Sedan, SEDAN_CAPACITY),
        n if n <= SUV_MAX_GUESTS => (VehicleType::Suv, SUV_CAPACITY),
        _ => (VehicleType::Bus, BUS_CAPACITY),
    };

    let count = (guest_count as u32).div_ceil(capacity);

    Some(VehicleAssignment {
        vehicle_type,
        vehicle_count: count,
        vehicle_capacity: capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(n: usize) -> (VehicleType, u32, u32) {
        let a = assign_vehicles(n).unwrap();
        (a.vehicle_type, a.vehicle_count, a.vehicle_capacity)
    }

    #[test]
    fn test_empty_bucket_has_no_vehicle() {
        assert!(assign_vehicles(0).is_none());
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(assignment(1), (VehicleType::Sedan, 1, 4));
        assert_eq!(assignment(4), (VehicleType::Sedan, 1, 4));
        assert_eq!(assignment(5), (VehicleType::Suv, 1, 6));
        assert_eq!(assignment(6), (VehicleType::Suv, 1, 6));
        assert_eq!(assignment(8), (VehicleType::Suv, 2, 6));
        assert_eq!(assignment(9), (VehicleType::Bus, 1, 15));
        assert_eq!(assignment(15), (VehicleType::Bus, 1, 15));
        assert_eq!(assignment(16), (VehicleType::Bus, 2, 15));
        assert_eq!(assignment(30), (VehicleType::Bus, 2, 15));
        assert_eq!(assignment(31), (VehicleType::Bus, 3, 15));
    }

    #[test]
    fn test_capacity_always_covers_guests() {
        for n in 1..=200 {
            let a = assign_vehicles(n).unwrap();
            assert!(
                a.total_seats() as usize >= n,
                "n={n} got {} seats",
                a.total_seats()
            );
        }
    }
}
