use crate::signal_bus::{BusError, SignalBus, SignalValue, names};
use rand::Rng;
use rand::seq::index;
use std::sync::Arc;

/// Passenger slice of the aircraft model.
pub struct PaxService {
    bus: Arc<dyn SignalBus>,
}

impl PaxService {
    pub fn new(bus: Arc<dyn SignalBus>) -> Self {
        Self { bus }
    }

    pub fn pax_on_board(&self) -> Result<u32, BusError> {
        let zones = [
            names::aircraft::PAX_ZONE_A,
            names::aircraft::PAX_ZONE_B,
            names::aircraft::PAX_ZONE_C,
            names::aircraft::PAX_ZONE_D,
        ];
        let mut total = 0.0;
        for zone in zones {
            total += self.bus.get_f64(zone)?;
        }
        Ok(total as u32)
    }

    pub fn seat_capacity(&self) -> Result<u32, BusError> {
        Ok(self.bus.get_f64(names::aircraft::PAX_SEAT_CAPACITY)? as u32)
    }

    /// Writes a synthetic occupied-seat map for the given headcount into the
    /// aircraft model, encoded as a `0`/`1` string in seat order.
    ///
    /// Occupied seats are drawn uniformly over the cabin; only the count is
    /// deterministic. The rng comes from the caller so each call gets its own
    /// seeding.
    pub fn write_seat_map<R: Rng>(&self, occupied: u32, rng: &mut R) -> Result<(), BusError> {
        let capacity = self.seat_capacity()?;
        let map = seat_map(occupied as usize, capacity as usize, rng);
        let encoded: String = map.iter().map(|taken| if *taken { '1' } else { '0' }).collect();
        self.bus.set(names::aircraft::PAX_SEAT_MAP, SignalValue::Text(encoded))
    }
}

/// Uniformly random boolean seating map with exactly `occupied` taken seats.
pub fn seat_map<R: Rng>(occupied: usize, capacity: usize, rng: &mut R) -> Vec<bool> {
    let occupied = occupied.min(capacity);
    let mut map = vec![false; capacity];
    for idx in index::sample(rng, capacity, occupied) {
        map[idx] = true;
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_seat_map_exact_count() {
        let mut rng = StdRng::seed_from_u64(7);
        for occupied in [0usize, 1, 87, 174] {
            let map = seat_map(occupied, 174, &mut rng);
            assert_eq!(map.len(), 174);
            assert_eq!(map.iter().filter(|s| **s).count(), occupied);
        }
    }

    #[test]
    fn test_seat_map_clamps_overbooking() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = seat_map(200, 174, &mut rng);
        assert_eq!(map.iter().filter(|s| **s).count(), 174);
    }

    #[test]
    fn test_seat_map_positions_vary_by_seed() {
        let a = seat_map(87, 174, &mut StdRng::seed_from_u64(1));
        let b = seat_map(87, 174, &mut StdRng::seed_from_u64(2));
        // Same count, near-certainly different layout.
        assert_ne!(a, b);
        let a_again = seat_map(87, 174, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, a_again);
    }

    #[test]
    fn test_seat_map_layouts_spread_over_seeds() {
        use itertools::Itertools;
        let distinct = (0..16u64)
            .map(|seed| seat_map(87, 174, &mut StdRng::seed_from_u64(seed)))
            .unique()
            .count();
        assert!(distinct > 14, "only {distinct} distinct layouts over 16 seeds");
    }
}
