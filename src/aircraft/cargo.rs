use crate::signal_bus::{BusError, SignalBus, SignalValue, names};
use crate::warn;
use std::sync::Arc;

/// Cargo slice of the aircraft model. Load progress is expressed in percent
/// per hold; absolute weights only matter when validating a plan against
/// hold capacity.
pub struct CargoService {
    bus: Arc<dyn SignalBus>,
}

impl CargoService {
    pub fn new(bus: Arc<dyn SignalBus>) -> Self {
        Self { bus }
    }

    pub fn loaded_pct(&self) -> Result<u8, BusError> {
        let fwd = self.bus.get_f64(names::aircraft::CARGO_FWD_PCT)?;
        let aft = self.bus.get_f64(names::aircraft::CARGO_AFT_PCT)?;
        Ok(((fwd + aft) / 2.0) as u8)
    }

    pub fn hold_capacity_kg(&self) -> Result<f64, BusError> {
        self.bus.get_f64(names::aircraft::CARGO_CAPACITY_KG)
    }

    /// Validates a planned cargo weight against hold capacity, clamping with
    /// a warning rather than dropping the request.
    pub fn clamp_to_capacity(&self, planned_kg: f64) -> Result<f64, BusError> {
        let capacity = self.hold_capacity_kg()?;
        if capacity > 0.0 && planned_kg > capacity {
            warn!("Planned cargo {planned_kg:.0} kg exceeds hold capacity {capacity:.0} kg. Clamping.");
            return Ok(capacity);
        }
        Ok(planned_kg.max(0.0))
    }

    pub fn set_loaded_pct(&self, pct: u8) -> Result<(), BusError> {
        let pct = pct.min(100);
        self.bus.set(names::aircraft::CARGO_FWD_PCT, SignalValue::Number(f64::from(pct)))?;
        self.bus.set(names::aircraft::CARGO_AFT_PCT, SignalValue::Number(f64::from(pct)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_bus::InMemoryBus;

    #[test]
    fn test_clamp_to_capacity() {
        let bus = Arc::new(InMemoryBus::new());
        bus.feed(names::aircraft::CARGO_CAPACITY_KG, SignalValue::Number(9435.0));
        let cargo = CargoService::new(bus);
        assert_eq!(cargo.clamp_to_capacity(12_000.0).unwrap(), 9435.0);
        assert_eq!(cargo.clamp_to_capacity(3400.0).unwrap(), 3400.0);
        assert_eq!(cargo.clamp_to_capacity(-10.0).unwrap(), 0.0);
    }

    #[test]
    fn test_loaded_pct_averages_holds() {
        let bus = Arc::new(InMemoryBus::new());
        bus.feed(names::aircraft::CARGO_FWD_PCT, SignalValue::Number(100.0));
        bus.feed(names::aircraft::CARGO_AFT_PCT, SignalValue::Number(50.0));
        let cargo = CargoService::new(bus);
        assert_eq!(cargo.loaded_pct().unwrap(), 75);
    }
}
