use crate::config::FuelUnit;
use crate::signal_bus::{BusError, SignalBus, SignalValue, names};
use crate::warn;
use std::sync::Arc;

/// Fuel slice of the aircraft model.
///
/// The aircraft stores kilograms internally; this service is the only place
/// where the configured display unit is converted, so coordinators never mix
/// units.
pub struct FuelService {
    bus: Arc<dyn SignalBus>,
    unit: FuelUnit,
}

impl FuelService {
    pub fn new(bus: Arc<dyn SignalBus>, unit: FuelUnit) -> Self {
        Self { bus, unit }
    }

    pub fn unit(&self) -> FuelUnit { self.unit }

    pub fn fuel_on_board_kg(&self) -> Result<f64, BusError> {
        self.bus.get_f64(names::aircraft::FUEL_ON_BOARD_KG)
    }

    pub fn capacity_kg(&self) -> Result<f64, BusError> {
        self.bus.get_f64(names::aircraft::FUEL_CAPACITY_KG)
    }

    /// Refuel target as entered on the ground-service side, in the
    /// configured unit. Converted to kilograms here, nowhere else.
    pub fn refuel_target_kg(&self) -> Result<f64, BusError> {
        let raw = self.bus.get_f64(names::aircraft::REFUEL_TARGET_KG)?;
        Ok(self.unit.to_kg(raw))
    }

    /// Writes the new fuel-on-board figure into the aircraft model, clamped
    /// to tank capacity.
    pub fn set_fuel_on_board_kg(&self, amount_kg: f64) -> Result<(), BusError> {
        let capacity = self.capacity_kg()?;
        let clamped = if amount_kg > capacity {
            warn!("Fuel amount {amount_kg:.0} kg exceeds capacity {capacity:.0} kg. Clamping.");
            capacity
        } else {
            amount_kg.max(0.0)
        };
        self.bus.set(names::aircraft::FUEL_ON_BOARD_KG, SignalValue::Number(clamped))
    }
}
