use crate::signal_bus::{BusError, SignalBus, SignalValue, names};
use crate::svc;
use std::sync::Arc;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Door {
    ForwardLeft,
    AftLeft,
    CargoForward,
    CargoAft,
}

impl Door {
    fn variable(self) -> &'static str {
        match self {
            Door::ForwardLeft => names::aircraft::DOOR_FWD_LEFT,
            Door::AftLeft => names::aircraft::DOOR_AFT_LEFT,
            Door::CargoForward => names::aircraft::DOOR_CARGO_FWD,
            Door::CargoAft => names::aircraft::DOOR_CARGO_AFT,
        }
    }
}

/// Door slice of the aircraft model. Commands are idempotent; commanding a
/// door into the state it is already in writes nothing.
pub struct DoorService {
    bus: Arc<dyn SignalBus>,
}

impl DoorService {
    pub fn new(bus: Arc<dyn SignalBus>) -> Self {
        Self { bus }
    }

    pub fn is_open(&self, door: Door) -> Result<bool, BusError> {
        self.bus.get_bool(door.variable())
    }

    /// Returns whether a command was actually issued.
    pub fn set_open(&self, door: Door, open: bool) -> Result<bool, BusError> {
        if self.is_open(door)? == open {
            return Ok(false);
        }
        svc!("{} door {}", door, if open { "opening" } else { "closing" });
        self.bus.set(door.variable(), SignalValue::from(open))?;
        Ok(true)
    }
}
