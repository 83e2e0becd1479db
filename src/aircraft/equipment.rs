use crate::signal_bus::{BusError, SignalBus, SignalValue, names};
use crate::svc;
use std::sync::Arc;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Equipment {
    Gpu,
    Pca,
    Chocks,
    Jetway,
}

impl Equipment {
    fn command(self, connect: bool) -> &'static str {
        match (self, connect) {
            (Equipment::Gpu, true) => names::ground::CONNECT_GPU,
            (Equipment::Gpu, false) => names::ground::DISCONNECT_GPU,
            (Equipment::Pca, true) => names::ground::CONNECT_PCA,
            (Equipment::Pca, false) => names::ground::DISCONNECT_PCA,
            (Equipment::Chocks, true) => names::ground::SET_CHOCKS,
            (Equipment::Chocks, false) => names::ground::REMOVE_CHOCKS,
            (Equipment::Jetway, true) => names::ground::CONNECT_JETWAY,
            (Equipment::Jetway, false) => names::ground::DISCONNECT_JETWAY,
        }
    }
}

/// Ground-equipment command surface. The add-on executes the actual
/// animation and reports resulting connection state back through the
/// aircraft-side equipment flags.
pub struct EquipmentService {
    bus: Arc<dyn SignalBus>,
}

impl EquipmentService {
    pub fn new(bus: Arc<dyn SignalBus>) -> Self {
        Self { bus }
    }

    pub fn request(&self, equipment: Equipment, connect: bool) -> Result<(), BusError> {
        svc!("{} {}", equipment, if connect { "connect requested" } else { "disconnect requested" });
        self.bus.set(equipment.command(connect), SignalValue::from(true))
    }

    /// Single combined removal trigger used on departure. The add-on clears
    /// everything it still has attached, including the jetway.
    pub fn remove_all(&self) -> Result<(), BusError> {
        svc!("Removing all ground equipment and disconnecting jetway");
        self.bus.set(names::ground::REMOVE_ALL_EQUIPMENT, SignalValue::from(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_bus::InMemoryBus;

    #[test]
    fn test_request_writes_matching_command() {
        let bus = Arc::new(InMemoryBus::new());
        let equip = EquipmentService::new(bus.clone());
        equip.request(Equipment::Gpu, true).unwrap();
        equip.request(Equipment::Pca, false).unwrap();
        assert_eq!(bus.set_count(names::ground::CONNECT_GPU), 1);
        assert_eq!(bus.set_count(names::ground::DISCONNECT_PCA), 1);
        assert_eq!(bus.set_count(names::ground::CONNECT_PCA), 0);
    }

    #[test]
    fn test_remove_all() {
        let bus = Arc::new(InMemoryBus::new());
        let equip = EquipmentService::new(bus.clone());
        equip.remove_all().unwrap();
        assert_eq!(bus.set_count(names::ground::REMOVE_ALL_EQUIPMENT), 1);
    }
}
