use super::flight_plan::FlightPlan;
use crate::signal_bus::{BusError, SignalBus, names};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Passenger-cabin door and cargo-door open flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoorStates {
    pub fwd_left_open: bool,
    pub aft_left_open: bool,
    pub cargo_fwd_open: bool,
    pub cargo_aft_open: bool,
}

/// Ground-equipment connection flags as the aircraft model sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquipmentStates {
    pub gpu_connected: bool,
    pub pca_connected: bool,
    pub chocks_set: bool,
    pub fuel_hose_connected: bool,
    pub jetway_connected: bool,
}

impl EquipmentStates {
    pub fn all_removed(&self) -> bool {
        !self.gpu_connected
            && !self.pca_connected
            && !self.chocks_set
            && !self.fuel_hose_connected
            && !self.jetway_connected
    }
}

/// Value snapshot of every externally observed signal, taken once per tick.
///
/// Coordinators read the snapshot of the tick they run in and never write to
/// it; the next tick gets a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftSnapshot {
    pub flight_plan: Option<FlightPlan>,
    pub fuel_on_board_kg: f64,
    pub fuel_capacity_kg: f64,
    pub pax_zones: [u32; 4],
    pub pax_seat_capacity: u32,
    pub cargo_fwd_pct: u8,
    pub cargo_aft_pct: u8,
    pub doors: DoorStates,
    pub equipment: EquipmentStates,
    pub engines_running: bool,
    pub beacon_on: bool,
    pub parking_brake_set: bool,
    pub on_ground: bool,
    pub apu_available: bool,
    pub apu_bleed_on: bool,
    pub timestamp: DateTime<Utc>,
}

impl AircraftSnapshot {
    pub fn pax_total(&self) -> u32 { self.pax_zones.iter().sum() }

    pub fn cargo_loaded_pct(&self) -> u8 {
        ((u16::from(self.cargo_fwd_pct) + u16::from(self.cargo_aft_pct)) / 2) as u8
    }
}

/// Builds [`AircraftSnapshot`] values off the bus, one per tick.
pub struct SnapshotReader {
    bus: Arc<dyn SignalBus>,
}

impl SnapshotReader {
    const POLLED_NAMES: &'static [&'static str] = &[
        names::aircraft::FLIGHT_NUMBER,
        names::aircraft::FLIGHT_PLAN_LOADED,
        names::aircraft::FLIGHT_PLAN_RELOAD_COUNT,
        names::aircraft::PLANNED_PAX,
        names::aircraft::PLANNED_FUEL_KG,
        names::aircraft::PLANNED_CARGO_KG,
        names::aircraft::FUEL_ON_BOARD_KG,
        names::aircraft::FUEL_CAPACITY_KG,
        names::aircraft::PAX_ZONE_A,
        names::aircraft::PAX_ZONE_B,
        names::aircraft::PAX_ZONE_C,
        names::aircraft::PAX_ZONE_D,
        names::aircraft::PAX_SEAT_CAPACITY,
        names::aircraft::CARGO_FWD_PCT,
        names::aircraft::CARGO_AFT_PCT,
        names::aircraft::DOOR_FWD_LEFT,
        names::aircraft::DOOR_AFT_LEFT,
        names::aircraft::DOOR_CARGO_FWD,
        names::aircraft::DOOR_CARGO_AFT,
        names::aircraft::EQUIP_GPU,
        names::aircraft::EQUIP_PCA,
        names::aircraft::EQUIP_CHOCKS,
        names::aircraft::EQUIP_FUEL_HOSE,
        names::ground::JETWAY_CONNECTED,
        names::aircraft::ENGINES_RUNNING,
        names::aircraft::BEACON_ON,
        names::aircraft::PARKING_BRAKE,
        names::aircraft::ON_GROUND,
        names::aircraft::APU_AVAILABLE,
        names::aircraft::APU_BLEED_ON,
    ];

    pub fn new(bus: Arc<dyn SignalBus>) -> Self {
        for name in Self::POLLED_NAMES {
            bus.subscribe(name);
        }
        Self { bus }
    }

    /// One full poll. Fails as a whole on a dead bus so the caller sees a
    /// connectivity fault instead of a half-populated snapshot.
    pub fn read(&self) -> Result<AircraftSnapshot, BusError> {
        let bus = self.bus.as_ref();
        Ok(AircraftSnapshot {
            flight_plan: FlightPlan::read(bus)?,
            fuel_on_board_kg: bus.get_f64(names::aircraft::FUEL_ON_BOARD_KG)?,
            fuel_capacity_kg: bus.get_f64(names::aircraft::FUEL_CAPACITY_KG)?,
            pax_zones: [
                bus.get_f64(names::aircraft::PAX_ZONE_A)? as u32,
                bus.get_f64(names::aircraft::PAX_ZONE_B)? as u32,
                bus.get_f64(names::aircraft::PAX_ZONE_C)? as u32,
                bus.get_f64(names::aircraft::PAX_ZONE_D)? as u32,
            ],
            pax_seat_capacity: bus.get_f64(names::aircraft::PAX_SEAT_CAPACITY)? as u32,
            cargo_fwd_pct: bus.get_f64(names::aircraft::CARGO_FWD_PCT)? as u8,
            cargo_aft_pct: bus.get_f64(names::aircraft::CARGO_AFT_PCT)? as u8,
            doors: DoorStates {
                fwd_left_open: bus.get_bool(names::aircraft::DOOR_FWD_LEFT)?,
                aft_left_open: bus.get_bool(names::aircraft::DOOR_AFT_LEFT)?,
                cargo_fwd_open: bus.get_bool(names::aircraft::DOOR_CARGO_FWD)?,
                cargo_aft_open: bus.get_bool(names::aircraft::DOOR_CARGO_AFT)?,
            },
            equipment: EquipmentStates {
                gpu_connected: bus.get_bool(names::aircraft::EQUIP_GPU)?,
                pca_connected: bus.get_bool(names::aircraft::EQUIP_PCA)?,
                chocks_set: bus.get_bool(names::aircraft::EQUIP_CHOCKS)?,
                fuel_hose_connected: bus.get_bool(names::aircraft::EQUIP_FUEL_HOSE)?,
                jetway_connected: bus.get_bool(names::ground::JETWAY_CONNECTED)?,
            },
            engines_running: bus.get_bool(names::aircraft::ENGINES_RUNNING)?,
            beacon_on: bus.get_bool(names::aircraft::BEACON_ON)?,
            parking_brake_set: bus.get_bool(names::aircraft::PARKING_BRAKE)?,
            on_ground: bus.get_bool(names::aircraft::ON_GROUND)?,
            apu_available: bus.get_bool(names::aircraft::APU_AVAILABLE)?,
            apu_bleed_on: bus.get_bool(names::aircraft::APU_BLEED_ON)?,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
impl Default for AircraftSnapshot {
    /// Cold-and-dark at the gate: equipment connected, brake set, no plan.
    fn default() -> Self {
        AircraftSnapshot {
            flight_plan: None,
            fuel_on_board_kg: 2650.0,
            fuel_capacity_kg: 19046.0,
            pax_zones: [0; 4],
            pax_seat_capacity: 174,
            cargo_fwd_pct: 0,
            cargo_aft_pct: 0,
            doors: DoorStates::default(),
            equipment: EquipmentStates {
                gpu_connected: true,
                pca_connected: true,
                chocks_set: true,
                fuel_hose_connected: false,
                jetway_connected: true,
            },
            engines_running: false,
            beacon_on: false,
            parking_brake_set: true,
            on_ground: true,
            apu_available: false,
            apu_bleed_on: false,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_bus::{InMemoryBus, SignalValue};

    #[test]
    fn test_read_defaults_after_subscribe() {
        let bus = Arc::new(InMemoryBus::new());
        let reader = SnapshotReader::new(bus.clone());
        let snap = reader.read().unwrap();
        assert!(snap.flight_plan.is_none());
        assert!(!snap.on_ground);
        assert_eq!(snap.pax_total(), 0);
    }

    #[test]
    fn test_read_reflects_bus_values() {
        let bus = Arc::new(InMemoryBus::new());
        let reader = SnapshotReader::new(bus.clone());
        bus.feed(names::aircraft::FLIGHT_PLAN_LOADED, SignalValue::from(true));
        bus.feed(names::aircraft::FLIGHT_NUMBER, SignalValue::from("LH 039"));
        bus.feed(names::aircraft::PLANNED_PAX, SignalValue::Number(150.0));
        bus.feed(names::aircraft::PAX_ZONE_A, SignalValue::Number(20.0));
        bus.feed(names::aircraft::PAX_ZONE_C, SignalValue::Number(30.0));
        bus.feed(names::aircraft::CARGO_FWD_PCT, SignalValue::Number(40.0));
        bus.feed(names::aircraft::CARGO_AFT_PCT, SignalValue::Number(60.0));
        bus.feed(names::aircraft::EQUIP_GPU, SignalValue::from(true));

        let snap = reader.read().unwrap();
        let plan = snap.flight_plan.as_ref().unwrap();
        assert_eq!(plan.number(), "LH39");
        assert_eq!(plan.planned_pax(), 150);
        assert_eq!(snap.pax_total(), 50);
        assert_eq!(snap.cargo_loaded_pct(), 50);
        assert!(!snap.equipment.all_removed());
    }

    #[test]
    fn test_read_fails_whole_on_disconnect() {
        let bus = Arc::new(InMemoryBus::new());
        let reader = SnapshotReader::new(bus.clone());
        bus.set_connected(false);
        assert!(reader.read().is_err());
    }
}
