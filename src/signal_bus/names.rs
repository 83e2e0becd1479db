//! Variable names the bridge reads and writes.
//!
//! Aircraft-side names are owned by the aircraft-systems simulation, the
//! `ground` block by the ground-handling add-on. Both live in the same flat
//! namespace on the bus.

pub mod aircraft {
    pub const FLIGHT_NUMBER: &str = "aircraft.fms.flight_number";
    pub const FLIGHT_PLAN_LOADED: &str = "aircraft.fms.flight_plan_loaded";
    pub const FLIGHT_PLAN_RELOAD_COUNT: &str = "aircraft.fms.flight_plan_reload_count";
    pub const PLANNED_PAX: &str = "aircraft.fms.planned_pax";
    pub const PLANNED_FUEL_KG: &str = "aircraft.fms.planned_fuel_kg";
    pub const PLANNED_CARGO_KG: &str = "aircraft.fms.planned_cargo_kg";

    pub const FUEL_ON_BOARD_KG: &str = "aircraft.fuel.on_board_kg";
    pub const FUEL_CAPACITY_KG: &str = "aircraft.fuel.capacity_kg";
    pub const REFUEL_TARGET_KG: &str = "aircraft.fuel.refuel_target_kg";

    pub const PAX_ZONE_A: &str = "aircraft.pax.zone_a";
    pub const PAX_ZONE_B: &str = "aircraft.pax.zone_b";
    pub const PAX_ZONE_C: &str = "aircraft.pax.zone_c";
    pub const PAX_ZONE_D: &str = "aircraft.pax.zone_d";
    pub const PAX_SEAT_CAPACITY: &str = "aircraft.pax.seat_capacity";
    pub const PAX_SEAT_MAP: &str = "aircraft.pax.seat_map";

    pub const CARGO_FWD_PCT: &str = "aircraft.cargo.fwd_pct";
    pub const CARGO_AFT_PCT: &str = "aircraft.cargo.aft_pct";
    pub const CARGO_CAPACITY_KG: &str = "aircraft.cargo.capacity_kg";

    pub const DOOR_FWD_LEFT: &str = "aircraft.door.fwd_left";
    pub const DOOR_AFT_LEFT: &str = "aircraft.door.aft_left";
    pub const DOOR_CARGO_FWD: &str = "aircraft.door.cargo_fwd";
    pub const DOOR_CARGO_AFT: &str = "aircraft.door.cargo_aft";

    pub const EQUIP_GPU: &str = "aircraft.equipment.gpu_connected";
    pub const EQUIP_PCA: &str = "aircraft.equipment.pca_connected";
    pub const EQUIP_CHOCKS: &str = "aircraft.equipment.chocks_set";
    pub const EQUIP_FUEL_HOSE: &str = "aircraft.equipment.fuel_hose_connected";

    pub const ENGINES_RUNNING: &str = "aircraft.engines.any_running";
    pub const BEACON_ON: &str = "aircraft.lights.beacon";
    pub const PARKING_BRAKE: &str = "aircraft.brakes.parking_set";
    pub const ON_GROUND: &str = "aircraft.gear.on_ground";
    pub const APU_AVAILABLE: &str = "aircraft.apu.available";
    pub const APU_BLEED_ON: &str = "aircraft.apu.bleed_on";
}

pub mod ground {
    // Service-state signals reported by the add-on (numeric ServiceState).
    pub const REFUEL_STATE: &str = "ground.service.refuel.state";
    pub const BOARDING_STATE: &str = "ground.service.boarding.state";
    pub const DEBOARDING_STATE: &str = "ground.service.deboarding.state";
    pub const CARGO_LOAD_STATE: &str = "ground.service.cargo_load.state";
    pub const CARGO_UNLOAD_STATE: &str = "ground.service.cargo_unload.state";
    pub const CATERING_STATE: &str = "ground.service.catering.state";

    // Command variables; writing a nonzero value triggers the menu action.
    pub const CALL_REFUEL: &str = "ground.command.call_refuel";
    pub const CALL_BOARDING: &str = "ground.command.call_boarding";
    pub const CALL_DEBOARDING: &str = "ground.command.call_deboarding";
    pub const CALL_CARGO_LOAD: &str = "ground.command.call_cargo_load";
    pub const CALL_CARGO_UNLOAD: &str = "ground.command.call_cargo_unload";
    pub const CALL_CATERING: &str = "ground.command.call_catering";
    pub const CANCEL_SERVICE: &str = "ground.command.cancel_service";

    pub const CONNECT_JETWAY: &str = "ground.command.connect_jetway";
    pub const DISCONNECT_JETWAY: &str = "ground.command.disconnect_jetway";
    pub const CONNECT_GPU: &str = "ground.command.connect_gpu";
    pub const DISCONNECT_GPU: &str = "ground.command.disconnect_gpu";
    pub const CONNECT_PCA: &str = "ground.command.connect_pca";
    pub const DISCONNECT_PCA: &str = "ground.command.disconnect_pca";
    pub const SET_CHOCKS: &str = "ground.command.set_chocks";
    pub const REMOVE_CHOCKS: &str = "ground.command.remove_chocks";
    pub const REMOVE_ALL_EQUIPMENT: &str = "ground.command.remove_all_equipment";

    pub const JETWAY_CONNECTED: &str = "ground.jetway.connected";

    // Passenger flow reported by the add-on during (de)boarding.
    pub const PAX_BOARDED: &str = "ground.boarding.pax_on_board";
    pub const CARGO_LOADED_PCT: &str = "ground.boarding.cargo_loaded_pct";
}
