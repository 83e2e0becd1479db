use super::{DEBOUNCE_TICKS, DebounceState, FlightPhase, PhaseInputs, evaluate};
use crate::aircraft::snapshot::AircraftSnapshot;
use crate::aircraft::FlightPlan;

fn inputs(snap: &AircraftSnapshot) -> PhaseInputs {
    PhaseInputs { snapshot: snap, deboarding_complete: false, new_flight_plan: false }
}

fn with_plan(mut snap: AircraftSnapshot) -> AircraftSnapshot {
    snap.flight_plan = Some(FlightPlan::test_plan("LH39", 150, 5000.0));
    snap
}

fn airborne_state() -> DebounceState {
    let mut deb = DebounceState::default();
    let mut snap = AircraftSnapshot::default();
    snap.on_ground = false;
    for _ in 0..DEBOUNCE_TICKS {
        evaluate(&inputs(&snap), FlightPhase::Flight, &mut deb);
    }
    deb
}

#[test]
fn test_no_flight_plan_stays_preflight() {
    let snap = AircraftSnapshot::default();
    let mut deb = DebounceState::default();
    for _ in 0..500 {
        let (phase, transitioned) = evaluate(&inputs(&snap), FlightPhase::Preflight, &mut deb);
        assert_eq!(phase, FlightPhase::Preflight);
        assert!(!transitioned);
    }
}

#[test]
fn test_plan_import_enters_departure() {
    let snap = with_plan(AircraftSnapshot::default());
    let mut deb = DebounceState::default();
    let (phase, transitioned) = evaluate(&inputs(&snap), FlightPhase::Preflight, &mut deb);
    assert_eq!(phase, FlightPhase::Departure);
    assert!(transitioned);
}

#[test]
fn test_equipment_connected_blocks_taxi_out() {
    // Brake released and beacon on, but the GPU is still attached.
    let mut snap = with_plan(AircraftSnapshot::default());
    snap.parking_brake_set = false;
    snap.beacon_on = true;
    let mut deb = DebounceState::default();
    for _ in 0..100 {
        let (phase, _) = evaluate(&inputs(&snap), FlightPhase::Departure, &mut deb);
        assert_eq!(phase, FlightPhase::Departure);
    }
}

#[test]
fn test_departure_to_taxi_out() {
    let mut snap = with_plan(AircraftSnapshot::default());
    snap.equipment = Default::default();
    snap.parking_brake_set = false;
    snap.beacon_on = true;
    let mut deb = DebounceState::default();
    let (phase, _) = evaluate(&inputs(&snap), FlightPhase::Departure, &mut deb);
    assert_eq!(phase, FlightPhase::TaxiOut);
}

#[test]
fn test_airborne_debounce() {
    let mut snap = with_plan(AircraftSnapshot::default());
    snap.equipment = Default::default();
    snap.parking_brake_set = false;
    snap.beacon_on = true;
    snap.on_ground = false;
    let mut deb = DebounceState::default();
    let mut phase = FlightPhase::TaxiOut;
    for tick in 1..=DEBOUNCE_TICKS {
        let (new, transitioned) = evaluate(&inputs(&snap), phase, &mut deb);
        phase = new;
        if tick < DEBOUNCE_TICKS {
            assert_eq!(phase, FlightPhase::TaxiOut, "transitioned after {tick} ticks");
        } else {
            assert!(transitioned);
            assert_eq!(phase, FlightPhase::Flight);
        }
    }
}

#[test]
fn test_flight_to_taxi_in_needs_ground_debounce() {
    let mut deb = airborne_state();
    let mut snap = with_plan(AircraftSnapshot::default());
    snap.equipment = Default::default();
    snap.parking_brake_set = false;
    snap.beacon_on = true;
    snap.on_ground = true;
    snap.engines_running = true;
    let mut phase = FlightPhase::Flight;
    for tick in 1..=DEBOUNCE_TICKS {
        let (new, _) = evaluate(&inputs(&snap), phase, &mut deb);
        phase = new;
        if tick < DEBOUNCE_TICKS {
            assert_eq!(phase, FlightPhase::Flight, "transitioned after {tick} ticks");
        }
    }
    assert_eq!(phase, FlightPhase::TaxiIn);
}

#[test]
fn test_taxi_in_to_arrival() {
    // Scenario: beacon off, engines off, parking brake set while taxiing in.
    let mut deb = airborne_state();
    let mut snap = with_plan(AircraftSnapshot::default());
    snap.equipment = Default::default();
    snap.beacon_on = false;
    snap.engines_running = false;
    snap.parking_brake_set = true;
    let (phase, transitioned) = evaluate(&inputs(&snap), FlightPhase::TaxiIn, &mut deb);
    assert_eq!(phase, FlightPhase::Arrival);
    assert!(transitioned);
}

#[test]
fn test_preflight_never_jumps_to_arrival_cold_and_dark() {
    // Engines off and brake set describe the gate too; without a prior
    // airborne observation that must not look like an arrival.
    let snap = AircraftSnapshot::default();
    let mut deb = DebounceState::default();
    let (phase, _) = evaluate(&inputs(&snap), FlightPhase::Preflight, &mut deb);
    assert_eq!(phase, FlightPhase::Preflight);
}

#[test]
fn test_arrival_to_turnaround_on_deboarding_complete() {
    let snap = with_plan(AircraftSnapshot::default());
    let mut deb = airborne_state();
    let mut inp = inputs(&snap);
    let (phase, _) = evaluate(&inp, FlightPhase::Arrival, &mut deb);
    assert_eq!(phase, FlightPhase::Arrival);
    inp.deboarding_complete = true;
    let (phase, _) = evaluate(&inp, FlightPhase::Arrival, &mut deb);
    assert_eq!(phase, FlightPhase::Turnaround);
}

#[test]
fn test_turnaround_needs_new_plan() {
    let snap = with_plan(AircraftSnapshot::default());
    let mut deb = DebounceState::default();
    // The old plan is still loaded; that must not restart the cycle.
    let (phase, _) = evaluate(&inputs(&snap), FlightPhase::Turnaround, &mut deb);
    assert_eq!(phase, FlightPhase::Turnaround);
    let mut inp = inputs(&snap);
    inp.new_flight_plan = true;
    let (phase, transitioned) = evaluate(&inp, FlightPhase::Turnaround, &mut deb);
    assert_eq!(phase, FlightPhase::Departure);
    assert!(transitioned);
}

#[test]
fn test_out_of_order_jump_from_departure_to_flight() {
    // TaxiOut was never observed (e.g. process restart on the runway), but
    // the airborne signal is confirmed: jump straight to Flight.
    let mut snap = with_plan(AircraftSnapshot::default());
    snap.on_ground = false;
    snap.parking_brake_set = false;
    // Equipment flags stale-connected, so the TaxiOut rule cannot fire.
    let mut deb = DebounceState::default();
    let mut phase = FlightPhase::Departure;
    for _ in 0..DEBOUNCE_TICKS {
        let (new, _) = evaluate(&inputs(&snap), phase, &mut deb);
        phase = new;
    }
    assert_eq!(phase, FlightPhase::Flight);
}

#[test]
fn test_new_plan_in_flight_does_not_restart_cycle() {
    let mut snap = with_plan(AircraftSnapshot::default());
    snap.on_ground = false;
    let mut deb = airborne_state();
    let mut inp = inputs(&snap);
    inp.new_flight_plan = true;
    let (phase, _) = evaluate(&inp, FlightPhase::Flight, &mut deb);
    assert_eq!(phase, FlightPhase::Flight);
}
