use super::{Orchestrator, ServiceCommand, Supervisor};
use crate::aircraft::SnapshotReader;
use crate::aircraft::snapshot::AircraftSnapshot;
use crate::config::AutomationConfig;
use crate::events::{CoreEvent, EventBus};
use crate::http_handler::http_response::loadsheet::LoadsheetData;
use crate::http_handler::http_response::response_common::ResponseError;
use crate::phase::FlightPhase;
use crate::services::loadsheet::{LoadsheetTransport, LoadsheetType};
use crate::services::{ServiceKind, ServiceState};
use crate::signal_bus::{InMemoryBus, SignalBus, SignalValue, names};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const TICK: Duration = Duration::from_secs(1);

struct InstantTransport {
    generate_calls: AtomicU32,
}

impl InstantTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self { generate_calls: AtomicU32::new(0) })
    }

    fn generate_calls(&self) -> u32 { self.generate_calls.load(Ordering::Acquire) }
}

#[async_trait]
impl LoadsheetTransport for InstantTransport {
    async fn generate(&self, _loadsheet: LoadsheetType) -> Result<LoadsheetData, ResponseError> {
        self.generate_calls.fetch_add(1, Ordering::AcqRel);
        Ok(LoadsheetData::default())
    }

    async fn resend(&self) -> Result<(), ResponseError> { Ok(()) }
    async fn reset(&self) -> Result<(), ResponseError> { Ok(()) }
}

struct Harness {
    bus: Arc<InMemoryBus>,
    transport: Arc<InstantTransport>,
    supervisor: Supervisor,
    command_tx: mpsc::Sender<ServiceCommand>,
    events: EventBus,
}

impl Harness {
    fn new(config: AutomationConfig) -> Self {
        let bus = Arc::new(InMemoryBus::new());
        // Cold and dark at the gate.
        bus.feed(names::aircraft::FUEL_ON_BOARD_KG, SignalValue::Number(2650.0));
        bus.feed(names::aircraft::FUEL_CAPACITY_KG, SignalValue::Number(19046.0));
        bus.feed(names::aircraft::PAX_SEAT_CAPACITY, SignalValue::Number(174.0));
        bus.feed(names::aircraft::PARKING_BRAKE, SignalValue::from(true));
        bus.feed(names::aircraft::ON_GROUND, SignalValue::from(true));
        bus.feed(names::aircraft::EQUIP_GPU, SignalValue::from(true));
        bus.feed(names::aircraft::EQUIP_CHOCKS, SignalValue::from(true));
        bus.feed(names::ground::JETWAY_CONNECTED, SignalValue::from(true));

        let events = EventBus::new();
        let transport = InstantTransport::new();
        let reader = SnapshotReader::new(bus.clone());
        let orchestrator = Orchestrator::new(
            config.clone(),
            bus.clone(),
            events.clone(),
            transport.clone(),
            CancellationToken::new(),
        )
        .unwrap();
        let (command_tx, command_rx) = mpsc::channel(16);
        let supervisor =
            Supervisor::new(reader, orchestrator, events.clone(), command_rx, config.tick_interval);
        Self { bus, transport, supervisor, command_tx, events }
    }

    fn feed_bool(&self, name: &str, value: bool) {
        self.bus.feed(name, SignalValue::from(value));
    }

    fn feed_num(&self, name: &str, value: f64) {
        self.bus.feed(name, SignalValue::Number(value));
    }

    fn load_flight_plan(&self, number: &str, pax: f64, fuel_kg: f64) {
        self.feed_bool(names::aircraft::FLIGHT_PLAN_LOADED, true);
        self.bus.feed(names::aircraft::FLIGHT_NUMBER, SignalValue::from(number));
        self.feed_num(names::aircraft::PLANNED_PAX, pax);
        self.feed_num(names::aircraft::PLANNED_FUEL_KG, fuel_kg);
        self.feed_num(names::aircraft::PLANNED_CARGO_KG, 3400.0);
    }

    fn tick(&mut self) {
        self.supervisor.tick(TICK);
    }

    fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Lets spawned loadsheet tasks run to completion.
    async fn settle(&self) {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }
}

fn default_harness() -> Harness {
    Harness::new(AutomationConfig::default())
}

#[tokio::test]
async fn test_no_plan_no_services() {
    let mut h = default_harness();
    h.ticks(10);
    assert_eq!(h.supervisor.phase(), FlightPhase::Preflight);
    assert_eq!(h.bus.set_count(names::ground::CALL_REFUEL), 0);
    assert_eq!(h.transport.generate_calls(), 0);
}

#[tokio::test]
async fn test_plan_import_starts_departure_services() {
    let mut h = default_harness();
    let mut rx = h.events.subscribe();
    h.load_flight_plan("LH39", 150.0, 5000.0);
    h.tick();
    assert_eq!(h.supervisor.phase(), FlightPhase::Departure);
    assert_eq!(h.bus.set_count(names::ground::CALL_REFUEL), 1);
    assert_eq!(h.bus.set_count(names::ground::CALL_CATERING), 1);
    assert_eq!(h.bus.set_count(names::ground::CALL_CARGO_LOAD), 1);
    // Preliminary loadsheet request went out in the background.
    h.settle().await;
    h.tick();
    assert!(h.supervisor.orchestrator().preliminary_ok());
    assert_eq!(h.transport.generate_calls(), 1);

    let mut saw_plan_event = false;
    let mut saw_phase_event = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            CoreEvent::FlightPlanChanged { flight_number } => {
                assert_eq!(flight_number, "LH39");
                saw_plan_event = true;
            }
            CoreEvent::PhaseChanged { from, to } => {
                assert_eq!((from, to), (FlightPhase::Preflight, FlightPhase::Departure));
                saw_phase_event = true;
            }
            _ => {}
        }
    }
    assert!(saw_plan_event && saw_phase_event);
}

#[tokio::test]
async fn test_auto_refuel_runs_to_planned_fuel() {
    let mut h = default_harness();
    h.feed_num(names::aircraft::FUEL_ON_BOARD_KG, 0.0);
    h.load_flight_plan("LH39", 150.0, 5000.0);
    h.tick();
    // Add-on accepts and starts pumping; hose attached.
    h.feed_num(names::ground::REFUEL_STATE, ServiceState::Active.to_signal());
    h.feed_bool(names::aircraft::EQUIP_FUEL_HOSE, true);
    let mut ticks = 0;
    while h.supervisor.orchestrator().refueling_state() != ServiceState::Completed {
        h.tick();
        ticks += 1;
        assert!(ticks < 400, "refuel never completed");
    }
    assert_eq!(ticks, 179);
    assert_eq!(h.bus.get_f64(names::aircraft::FUEL_ON_BOARD_KG).unwrap(), 5000.0);
}

#[tokio::test]
async fn test_hose_disconnect_pauses_refuel() {
    let mut h = default_harness();
    h.load_flight_plan("LH39", 150.0, 5000.0);
    h.tick();
    h.feed_num(names::ground::REFUEL_STATE, ServiceState::Active.to_signal());
    h.feed_bool(names::aircraft::EQUIP_FUEL_HOSE, true);
    h.ticks(3);
    let pumped = h.bus.get_f64(names::aircraft::FUEL_ON_BOARD_KG).unwrap();
    h.feed_bool(names::aircraft::EQUIP_FUEL_HOSE, false);
    h.ticks(5);
    assert_eq!(h.supervisor.orchestrator().refueling_state(), ServiceState::Paused);
    assert_eq!(h.bus.get_f64(names::aircraft::FUEL_ON_BOARD_KG).unwrap(), pumped);
    h.feed_bool(names::aircraft::EQUIP_FUEL_HOSE, true);
    h.ticks(2);
    assert!(h.bus.get_f64(names::aircraft::FUEL_ON_BOARD_KG).unwrap() > pumped);
}

#[tokio::test]
async fn test_boarding_gated_on_refuel_and_catering() {
    let mut h = default_harness();
    // Tiny fuel delta so refuel completes in two ticks.
    h.load_flight_plan("LH39", 150.0, 2700.0);
    h.tick();
    h.feed_num(names::ground::REFUEL_STATE, ServiceState::Active.to_signal());
    h.feed_bool(names::aircraft::EQUIP_FUEL_HOSE, true);
    h.feed_num(names::ground::CATERING_STATE, ServiceState::Active.to_signal());
    h.ticks(2);
    assert_eq!(h.supervisor.orchestrator().refueling_state(), ServiceState::Completed);
    // Catering still active: boarding must wait.
    h.ticks(3);
    assert_eq!(h.bus.set_count(names::ground::CALL_BOARDING), 0);
    h.feed_num(names::ground::CATERING_STATE, ServiceState::Completed.to_signal());
    h.ticks(2);
    assert_eq!(h.bus.set_count(names::ground::CALL_BOARDING), 1);
    assert_eq!(h.supervisor.orchestrator().boarding_state(), ServiceState::Requested);
}

#[tokio::test]
async fn test_boarding_completion_writes_seat_map_and_final_loadsheet() {
    let mut h = default_harness();
    h.load_flight_plan("LH39", 150.0, 2700.0);
    h.tick();
    h.settle().await;
    h.feed_num(names::ground::REFUEL_STATE, ServiceState::Active.to_signal());
    h.feed_bool(names::aircraft::EQUIP_FUEL_HOSE, true);
    h.feed_num(names::ground::CATERING_STATE, ServiceState::Active.to_signal());
    h.ticks(2);
    h.feed_num(names::ground::CATERING_STATE, ServiceState::Completed.to_signal());
    h.ticks(2);
    // Add-on boards everyone and fills the holds.
    h.feed_num(names::ground::BOARDING_STATE, ServiceState::Active.to_signal());
    h.feed_num(names::ground::CARGO_LOAD_STATE, ServiceState::Active.to_signal());
    h.feed_num(names::ground::PAX_BOARDED, 150.0);
    h.feed_num(names::ground::CARGO_LOADED_PCT, 100.0);
    h.ticks(2);
    assert_eq!(h.supervisor.orchestrator().boarding_state(), ServiceState::Completed);
    let seat_map = h.bus.get(names::aircraft::PAX_SEAT_MAP).unwrap();
    assert_eq!(seat_map.as_text().chars().filter(|c| *c == '1').count(), 150);
    assert_eq!(seat_map.as_text().len(), 174);
    // Final loadsheet follows boarding + successful preliminary.
    h.settle().await;
    h.tick();
    assert!(h.supervisor.orchestrator().final_ok());
    assert_eq!(h.transport.generate_calls(), 2);
    // Equipment leaves once the final loadsheet is done.
    h.ticks(3);
    assert_eq!(h.bus.set_count(names::ground::REMOVE_ALL_EQUIPMENT), 1);
}

#[tokio::test]
async fn test_equipment_removal_is_not_configurable() {
    let config = AutomationConfig {
        auto_refuel: false,
        auto_boarding: false,
        auto_deboarding: false,
        call_catering: false,
        connect_pca: false,
        ..AutomationConfig::default()
    };
    let mut h = Harness::new(config);
    h.load_flight_plan("LH39", 150.0, 5000.0);
    h.tick();
    assert_eq!(h.supervisor.phase(), FlightPhase::Departure);
    assert_eq!(h.bus.set_count(names::ground::CALL_REFUEL), 0);
    // Crew signals readiness with the beacon; the stand clears regardless
    // of the disabled automation.
    h.feed_bool(names::aircraft::BEACON_ON, true);
    h.ticks(3);
    assert_eq!(h.bus.set_count(names::ground::REMOVE_ALL_EQUIPMENT), 1);
}

#[tokio::test]
async fn test_pca_removed_when_apu_carries_the_load() {
    let mut h = default_harness();
    h.feed_bool(names::aircraft::EQUIP_PCA, true);
    h.load_flight_plan("LH39", 150.0, 2700.0);
    h.tick();
    h.feed_num(names::ground::REFUEL_STATE, ServiceState::Active.to_signal());
    h.feed_bool(names::aircraft::EQUIP_FUEL_HOSE, true);
    h.feed_num(names::ground::CATERING_STATE, ServiceState::Active.to_signal());
    h.ticks(2);
    h.feed_num(names::ground::CATERING_STATE, ServiceState::Completed.to_signal());
    h.ticks(1);
    h.feed_num(names::ground::BOARDING_STATE, ServiceState::Active.to_signal());
    h.feed_num(names::ground::CARGO_LOAD_STATE, ServiceState::Active.to_signal());
    h.feed_num(names::ground::PAX_BOARDED, 150.0);
    h.feed_num(names::ground::CARGO_LOADED_PCT, 100.0);
    h.ticks(2);
    // Both services done, but APU bleed not on yet.
    assert_eq!(h.bus.set_count(names::ground::DISCONNECT_PCA), 0);
    h.feed_bool(names::aircraft::APU_AVAILABLE, true);
    h.feed_bool(names::aircraft::APU_BLEED_ON, true);
    h.ticks(2);
    assert_eq!(h.bus.set_count(names::ground::DISCONNECT_PCA), 1);
}

#[tokio::test]
async fn test_full_cycle_arrival_and_turnaround() {
    let mut h = default_harness();
    h.load_flight_plan("LH39", 150.0, 5000.0);
    h.tick();
    assert_eq!(h.supervisor.phase(), FlightPhase::Departure);

    // Stand cleared, brake off, beacon on: taxi out.
    h.feed_bool(names::aircraft::EQUIP_GPU, false);
    h.feed_bool(names::aircraft::EQUIP_CHOCKS, false);
    h.feed_bool(names::ground::JETWAY_CONNECTED, false);
    h.feed_bool(names::aircraft::PARKING_BRAKE, false);
    h.feed_bool(names::aircraft::BEACON_ON, true);
    h.feed_bool(names::aircraft::ENGINES_RUNNING, true);
    h.tick();
    assert_eq!(h.supervisor.phase(), FlightPhase::TaxiOut);

    h.feed_bool(names::aircraft::ON_GROUND, false);
    h.ticks(3);
    assert_eq!(h.supervisor.phase(), FlightPhase::Flight);

    // Landed with passengers and cargo aboard.
    h.feed_bool(names::aircraft::ON_GROUND, true);
    h.feed_num(names::aircraft::PAX_ZONE_A, 150.0);
    h.feed_num(names::aircraft::CARGO_FWD_PCT, 100.0);
    h.feed_num(names::aircraft::CARGO_AFT_PCT, 100.0);
    h.ticks(3);
    assert_eq!(h.supervisor.phase(), FlightPhase::TaxiIn);

    // Scenario: beacon off, engines off, parking brake set.
    h.feed_bool(names::aircraft::BEACON_ON, false);
    h.feed_bool(names::aircraft::ENGINES_RUNNING, false);
    h.feed_bool(names::aircraft::PARKING_BRAKE, true);
    h.tick();
    assert_eq!(h.supervisor.phase(), FlightPhase::Arrival);

    // Equipment connects exactly once, no matter how many ticks follow.
    h.ticks(5);
    assert_eq!(h.bus.set_count(names::ground::SET_CHOCKS), 1);
    assert_eq!(h.bus.set_count(names::ground::CONNECT_GPU), 1);
    assert_eq!(h.bus.set_count(names::ground::CONNECT_JETWAY), 1);
    assert_eq!(h.bus.set_count(names::ground::CONNECT_PCA), 1);

    // Jetway reports connected: door opens, deboarding called.
    h.feed_bool(names::ground::JETWAY_CONNECTED, true);
    h.ticks(2);
    assert!(h.bus.get_bool(names::aircraft::DOOR_FWD_LEFT).unwrap());
    assert_eq!(h.bus.set_count(names::ground::CALL_DEBOARDING), 1);

    // Cabin and holds empty out.
    h.feed_num(names::ground::DEBOARDING_STATE, ServiceState::Active.to_signal());
    h.tick();
    h.feed_num(names::aircraft::PAX_ZONE_A, 0.0);
    h.feed_num(names::aircraft::CARGO_FWD_PCT, 0.0);
    h.feed_num(names::aircraft::CARGO_AFT_PCT, 0.0);
    h.ticks(2);
    assert_eq!(h.supervisor.phase(), FlightPhase::Turnaround);

    // Next leg: new flight number restarts the cycle and the services.
    h.feed_num(names::ground::REFUEL_STATE, 0.0);
    h.feed_num(names::ground::DEBOARDING_STATE, 0.0);
    h.load_flight_plan("LH40", 140.0, 6000.0);
    h.tick();
    assert_eq!(h.supervisor.phase(), FlightPhase::Departure);
    assert_eq!(h.bus.set_count(names::ground::CALL_REFUEL), 2);
    // Loadsheet idempotence flags were cleared for the new leg.
    h.settle().await;
    h.tick();
    assert!(h.supervisor.orchestrator().preliminary_ok());
    assert!(h.transport.generate_calls() >= 2);
}

#[tokio::test]
async fn test_connectivity_fault_suspends_and_resumes() {
    let mut h = default_harness();
    h.load_flight_plan("LH39", 150.0, 5000.0);
    h.tick();
    assert_eq!(h.supervisor.phase(), FlightPhase::Departure);

    h.bus.set_connected(false);
    h.ticks(5);
    assert!(h.supervisor.orchestrator().is_suspended());
    // Phase held, no commands issued while blind.
    assert_eq!(h.supervisor.phase(), FlightPhase::Departure);
    let removal_before = h.bus.set_count(names::ground::REMOVE_ALL_EQUIPMENT);

    h.bus.set_connected(true);
    h.tick();
    assert!(!h.supervisor.orchestrator().is_suspended());
    assert_eq!(h.bus.set_count(names::ground::REMOVE_ALL_EQUIPMENT), removal_before);
}

#[tokio::test]
async fn test_command_rejected_in_wrong_phase() {
    let mut h = default_harness();
    h.load_flight_plan("LH39", 150.0, 5000.0);
    h.tick();
    // Deboarding makes no sense during departure.
    h.command_tx.try_send(ServiceCommand::Request(ServiceKind::Deboarding)).unwrap();
    h.tick();
    assert_eq!(h.bus.set_count(names::ground::CALL_DEBOARDING), 0);
    assert_eq!(h.supervisor.orchestrator().deboarding_state(), ServiceState::Inactive);
}

#[tokio::test]
async fn test_cancel_service_from_requested() {
    let mut h = default_harness();
    h.load_flight_plan("LH39", 150.0, 5000.0);
    h.tick();
    assert_eq!(h.supervisor.orchestrator().refueling_state(), ServiceState::Requested);
    h.command_tx.try_send(ServiceCommand::Cancel(ServiceKind::Refueling)).unwrap();
    h.tick();
    assert_eq!(h.supervisor.orchestrator().refueling_state(), ServiceState::Aborted);
    assert_eq!(h.bus.set_count(names::ground::CANCEL_SERVICE), 1);
    // A second cancel is rejected without side effects.
    h.command_tx.try_send(ServiceCommand::Cancel(ServiceKind::Refueling)).unwrap();
    h.tick();
    assert_eq!(h.bus.set_count(names::ground::CANCEL_SERVICE), 1);
}

#[tokio::test]
async fn test_request_service_direct_api() {
    let bus = Arc::new(InMemoryBus::new());
    let transport = InstantTransport::new();
    let mut orchestrator = Orchestrator::new(
        AutomationConfig::default(),
        bus.clone(),
        EventBus::new(),
        transport,
        CancellationToken::new(),
    )
    .unwrap();
    let snapshot = AircraftSnapshot::default();
    // No flight plan: refueling has no target to aim for.
    assert!(!orchestrator.request_service(ServiceKind::Refueling, &snapshot, FlightPhase::Departure));
    // Wrong phase.
    assert!(!orchestrator.request_service(ServiceKind::Boarding, &snapshot, FlightPhase::Flight));
    assert_eq!(bus.set_count(names::ground::CALL_BOARDING), 0);
}
