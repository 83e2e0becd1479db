use crate::aircraft::cargo::CargoService;
use crate::aircraft::doors::{Door, DoorService};
use crate::aircraft::equipment::EquipmentService;
use crate::aircraft::fuel::FuelService;
use crate::aircraft::pax::PaxService;
use crate::aircraft::snapshot::AircraftSnapshot;
use crate::aircraft::FlightPlan;
use crate::config::AutomationConfig;
use crate::events::{CoreEvent, EventBus};
use crate::phase::FlightPhase;
use crate::services::loadsheet::LoadsheetTransport;
use crate::services::{
    BoardingCoordinator, CargoCoordinator, CateringCoordinator, DeboardingCoordinator,
    GroundEquipmentCoordinator, LoadsheetCoordinator, LoadsheetResult, LoadsheetType,
    RefuelingCoordinator, ServiceKind, ServiceState,
};
use crate::signal_bus::{SignalBus, SignalValue, names};
use crate::{info, log, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio_util::sync::CancellationToken;

struct PendingLoadsheet {
    loadsheet: LoadsheetType,
    rx: oneshot::Receiver<LoadsheetResult>,
}

/// Translates `(phase, snapshot, configuration)` into ordered ground-service
/// commands and add-on state signals back into coordinator updates.
///
/// Everything here runs on the tick thread; the only async work is the
/// loadsheet transport, which is spawned off and polled through a oneshot.
pub struct Orchestrator {
    config: AutomationConfig,
    bus: Arc<dyn SignalBus>,
    events: EventBus,
    cancel: CancellationToken,

    fuel_service: FuelService,
    pax_service: PaxService,
    cargo_service: CargoService,
    door_service: DoorService,
    equipment_service: EquipmentService,

    refueling: RefuelingCoordinator,
    boarding: BoardingCoordinator,
    deboarding: DeboardingCoordinator,
    catering: CateringCoordinator,
    cargo: CargoCoordinator,
    equipment: GroundEquipmentCoordinator,
    loadsheet: Arc<LoadsheetCoordinator<dyn LoadsheetTransport>>,

    pending_loadsheet: Option<PendingLoadsheet>,
    last_signals: HashMap<ServiceKind, ServiceState>,
    preliminary_ok: bool,
    final_ok: bool,
    suspended: bool,
}

impl Orchestrator {
    pub fn new(
        config: AutomationConfig,
        bus: Arc<dyn SignalBus>,
        events: EventBus,
        transport: Arc<dyn LoadsheetTransport>,
        cancel: CancellationToken,
    ) -> Result<Self, String> {
        config.validate()?;
        for name in [
            names::ground::REFUEL_STATE,
            names::ground::BOARDING_STATE,
            names::ground::DEBOARDING_STATE,
            names::ground::CARGO_LOAD_STATE,
            names::ground::CARGO_UNLOAD_STATE,
            names::ground::CATERING_STATE,
            names::ground::PAX_BOARDED,
            names::ground::CARGO_LOADED_PCT,
        ] {
            bus.subscribe(name);
        }
        Ok(Self {
            fuel_service: FuelService::new(Arc::clone(&bus), config.unit),
            pax_service: PaxService::new(Arc::clone(&bus)),
            cargo_service: CargoService::new(Arc::clone(&bus)),
            door_service: DoorService::new(Arc::clone(&bus)),
            equipment_service: EquipmentService::new(Arc::clone(&bus)),
            refueling: RefuelingCoordinator::new(config.refuel_rate_kg_s),
            boarding: BoardingCoordinator::new(),
            deboarding: DeboardingCoordinator::new(),
            catering: CateringCoordinator::new(),
            cargo: CargoCoordinator::new(),
            equipment: GroundEquipmentCoordinator::new(),
            loadsheet: Arc::new(LoadsheetCoordinator::new(transport)),
            pending_loadsheet: None,
            last_signals: HashMap::new(),
            preliminary_ok: false,
            final_ok: false,
            suspended: false,
            config,
            bus,
            events,
            cancel,
        })
    }

    pub fn refueling_state(&self) -> ServiceState { self.refueling.state() }
    pub fn boarding_state(&self) -> ServiceState { self.boarding.state() }
    pub fn deboarding_state(&self) -> ServiceState { self.deboarding.state() }
    pub fn catering_state(&self) -> ServiceState { self.catering.state() }
    pub fn is_suspended(&self) -> bool { self.suspended }
    pub fn preliminary_ok(&self) -> bool { self.preliminary_ok }
    pub fn final_ok(&self) -> bool { self.final_ok }

    /// Connectivity fault: hold all service requests, keep state intact.
    pub fn suspend(&mut self) {
        if !self.suspended {
            self.suspended = true;
            log!("Orchestration suspended, waiting for connectivity");
        }
    }

    pub fn resume(&mut self) {
        if self.suspended {
            self.suspended = false;
            log!("Orchestration resumed");
        }
    }

    /// New flight plan: every service machine goes back to `Inactive`, the
    /// loadsheet idempotence flags clear, and the refuel session is rebuilt
    /// from the new figures.
    pub fn on_new_flight_plan(&mut self, plan: &FlightPlan, snapshot: &AircraftSnapshot) {
        self.refueling.reset();
        self.boarding.reset();
        self.deboarding.reset();
        self.catering.reset();
        self.cargo.reset();
        self.equipment.reset();
        self.pending_loadsheet = None;
        self.preliminary_ok = false;
        self.final_ok = false;
        self.loadsheet.reset_flags();
        let coordinator = Arc::clone(&self.loadsheet);
        tokio::spawn(async move {
            coordinator.reset_loadsheets().await;
        });

        self.refueling.prepare_session(
            plan.planned_fuel_kg(),
            snapshot.fuel_on_board_kg,
            snapshot.fuel_capacity_kg,
            self.config.unit,
        );
        self.boarding.set_planned_pax(plan.planned_pax());
        if let Ok(clamped) = self.cargo_service.clamp_to_capacity(plan.planned_cargo_kg()) {
            log!("Cargo plan {clamped:.0} kg accepted");
        }
        self.events.publish(CoreEvent::FlightPlanChanged {
            flight_number: String::from(plan.number()),
        });
    }

    /// Phase-entry actions.
    pub fn on_phase_changed(
        &mut self,
        from: FlightPhase,
        to: FlightPhase,
        snapshot: &AircraftSnapshot,
    ) {
        info!("Phase entry actions {from} -> {to}");
        if self.suspended {
            return;
        }
        match to {
            FlightPhase::Departure => self.enter_departure(snapshot),
            FlightPhase::Arrival => self.enter_arrival(snapshot),
            _ => {}
        }
    }

    fn enter_departure(&mut self, _snapshot: &AircraftSnapshot) {
        if self.config.auto_refuel && self.refueling.request() {
            self.call_ground(names::ground::CALL_REFUEL);
            self.publish_status(ServiceKind::Refueling, self.refueling.state());
        }
        if self.config.call_catering && self.catering.request() {
            self.call_ground(names::ground::CALL_CATERING);
            self.publish_status(ServiceKind::Catering, self.catering.state());
        }
        if self.config.auto_boarding && self.cargo.request_load() {
            self.call_ground(names::ground::CALL_CARGO_LOAD);
            self.publish_status(ServiceKind::CargoLoad, self.cargo.load_state());
        }
        if !self.loadsheet.generated(LoadsheetType::Preliminary) {
            self.spawn_loadsheet(LoadsheetType::Preliminary);
        }
    }

    fn enter_arrival(&mut self, _snapshot: &AircraftSnapshot) {
        match self.equipment.connect_arrival(&self.equipment_service, self.config.connect_pca) {
            Ok(true) => self.events.publish(CoreEvent::EquipmentStateChanged {
                equipment: "arrival set",
                connected: true,
            }),
            Ok(false) => {}
            Err(err) => warn!("Arrival equipment connect failed: {err}"),
        }
    }

    /// One orchestration pass; called every tick after phase evaluation.
    pub fn tick(
        &mut self,
        snapshot: &AircraftSnapshot,
        phase: FlightPhase,
        elapsed: std::time::Duration,
    ) {
        self.poll_pending_loadsheet();
        if self.suspended {
            return;
        }
        self.sync_service_signals();
        match phase {
            FlightPhase::Departure => self.departure_tick(snapshot, elapsed),
            FlightPhase::Arrival => self.arrival_tick(snapshot),
            _ => {}
        }
        self.sync_cargo_doors();
    }

    /// Add-on state signals are forwarded to the owning coordinator; the
    /// coordinators enforce transition legality themselves.
    pub fn on_service_signal(&mut self, service: ServiceKind, reported: ServiceState) {
        let changed = match service {
            ServiceKind::Refueling => match reported {
                ServiceState::Active => self.refueling.start(),
                ServiceState::Paused => {
                    self.refueling.pause();
                    false
                }
                ServiceState::Aborted => self.refueling.stop(),
                _ => false,
            },
            ServiceKind::Boarding => match reported {
                ServiceState::Active => self.boarding.start(),
                ServiceState::Aborted => self.boarding.stop(),
                _ => false,
            },
            ServiceKind::Deboarding => match reported {
                ServiceState::Active => self.deboarding.start(),
                ServiceState::Aborted => self.deboarding.stop(),
                _ => false,
            },
            ServiceKind::CargoLoad => match reported {
                ServiceState::Active => self.cargo.start_load(),
                _ => false,
            },
            ServiceKind::CargoUnload => match reported {
                ServiceState::Active => self.cargo.start_unload(),
                _ => false,
            },
            ServiceKind::Catering => {
                let before = self.catering.state();
                self.catering.on_signal(reported);
                before != self.catering.state()
            }
        };
        if changed {
            self.publish_status(service, reported);
        }
    }

    /// User-triggered request. Permitted only in a phase where the service
    /// makes sense and only while no conflicting service is `Active`; a
    /// rejected request has no side effect.
    pub fn request_service(
        &mut self,
        service: ServiceKind,
        snapshot: &AircraftSnapshot,
        phase: FlightPhase,
    ) -> bool {
        if self.suspended || !Self::phase_permits(service, phase) {
            return false;
        }
        if self.has_conflicting_active(service) {
            log!("{service} rejected, conflicting service active");
            return false;
        }
        let accepted = match service {
            ServiceKind::Refueling => {
                if snapshot.flight_plan.is_none() {
                    false
                } else {
                    self.refueling.request() && self.call_ground(names::ground::CALL_REFUEL)
                }
            }
            ServiceKind::Boarding => {
                self.boarding.request() && self.call_ground(names::ground::CALL_BOARDING)
            }
            ServiceKind::Deboarding => {
                self.deboarding.request() && self.call_ground(names::ground::CALL_DEBOARDING)
            }
            ServiceKind::CargoLoad => {
                self.cargo.request_load() && self.call_ground(names::ground::CALL_CARGO_LOAD)
            }
            ServiceKind::CargoUnload => {
                self.cargo.request_unload() && self.call_ground(names::ground::CALL_CARGO_UNLOAD)
            }
            ServiceKind::Catering => {
                self.catering.request() && self.call_ground(names::ground::CALL_CATERING)
            }
        };
        if accepted {
            self.publish_status(service, ServiceState::Requested);
        }
        accepted
    }

    /// Valid only from `Requested` or `Active`.
    pub fn cancel_service(&mut self, service: ServiceKind) -> bool {
        let state = match service {
            ServiceKind::Refueling => self.refueling.state(),
            ServiceKind::Boarding => self.boarding.state(),
            ServiceKind::Deboarding => self.deboarding.state(),
            ServiceKind::CargoLoad => self.cargo.load_state(),
            ServiceKind::CargoUnload => self.cargo.unload_state(),
            ServiceKind::Catering => self.catering.state(),
        };
        if !matches!(state, ServiceState::Requested | ServiceState::Active) {
            return false;
        }
        let stopped = match service {
            ServiceKind::Refueling => self.refueling.stop(),
            ServiceKind::Boarding => self.boarding.stop(),
            ServiceKind::Deboarding => self.deboarding.stop(),
            ServiceKind::CargoLoad | ServiceKind::CargoUnload => self.cargo.stop(),
            ServiceKind::Catering => self.catering.stop(),
        };
        if stopped {
            self.call_ground(names::ground::CANCEL_SERVICE);
            self.publish_status(service, ServiceState::Aborted);
        }
        stopped
    }

    /// Forces a transport call to push the loadsheet to the MCDU again.
    pub fn resend_loadsheet(&self) {
        let coordinator = Arc::clone(&self.loadsheet);
        tokio::spawn(async move {
            coordinator.resend_loadsheet().await;
        });
    }

    fn phase_permits(service: ServiceKind, phase: FlightPhase) -> bool {
        match service {
            ServiceKind::Refueling
            | ServiceKind::Boarding
            | ServiceKind::CargoLoad
            | ServiceKind::Catering => phase == FlightPhase::Departure,
            ServiceKind::Deboarding | ServiceKind::CargoUnload => phase == FlightPhase::Arrival,
        }
    }

    fn has_conflicting_active(&self, service: ServiceKind) -> bool {
        let active = [
            (ServiceKind::Refueling, self.refueling.state()),
            (ServiceKind::Boarding, self.boarding.state()),
            (ServiceKind::Deboarding, self.deboarding.state()),
            (ServiceKind::CargoLoad, self.cargo.load_state()),
            (ServiceKind::CargoUnload, self.cargo.unload_state()),
            (ServiceKind::Catering, self.catering.state()),
        ];
        active
            .iter()
            .any(|(kind, state)| *state == ServiceState::Active && service.conflicts_with(*kind))
    }

    fn departure_tick(&mut self, snapshot: &AircraftSnapshot, elapsed: std::time::Duration) {
        self.refueling.on_hose_signal(snapshot.equipment.fuel_hose_connected);
        if self.refueling.state() == ServiceState::Active {
            let completed = self.refueling.process(elapsed);
            if let Some(session) = self.refueling.session() {
                if let Err(err) = self.fuel_service.set_fuel_on_board_kg(session.current_kg()) {
                    warn!("Fuel reconciliation failed: {err}");
                }
                self.events.publish(CoreEvent::FuelStateChanged {
                    on_board_kg: session.current_kg(),
                    target_kg: session.target_kg(),
                });
            }
            if completed {
                self.publish_status(ServiceKind::Refueling, ServiceState::Completed);
            }
        }

        let pax = self.ground_f64(names::ground::PAX_BOARDED) as u32;
        let cargo_pct = self.ground_f64(names::ground::CARGO_LOADED_PCT) as u8;
        let cargo_was_complete = self.cargo.load_state() == ServiceState::Completed;
        if self.cargo.process_load(cargo_pct) && !cargo_was_complete {
            self.events.publish(CoreEvent::CargoStateChanged { loaded_pct: cargo_pct });
        }

        if self.boarding.state() == ServiceState::Active && self.boarding.process(pax, cargo_pct) {
            let mut rng = rand::rng();
            if let Err(err) = self.pax_service.write_seat_map(pax, &mut rng) {
                warn!("Seat map write failed: {err}");
            }
            self.publish_status(ServiceKind::Boarding, ServiceState::Completed);
        }

        // Boarding waits for fuel and (when enabled) catering.
        if self.config.auto_boarding
            && self.boarding.state() == ServiceState::Inactive
            && snapshot.flight_plan.is_some()
            && self.departure_prerequisites_met()
            && self.boarding.request()
        {
            self.call_ground(names::ground::CALL_BOARDING);
            self.publish_status(ServiceKind::Boarding, ServiceState::Requested);
        }

        // Final loadsheet waits for boarding and a successful preliminary.
        if self.boarding.state() == ServiceState::Completed
            && self.preliminary_ok
            && !self.final_ok
            && !self.loadsheet.generated(LoadsheetType::Final)
            && self.pending_loadsheet.is_none()
        {
            self.spawn_loadsheet(LoadsheetType::Final);
        }

        match self.equipment.maybe_remove_pca(
            &self.equipment_service,
            snapshot,
            self.refueling.state() == ServiceState::Completed,
            self.boarding.state() == ServiceState::Completed,
        ) {
            Ok(true) => self.events.publish(CoreEvent::EquipmentStateChanged {
                equipment: "pca",
                connected: false,
            }),
            Ok(false) => {}
            Err(err) => warn!("PCA removal failed: {err}"),
        }

        // Departure-readiness equipment removal. Not configurable: the
        // beacon coming on or a finished final loadsheet always clears the
        // stand, even with every automation toggle off.
        if self.final_ok || snapshot.beacon_on {
            match self.equipment.remove_for_departure(&self.equipment_service) {
                Ok(true) => self.events.publish(CoreEvent::EquipmentStateChanged {
                    equipment: "all",
                    connected: false,
                }),
                Ok(false) => {}
                Err(err) => warn!("Equipment removal failed: {err}"),
            }
        }
    }

    fn arrival_tick(&mut self, snapshot: &AircraftSnapshot) {
        // Covers a suspended or jumped phase entry; guarded to once.
        if let Err(err) =
            self.equipment.connect_arrival(&self.equipment_service, self.config.connect_pca)
        {
            warn!("Arrival equipment connect failed: {err}");
        }

        if snapshot.equipment.jetway_connected {
            match self.door_service.set_open(Door::ForwardLeft, true) {
                Ok(true) => self.events.publish(CoreEvent::DoorStateChanged {
                    door: "fwd_left",
                    open: true,
                }),
                Ok(false) => {}
                Err(err) => warn!("Door open failed: {err}"),
            }
        }

        if self.config.auto_deboarding
            && snapshot.equipment.jetway_connected
            && self.deboarding.state() == ServiceState::Inactive
            && self.deboarding.request()
        {
            self.call_ground(names::ground::CALL_DEBOARDING);
            self.publish_status(ServiceKind::Deboarding, ServiceState::Requested);
        }
        if self.config.auto_deboarding && self.cargo.request_unload() {
            self.call_ground(names::ground::CALL_CARGO_UNLOAD);
            self.publish_status(ServiceKind::CargoUnload, ServiceState::Requested);
        }

        if self.deboarding.state() == ServiceState::Active
            && self.deboarding.process(snapshot.pax_total(), snapshot.cargo_loaded_pct())
        {
            self.publish_status(ServiceKind::Deboarding, ServiceState::Completed);
        }
        self.cargo.process_unload(snapshot.cargo_loaded_pct());
    }

    fn departure_prerequisites_met(&self) -> bool {
        let refuel_done = match self.refueling.state() {
            ServiceState::Completed => true,
            ServiceState::Inactive => !self.config.auto_refuel,
            _ => false,
        };
        let catering_done = match self.catering.state() {
            ServiceState::Completed => true,
            ServiceState::Inactive => !self.config.call_catering,
            _ => false,
        };
        refuel_done && catering_done
    }

    /// Forwards add-on state signals to the owning coordinators, edge-
    /// triggered: only a changed value is forwarded, so a stale signal
    /// cannot re-drive a machine every tick.
    fn sync_service_signals(&mut self) {
        let signals = [
            (ServiceKind::Refueling, names::ground::REFUEL_STATE),
            (ServiceKind::Boarding, names::ground::BOARDING_STATE),
            (ServiceKind::Deboarding, names::ground::DEBOARDING_STATE),
            (ServiceKind::CargoLoad, names::ground::CARGO_LOAD_STATE),
            (ServiceKind::CargoUnload, names::ground::CARGO_UNLOAD_STATE),
            (ServiceKind::Catering, names::ground::CATERING_STATE),
        ];
        for (service, name) in signals {
            if let Ok(raw) = self.bus.get_f64(name) {
                let reported = ServiceState::from_signal(raw);
                if self.last_signals.insert(service, reported) != Some(reported) {
                    self.on_service_signal(service, reported);
                }
            }
        }
    }

    fn sync_cargo_doors(&mut self) {
        let open = self.cargo.doors_should_be_open();
        for door in [Door::CargoForward, Door::CargoAft] {
            match self.door_service.set_open(door, open) {
                Ok(true) => self.events.publish(CoreEvent::DoorStateChanged {
                    door: if door == Door::CargoForward { "cargo_fwd" } else { "cargo_aft" },
                    open,
                }),
                Ok(false) => {}
                Err(err) => warn!("Cargo door command failed: {err}"),
            }
        }
    }

    fn spawn_loadsheet(&mut self, loadsheet: LoadsheetType) {
        let coordinator = Arc::clone(&self.loadsheet);
        let max_retries = self.config.loadsheet_max_retries;
        let cancel = self.cancel.child_token();
        let (tx, rx) = oneshot::channel();
        info!("Requesting {loadsheet} loadsheet");
        tokio::spawn(async move {
            let result =
                coordinator.generate_loadsheet(loadsheet, max_retries, false, &cancel).await;
            let _ = tx.send(result);
        });
        self.pending_loadsheet = Some(PendingLoadsheet { loadsheet, rx });
    }

    /// Non-blocking check on the in-flight loadsheet request. A finished
    /// final loadsheet closes the forward-left door; the command is safe if
    /// the add-on already closed it.
    fn poll_pending_loadsheet(&mut self) {
        let Some(pending) = &mut self.pending_loadsheet else {
            return;
        };
        let loadsheet = pending.loadsheet;
        match pending.rx.try_recv() {
            Ok(result) => {
                self.pending_loadsheet = None;
                self.events.publish(CoreEvent::LoadsheetCompleted {
                    loadsheet,
                    success: result.success(),
                });
                if !result.success() {
                    warn!(
                        "{loadsheet} loadsheet failed: {}",
                        result.message().unwrap_or("no detail")
                    );
                    return;
                }
                match loadsheet {
                    LoadsheetType::Preliminary => self.preliminary_ok = true,
                    LoadsheetType::Final => {
                        self.final_ok = true;
                        match self.door_service.set_open(Door::ForwardLeft, false) {
                            Ok(true) => self.events.publish(CoreEvent::DoorStateChanged {
                                door: "fwd_left",
                                open: false,
                            }),
                            Ok(false) => {}
                            Err(err) => warn!("Door close failed: {err}"),
                        }
                    }
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                warn!("{loadsheet} loadsheet task dropped without a result");
                self.pending_loadsheet = None;
            }
        }
    }

    fn call_ground(&self, command: &str) -> bool {
        match self.bus.set(command, SignalValue::from(true)) {
            Ok(()) => true,
            Err(err) => {
                warn!("Ground command {command} failed: {err}");
                false
            }
        }
    }

    fn ground_f64(&self, name: &str) -> f64 {
        self.bus.get_f64(name).unwrap_or(0.0)
    }

    fn publish_status(&self, service: ServiceKind, status: ServiceState) {
        self.events.publish(CoreEvent::ServiceStatusChanged { service, status });
    }
}
