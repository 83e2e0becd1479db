use super::Orchestrator;
use crate::aircraft::{FlightPlan, SnapshotReader};
use crate::events::{CoreEvent, EventBus};
use crate::phase::{DebounceState, FlightPhase, PhaseInputs, evaluate};
use crate::services::{ServiceKind, ServiceState};
use crate::{info, warn};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Asynchronous user-triggered commands, drained once per tick so all
/// coordinator mutation stays on the tick thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCommand {
    Request(ServiceKind),
    Cancel(ServiceKind),
    ResendLoadsheet,
}

/// The periodic polling loop.
///
/// One tick: read a fresh snapshot, drain queued commands, detect flight-plan
/// changes, evaluate the phase, then let the orchestrator issue commands.
/// Phase evaluation strictly precedes service evaluation, so commands are
/// always computed against the phase of this tick, never a stale one.
pub struct Supervisor {
    reader: SnapshotReader,
    orchestrator: Orchestrator,
    events: EventBus,
    command_rx: mpsc::Receiver<ServiceCommand>,
    tick_interval: Duration,
    phase: FlightPhase,
    debounce: DebounceState,
    last_plan: Option<FlightPlan>,
    connected: bool,
}

impl Supervisor {
    pub fn new(
        reader: SnapshotReader,
        orchestrator: Orchestrator,
        events: EventBus,
        command_rx: mpsc::Receiver<ServiceCommand>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            reader,
            orchestrator,
            events,
            command_rx,
            tick_interval,
            phase: FlightPhase::Preflight,
            debounce: DebounceState::default(),
            last_plan: None,
            connected: true,
        }
    }

    pub fn phase(&self) -> FlightPhase { self.phase }

    /// Read-only view for status consumers.
    pub fn orchestrator(&self) -> &Orchestrator { &self.orchestrator }

    pub async fn run(mut self, cancel: CancellationToken) {
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();
        info!("Tick loop running at {:?}", self.tick_interval);
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("Tick loop shutting down");
                    return;
                }
                _ = ticker.tick() => {}
            }
            let elapsed = last_tick.elapsed();
            last_tick = Instant::now();
            self.tick(elapsed);
        }
    }

    /// One full orchestration cycle. Public for the loop above and the test
    /// suite; nothing else should call it.
    pub fn tick(&mut self, elapsed: Duration) {
        let snapshot = match self.reader.read() {
            Ok(snapshot) => {
                if !self.connected {
                    self.connected = true;
                    info!("Signal bus connectivity restored");
                    self.events.publish(CoreEvent::ConnectivityChanged { connected: true });
                    self.orchestrator.resume();
                }
                snapshot
            }
            Err(err) => {
                // Hold the last known phase; nothing moves without signals.
                if self.connected {
                    self.connected = false;
                    warn!("Signal bus unavailable ({err}), suspending orchestration");
                    self.events.publish(CoreEvent::ConnectivityChanged { connected: false });
                    self.orchestrator.suspend();
                }
                return;
            }
        };

        let mut new_flight_plan = false;
        if let Some(plan) = &snapshot.flight_plan {
            if plan.is_new_versus(self.last_plan.as_ref()) {
                new_flight_plan = true;
                info!("Flight plan {} detected", plan.number());
                self.orchestrator.on_new_flight_plan(plan, &snapshot);
                self.last_plan = Some(plan.clone());
            }
        }

        let inputs = PhaseInputs {
            snapshot: &snapshot,
            deboarding_complete: self.orchestrator.deboarding_state() == ServiceState::Completed,
            new_flight_plan,
        };
        let (phase, transitioned) = evaluate(&inputs, self.phase, &mut self.debounce);
        if transitioned {
            let from = self.phase;
            self.phase = phase;
            info!("Flight phase {from} -> {phase}");
            self.events.publish(CoreEvent::PhaseChanged { from, to: phase });
            self.orchestrator.on_phase_changed(from, phase, &snapshot);
        }

        while let Ok(command) = self.command_rx.try_recv() {
            match command {
                ServiceCommand::Request(service) => {
                    let accepted =
                        self.orchestrator.request_service(service, &snapshot, self.phase);
                    if !accepted {
                        info!("{service} request rejected");
                    }
                }
                ServiceCommand::Cancel(service) => {
                    self.orchestrator.cancel_service(service);
                }
                ServiceCommand::ResendLoadsheet => self.orchestrator.resend_loadsheet(),
            }
        }

        self.orchestrator.tick(&snapshot, self.phase, elapsed);
    }
}
