use super::ServiceState;
use crate::config::FuelUnit;
use crate::{svc, warn};
use std::time::Duration;

/// One refuel operation from plan load to turnaround reset.
#[derive(Debug, Clone, PartialEq)]
pub struct RefuelingSession {
    planned_kg: f64,
    current_kg: f64,
    target_kg: f64,
    unit: FuelUnit,
    paused: bool,
}

impl RefuelingSession {
    pub fn planned_kg(&self) -> f64 { self.planned_kg }
    pub fn current_kg(&self) -> f64 { self.current_kg }
    pub fn target_kg(&self) -> f64 { self.target_kg }
    pub fn unit(&self) -> FuelUnit { self.unit }
    pub fn is_paused(&self) -> bool { self.paused }
}

/// Drives the refuel sub-state-machine:
/// `Inactive → Requested → Active ⇄ Paused → Completed`, with
/// `Active/Paused → Aborted` on an explicit stop.
pub struct RefuelingCoordinator {
    state: ServiceState,
    session: Option<RefuelingSession>,
    rate_kg_s: f64,
}

impl RefuelingCoordinator {
    pub fn new(rate_kg_s: f64) -> Self {
        Self { state: ServiceState::Inactive, session: None, rate_kg_s }
    }

    pub fn state(&self) -> ServiceState { self.state }
    pub fn session(&self) -> Option<&RefuelingSession> { self.session.as_ref() }

    /// Creates the session when a flight plan lands. The target is the
    /// planned block fuel, clamped to tank capacity; the current amount is
    /// whatever the aircraft already holds.
    pub fn prepare_session(
        &mut self,
        planned_kg: f64,
        current_kg: f64,
        capacity_kg: f64,
        unit: FuelUnit,
    ) {
        let target_kg = if planned_kg > capacity_kg {
            warn!(
                "Planned fuel {planned_kg:.0} kg exceeds tank capacity {capacity_kg:.0} kg. Clamping."
            );
            capacity_kg
        } else {
            planned_kg
        };
        self.session = Some(RefuelingSession {
            planned_kg,
            current_kg,
            target_kg,
            unit,
            paused: false,
        });
    }

    pub fn request(&mut self) -> bool {
        if self.state != ServiceState::Inactive || self.session.is_none() {
            return false;
        }
        self.state = ServiceState::Requested;
        svc!("Refueling requested");
        true
    }

    pub fn start(&mut self) -> bool {
        if !self.state.can_activate() {
            return false;
        }
        self.state = ServiceState::Active;
        if let Some(session) = &mut self.session {
            session.paused = false;
        }
        svc!("Refueling active");
        true
    }

    /// External fuel-hose signal; a dropped hose pauses, a reattached hose
    /// resumes.
    pub fn on_hose_signal(&mut self, connected: bool) {
        match (self.state, connected) {
            (ServiceState::Active, false) => self.pause(),
            (ServiceState::Paused, true) => {
                self.start();
            }
            _ => {}
        }
    }

    pub fn pause(&mut self) {
        if self.state == ServiceState::Active {
            self.state = ServiceState::Paused;
            if let Some(session) = &mut self.session {
                session.paused = true;
            }
            svc!("Refueling paused");
        }
    }

    /// One tick of fuel transfer while `Active`. Advances by
    /// `rate × elapsed`, clamped so the current amount never overshoots the
    /// target. Returns `true` once the target is reached.
    pub fn process(&mut self, elapsed: Duration) -> bool {
        if self.state != ServiceState::Active {
            return self.state == ServiceState::Completed;
        }
        let Some(session) = &mut self.session else {
            return false;
        };
        if session.current_kg < session.target_kg {
            let step = self.rate_kg_s * elapsed.as_secs_f64();
            session.current_kg = (session.current_kg + step).min(session.target_kg);
        }
        if session.current_kg >= session.target_kg {
            self.state = ServiceState::Completed;
            svc!("Refueling completed at {:.0} kg", session.current_kg);
            return true;
        }
        false
    }

    /// Explicit stop; a not-yet-started request can be withdrawn too.
    pub fn stop(&mut self) -> bool {
        if matches!(
            self.state,
            ServiceState::Requested | ServiceState::Active | ServiceState::Paused
        ) {
            self.state = ServiceState::Aborted;
            svc!("Refueling aborted");
            return true;
        }
        false
    }

    /// Turnaround reset; the next flight plan starts a fresh session.
    pub fn reset(&mut self) {
        self.state = ServiceState::Inactive;
        self.session = None;
    }
}
