use super::ServiceState;
use crate::svc;

/// Boarding runs `Inactive → Requested → Active → Completed`; completion is
/// a convergence check re-evaluated every tick, not a one-shot call.
pub struct BoardingCoordinator {
    state: ServiceState,
    planned_pax: u32,
    cargo_target_pct: u8,
}

impl BoardingCoordinator {
    pub fn new() -> Self {
        Self { state: ServiceState::Inactive, planned_pax: 0, cargo_target_pct: 100 }
    }

    pub fn state(&self) -> ServiceState { self.state }
    pub fn planned_pax(&self) -> u32 { self.planned_pax }

    pub fn set_planned_pax(&mut self, planned_pax: u32) {
        self.planned_pax = planned_pax;
    }

    pub fn request(&mut self) -> bool {
        if self.state != ServiceState::Inactive || self.planned_pax == 0 {
            return false;
        }
        self.state = ServiceState::Requested;
        svc!("Boarding requested for {} passengers", self.planned_pax);
        true
    }

    pub fn start(&mut self) -> bool {
        if !self.state.can_activate() {
            return false;
        }
        self.state = ServiceState::Active;
        svc!("Boarding active");
        true
    }

    /// Per-tick progress check. Complete once the passenger count reached
    /// the plan AND cargo is fully loaded; partial progress just waits for
    /// the next tick.
    pub fn process(&mut self, pax_current: u32, cargo_current_pct: u8) -> bool {
        if self.state != ServiceState::Active {
            return self.state == ServiceState::Completed;
        }
        if pax_current >= self.planned_pax && cargo_current_pct >= self.cargo_target_pct {
            self.state = ServiceState::Completed;
            svc!("Boarding completed, {pax_current} on board");
            return true;
        }
        false
    }

    pub fn stop(&mut self) -> bool {
        if matches!(self.state, ServiceState::Active | ServiceState::Requested) {
            self.state = ServiceState::Aborted;
            svc!("Boarding aborted");
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.state = ServiceState::Inactive;
        self.planned_pax = 0;
    }
}

impl Default for BoardingCoordinator {
    fn default() -> Self { Self::new() }
}

/// Mirror of boarding for the arrival side; converges toward an empty
/// cabin and empty holds.
pub struct DeboardingCoordinator {
    state: ServiceState,
}

impl DeboardingCoordinator {
    pub fn new() -> Self {
        Self { state: ServiceState::Inactive }
    }

    pub fn state(&self) -> ServiceState { self.state }

    pub fn request(&mut self) -> bool {
        if self.state != ServiceState::Inactive {
            return false;
        }
        self.state = ServiceState::Requested;
        svc!("Deboarding requested");
        true
    }

    pub fn start(&mut self) -> bool {
        if !self.state.can_activate() {
            return false;
        }
        self.state = ServiceState::Active;
        svc!("Deboarding active");
        true
    }

    pub fn process(&mut self, pax_current: u32, cargo_current_pct: u8) -> bool {
        if self.state != ServiceState::Active {
            return self.state == ServiceState::Completed;
        }
        if pax_current == 0 && cargo_current_pct == 0 {
            self.state = ServiceState::Completed;
            svc!("Deboarding completed");
            return true;
        }
        false
    }

    pub fn stop(&mut self) -> bool {
        if matches!(self.state, ServiceState::Active | ServiceState::Requested) {
            self.state = ServiceState::Aborted;
            svc!("Deboarding aborted");
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.state = ServiceState::Inactive;
    }
}

impl Default for DeboardingCoordinator {
    fn default() -> Self { Self::new() }
}
