use super::ServiceState;
use crate::svc;

/// Cargo loading and unloading, one state machine per direction. The add-on
/// moves the freight; this coordinator tracks convergence of the reported
/// hold percentage and tells the orchestrator when cargo doors should be
/// open.
pub struct CargoCoordinator {
    load: ServiceState,
    unload: ServiceState,
}

impl CargoCoordinator {
    pub fn new() -> Self {
        Self { load: ServiceState::Inactive, unload: ServiceState::Inactive }
    }

    pub fn load_state(&self) -> ServiceState { self.load }
    pub fn unload_state(&self) -> ServiceState { self.unload }

    pub fn request_load(&mut self) -> bool {
        if self.load != ServiceState::Inactive || self.unload == ServiceState::Active {
            return false;
        }
        self.load = ServiceState::Requested;
        svc!("Cargo loading requested");
        true
    }

    pub fn request_unload(&mut self) -> bool {
        if self.unload != ServiceState::Inactive || self.load == ServiceState::Active {
            return false;
        }
        self.unload = ServiceState::Requested;
        svc!("Cargo unloading requested");
        true
    }

    pub fn start_load(&mut self) -> bool {
        if !self.load.can_activate() {
            return false;
        }
        self.load = ServiceState::Active;
        true
    }

    pub fn start_unload(&mut self) -> bool {
        if !self.unload.can_activate() {
            return false;
        }
        self.unload = ServiceState::Active;
        true
    }

    pub fn process_load(&mut self, loaded_pct: u8) -> bool {
        if self.load != ServiceState::Active {
            return self.load == ServiceState::Completed;
        }
        if loaded_pct >= 100 {
            self.load = ServiceState::Completed;
            svc!("Cargo loading completed");
            return true;
        }
        false
    }

    pub fn process_unload(&mut self, loaded_pct: u8) -> bool {
        if self.unload != ServiceState::Active {
            return self.unload == ServiceState::Completed;
        }
        if loaded_pct == 0 {
            self.unload = ServiceState::Completed;
            svc!("Cargo unloading completed");
            return true;
        }
        false
    }

    /// Cargo doors stay open exactly while freight is moving.
    pub fn doors_should_be_open(&self) -> bool {
        self.load == ServiceState::Active || self.unload == ServiceState::Active
    }

    pub fn stop(&mut self) -> bool {
        let mut stopped = false;
        if matches!(self.load, ServiceState::Active | ServiceState::Requested) {
            self.load = ServiceState::Aborted;
            stopped = true;
        }
        if matches!(self.unload, ServiceState::Active | ServiceState::Requested) {
            self.unload = ServiceState::Aborted;
            stopped = true;
        }
        if stopped {
            svc!("Cargo operation aborted");
        }
        stopped
    }

    pub fn reset(&mut self) {
        self.load = ServiceState::Inactive;
        self.unload = ServiceState::Inactive;
    }
}

impl Default for CargoCoordinator {
    fn default() -> Self { Self::new() }
}
