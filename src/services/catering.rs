use super::ServiceState;
use crate::{svc, warn};

/// Catering is executed entirely by the ground add-on; this coordinator
/// tracks the reported state and enforces legal transitions on it.
pub struct CateringCoordinator {
    state: ServiceState,
}

impl CateringCoordinator {
    pub fn new() -> Self {
        Self { state: ServiceState::Inactive }
    }

    pub fn state(&self) -> ServiceState { self.state }

    pub fn request(&mut self) -> bool {
        if self.state != ServiceState::Inactive {
            return false;
        }
        self.state = ServiceState::Requested;
        svc!("Catering requested");
        true
    }

    /// Add-on state signal. Illegal transitions (e.g. `Active` straight from
    /// `Inactive`) are ignored with a warning so a glitched signal cannot
    /// corrupt the machine.
    pub fn on_signal(&mut self, reported: ServiceState) {
        if reported == self.state {
            return;
        }
        let legal = match reported {
            ServiceState::Active => self.state.can_activate(),
            ServiceState::Completed | ServiceState::Paused | ServiceState::Aborted => {
                matches!(self.state, ServiceState::Active | ServiceState::Paused)
            }
            ServiceState::Requested => self.state == ServiceState::Inactive,
            ServiceState::Inactive => false,
        };
        if legal {
            self.state = reported;
            svc!("Catering {reported}");
        } else {
            warn!("Ignoring illegal catering transition {} -> {reported}", self.state);
        }
    }

    pub fn stop(&mut self) -> bool {
        if matches!(self.state, ServiceState::Active | ServiceState::Requested) {
            self.state = ServiceState::Aborted;
            svc!("Catering aborted");
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.state = ServiceState::Inactive;
    }
}

impl Default for CateringCoordinator {
    fn default() -> Self { Self::new() }
}
