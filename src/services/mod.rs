//! Per-service coordinators and their shared state model.
//!
//! Every ground service runs the same small state machine; each coordinator
//! owns exactly one service's instance and is the only writer to it. All
//! mutation happens on the tick thread.

use strum_macros::Display;

pub mod boarding;
pub mod cargo;
pub mod catering;
pub mod ground_equipment;
pub mod loadsheet;
pub mod refueling;


pub use boarding::{BoardingCoordinator, DeboardingCoordinator};
pub use cargo::CargoCoordinator;
pub use catering::CateringCoordinator;
pub use ground_equipment::GroundEquipmentCoordinator;
pub use loadsheet::{LoadsheetCoordinator, LoadsheetResult, LoadsheetType};
pub use refueling::{RefuelingCoordinator, RefuelingSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ServiceKind {
    Refueling,
    Boarding,
    Deboarding,
    CargoLoad,
    CargoUnload,
    Catering,
}

impl ServiceKind {
    /// Services that cannot run while the other is `Active`.
    pub fn conflicts_with(self, other: ServiceKind) -> bool {
        matches!(
            (self, other),
            (ServiceKind::Boarding, ServiceKind::Deboarding)
                | (ServiceKind::Deboarding, ServiceKind::Boarding)
                | (ServiceKind::CargoLoad, ServiceKind::CargoUnload)
                | (ServiceKind::CargoUnload, ServiceKind::CargoLoad)
        )
    }
}

/// Canonical service state machine.
///
/// `Active` is reachable only from `Requested` or `Paused`; `Completed` is
/// terminal until the turnaround reset puts the machine back to `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum ServiceState {
    #[default]
    Inactive,
    Requested,
    Active,
    Paused,
    Completed,
    Aborted,
}

impl ServiceState {
    pub fn can_activate(self) -> bool {
        matches!(self, ServiceState::Requested | ServiceState::Paused)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ServiceState::Completed | ServiceState::Aborted)
    }

    /// Numeric encoding used on the signal bus by the ground add-on.
    pub fn from_signal(raw: f64) -> ServiceState {
        match raw as i64 {
            1 => ServiceState::Requested,
            2 => ServiceState::Active,
            3 => ServiceState::Paused,
            4 => ServiceState::Completed,
            5 => ServiceState::Aborted,
            _ => ServiceState::Inactive,
        }
    }

    pub fn to_signal(self) -> f64 {
        match self {
            ServiceState::Inactive => 0.0,
            ServiceState::Requested => 1.0,
            ServiceState::Active => 2.0,
            ServiceState::Paused => 3.0,
            ServiceState::Completed => 4.0,
            ServiceState::Aborted => 5.0,
        }
    }
}
