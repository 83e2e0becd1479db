//! Process-wide event aggregator.
//!
//! Decouples the orchestration core from UI and audio consumers. Publishes
//! originate on the tick thread; subscribers come and go from other threads,
//! which the broadcast channel tolerates without extra locking.

use crate::event;
use crate::phase::FlightPhase;
use crate::services::{LoadsheetType, ServiceKind, ServiceState};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    PhaseChanged { from: FlightPhase, to: FlightPhase },
    ServiceStatusChanged { service: ServiceKind, status: ServiceState },
    FlightPlanChanged { flight_number: String },
    DoorStateChanged { door: &'static str, open: bool },
    EquipmentStateChanged { equipment: &'static str, connected: bool },
    FuelStateChanged { on_board_kg: f64, target_kg: f64 },
    CargoStateChanged { loaded_pct: u8 },
    LoadsheetCompleted { loadsheet: LoadsheetType, success: bool },
    ConnectivityChanged { connected: bool },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self { Self::new() }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> { self.tx.subscribe() }

    /// Fire-and-forget; an event with no subscribers is dropped silently.
    pub fn publish(&self, ev: CoreEvent) {
        event!("{ev:?}");
        let _ = self.tx.send(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_receives_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.publish(CoreEvent::ConnectivityChanged { connected: false });
        assert_eq!(
            rx.recv().await.unwrap(),
            CoreEvent::ConnectivityChanged { connected: false }
        );
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.publish(CoreEvent::CargoStateChanged { loaded_pct: 50 });
    }
}
