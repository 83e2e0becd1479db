use crate::aircraft::SnapshotReader;
use crate::config::AutomationConfig;
use crate::events::EventBus;
use crate::http_handler::efb_transport::EfbTransport;
use crate::http_handler::http_client::HTTPClient;
use crate::orchestrator::{Orchestrator, ServiceCommand, Supervisor};
use crate::services::loadsheet::LoadsheetTransport;
use crate::signal_bus::{InMemoryBus, SignalBus};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const COMMAND_CHANNEL_CAPACITY: usize = 16;

/// Struct holding the key collaborators of the application: signal bus,
/// HTTP client/transport, event bus and the command channel into the tick
/// loop. Everything is wired here once, at startup; construction fails fast
/// on an invalid configuration.
pub struct Keychain {
    bus: Arc<InMemoryBus>,
    client: Arc<HTTPClient>,
    transport: Arc<EfbTransport>,
    events: EventBus,
    command_tx: mpsc::Sender<ServiceCommand>,
}

impl Keychain {
    /// Builds the full object graph and the supervisor that drives it.
    pub fn new(
        base_url: &str,
        config: AutomationConfig,
        cancel: CancellationToken,
    ) -> Result<(Keychain, Supervisor), String> {
        config.validate()?;
        let bus = Arc::new(InMemoryBus::new());
        let client = Arc::new(HTTPClient::new(base_url));
        let transport = Arc::new(EfbTransport::new(Arc::clone(&client)));
        let events = EventBus::new();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        let reader = SnapshotReader::new(Arc::clone(&bus) as Arc<dyn SignalBus>);
        let orchestrator = Orchestrator::new(
            config.clone(),
            Arc::clone(&bus) as Arc<dyn SignalBus>,
            events.clone(),
            Arc::clone(&transport) as Arc<dyn LoadsheetTransport>,
            cancel,
        )?;
        let supervisor =
            Supervisor::new(reader, orchestrator, events.clone(), command_rx, config.tick_interval);

        Ok((
            Keychain { bus, client, transport, events, command_tx },
            supervisor,
        ))
    }

    /// Provides a cloned reference to the signal bus mirror.
    pub fn bus(&self) -> Arc<InMemoryBus> { Arc::clone(&self.bus) }

    /// Provides a cloned reference to the HTTP client.
    pub fn client(&self) -> Arc<HTTPClient> { Arc::clone(&self.client) }

    /// Provides a cloned reference to the EFB transport.
    pub fn transport(&self) -> Arc<EfbTransport> { Arc::clone(&self.transport) }

    /// Provides a handle to the event aggregator.
    pub fn events(&self) -> EventBus { self.events.clone() }

    /// Command sender for UI/audio collaborators.
    pub fn command_tx(&self) -> mpsc::Sender<ServiceCommand> { self.command_tx.clone() }
}
