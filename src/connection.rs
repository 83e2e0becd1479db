//! Startup connection establishment for both externals.
//!
//! Neither side is up reliably when the bridge launches, so both waits loop
//! with a fixed retry interval and bail out cooperatively on cancellation.

use crate::http_handler::efb_transport::EfbTransport;
use crate::signal_bus::{SignalBus, names};
use crate::{info, log};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

const CONNECT_RETRY_INTERVAL: Duration = Duration::from_secs(3);

/// Blocks until the EFB backend answers its health probe; `false` when the
/// cancellation token fires first.
pub async fn wait_for_backend(transport: &EfbTransport, cancel: &CancellationToken) -> bool {
    loop {
        match transport.health().await {
            Ok(version) => {
                info!("EFB backend reachable, version {version}");
                return true;
            }
            Err(err) => log!("EFB backend not reachable yet ({err})"),
        }
        tokio::select! {
            () = cancel.cancelled() => return false,
            () = sleep(CONNECT_RETRY_INTERVAL) => {}
        }
    }
}

/// Blocks until the signal bus transport reports alive.
pub async fn wait_for_bus(bus: &dyn SignalBus, cancel: &CancellationToken) -> bool {
    loop {
        if bus.status(names::aircraft::ON_GROUND) == 1 {
            info!("Signal bus transport alive");
            return true;
        }
        log!("Waiting for signal bus transport");
        tokio::select! {
            () = cancel.cancelled() => return false,
            () = sleep(CONNECT_RETRY_INTERVAL) => {}
        }
    }
}
