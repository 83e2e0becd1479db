#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod aircraft;
mod config;
mod connection;
mod events;
mod http_handler;
mod keychain;
mod logger;
mod orchestrator;
mod phase;
mod services;
mod signal_bus;

use crate::config::AutomationConfig;
use crate::keychain::Keychain;
use std::env;
use tokio_util::sync::CancellationToken;

const DEFAULT_EFB_BASE_URL: &str = "http://localhost:8083";

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let base_url_var = env::var("RAMPLINK_EFB_BASE_URL");
    let base_url = base_url_var.as_ref().map_or(DEFAULT_EFB_BASE_URL, |v| v.as_str());

    let cancel = CancellationToken::new();
    let (keychain, supervisor) =
        Keychain::new(base_url, AutomationConfig::default(), cancel.clone())
            .unwrap_or_else(|e| fatal!("Startup failed: {e}"));

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            shutdown.cancel();
        }
    });

    let transport = keychain.transport();
    if !connection::wait_for_backend(&transport, &cancel).await {
        return;
    }
    let bus = keychain.bus();
    if !connection::wait_for_bus(bus.as_ref(), &cancel).await {
        return;
    }

    // Stand-in for the UI/audio consumers; keeps the event stream visible.
    let mut event_rx = keychain.events().subscribe();
    tokio::spawn(async move {
        while let Ok(core_event) = event_rx.recv().await {
            event!("{core_event:?}");
        }
    });

    supervisor.run(cancel).await;
}
