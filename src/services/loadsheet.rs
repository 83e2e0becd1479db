use crate::http_handler::http_response::loadsheet::LoadsheetData;
use crate::http_handler::http_response::response_common::ResponseError;
use crate::{info, svc, warn};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use strum_macros::Display;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LoadsheetType {
    Preliminary,
    Final,
}

/// Outcome of one loadsheet request attempt chain. Immutable once built.
#[derive(Debug, Clone)]
pub struct LoadsheetResult {
    success: bool,
    status: Option<u16>,
    message: Option<String>,
    payload: Option<LoadsheetData>,
    cached: bool,
}

impl LoadsheetResult {
    fn ok(payload: Option<LoadsheetData>, cached: bool) -> Self {
        Self { success: true, status: None, message: None, payload, cached }
    }

    fn failed(err: &ResponseError) -> Self {
        Self {
            success: false,
            status: err.status(),
            message: Some(err.message()),
            payload: None,
            cached: false,
        }
    }

    fn cancelled() -> Self {
        Self {
            success: false,
            status: None,
            message: Some(String::from("cancelled")),
            payload: None,
            cached: false,
        }
    }

    pub fn success(&self) -> bool { self.success }
    pub fn status(&self) -> Option<u16> { self.status }
    pub fn message(&self) -> Option<&str> { self.message.as_deref() }
    pub fn payload(&self) -> Option<&LoadsheetData> { self.payload.as_ref() }
    pub fn is_cached(&self) -> bool { self.cached }
}

/// Transport seam toward the EFB backend; the production implementation
/// lives in `http_handler::efb_transport`, tests script their own.
#[async_trait]
pub trait LoadsheetTransport: Send + Sync {
    async fn generate(&self, loadsheet: LoadsheetType) -> Result<LoadsheetData, ResponseError>;
    async fn resend(&self) -> Result<(), ResponseError>;
    async fn reset(&self) -> Result<(), ResponseError>;
}

/// Requests loadsheets from the backend with idempotence and bounded retry.
///
/// The generated-flags live in atomics so the tick thread can read them
/// while a spawned request chain is still running.
pub struct LoadsheetCoordinator<T: LoadsheetTransport + ?Sized> {
    transport: std::sync::Arc<T>,
    preliminary_generated: AtomicBool,
    final_generated: AtomicBool,
}

impl<T: LoadsheetTransport + ?Sized> LoadsheetCoordinator<T> {
    /// Fixed pause between transport retries.
    const RETRY_BACKOFF: Duration = Duration::from_secs(2);

    pub fn new(transport: std::sync::Arc<T>) -> Self {
        Self {
            transport,
            preliminary_generated: AtomicBool::new(false),
            final_generated: AtomicBool::new(false),
        }
    }

    fn flag(&self, loadsheet: LoadsheetType) -> &AtomicBool {
        match loadsheet {
            LoadsheetType::Preliminary => &self.preliminary_generated,
            LoadsheetType::Final => &self.final_generated,
        }
    }

    pub fn generated(&self, loadsheet: LoadsheetType) -> bool {
        self.flag(loadsheet).load(Ordering::Acquire)
    }

    /// Generates the given loadsheet.
    ///
    /// Returns the cached success without touching the wire when this type
    /// was already generated and `force` is false. Transport failures are
    /// retried up to `max_retries` times with a fixed backoff; a semantic
    /// rejection (backend not ready) fails immediately so the orchestrator
    /// can re-attempt on a later tick.
    pub async fn generate_loadsheet(
        &self,
        loadsheet: LoadsheetType,
        max_retries: u32,
        force: bool,
        cancel: &CancellationToken,
    ) -> LoadsheetResult {
        if !force && self.generated(loadsheet) {
            return LoadsheetResult::ok(None, true);
        }
        let mut attempt = 0;
        loop {
            match self.transport.generate(loadsheet).await {
                Ok(payload) => {
                    self.flag(loadsheet).store(true, Ordering::Release);
                    info!("{loadsheet} loadsheet generated, ZFW {:.0} kg", payload.zfw_kg());
                    return LoadsheetResult::ok(Some(payload), false);
                }
                Err(err) if err.is_transient() && attempt < max_retries => {
                    attempt += 1;
                    warn!(
                        "{loadsheet} loadsheet transport failure ({}), retry {attempt}/{max_retries}",
                        err.message()
                    );
                    tokio::select! {
                        () = cancel.cancelled() => return LoadsheetResult::cancelled(),
                        () = sleep(Self::RETRY_BACKOFF) => {}
                    }
                }
                Err(err) => {
                    warn!("{loadsheet} loadsheet failed: {}", err.message());
                    return LoadsheetResult::failed(&err);
                }
            }
        }
    }

    /// Always hits the wire; the MCDU content may have been cleared
    /// externally, so the idempotence guard does not apply.
    pub async fn resend_loadsheet(&self) -> LoadsheetResult {
        match self.transport.resend().await {
            Ok(()) => {
                svc!("Loadsheet resent to MCDU");
                LoadsheetResult::ok(None, false)
            }
            Err(err) => {
                warn!("Loadsheet resend failed: {}", err.message());
                LoadsheetResult::failed(&err)
            }
        }
    }

    /// Clears the backend's loadsheets and the local idempotence flags;
    /// called when a new flight plan is detected.
    pub async fn reset_loadsheets(&self) -> LoadsheetResult {
        self.reset_flags();
        match self.transport.reset().await {
            Ok(()) => LoadsheetResult::ok(None, false),
            Err(err) => {
                warn!("Loadsheet reset failed: {}", err.message());
                LoadsheetResult::failed(&err)
            }
        }
    }

    /// Local flag reset only; enough to serve the next turnaround when the
    /// backend clears its own state on plan import.
    pub fn reset_flags(&self) {
        self.preliminary_generated.store(false, Ordering::Release);
        self.final_generated.store(false, Ordering::Release);
    }
}
