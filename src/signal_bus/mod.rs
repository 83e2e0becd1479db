//! Boundary to the simulator's named-variable space.
//!
//! The core never talks to the underlying transport directly. Everything the
//! aircraft and the ground-handling add-on expose is a flat set of named
//! values on a [`SignalBus`]; the poller reads them, service commands are
//! plain writes to command variables.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use strum_macros::Display;

pub mod names;

#[cfg(test)]
mod tests;

/// A single named value on the bus.
///
/// Simulator variables are numeric almost everywhere; the few textual ones
/// (flight number, airline code) come through as [`SignalValue::Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum SignalValue {
    Number(f64),
    Text(String),
}

impl SignalValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            SignalValue::Number(n) => *n,
            SignalValue::Text(_) => 0.0,
        }
    }

    /// Nonzero numbers are `true`, everything else is `false`.
    pub fn as_bool(&self) -> bool { self.as_f64() != 0.0 }

    pub fn as_text(&self) -> &str {
        match self {
            SignalValue::Text(s) => s.as_str(),
            SignalValue::Number(_) => "",
        }
    }
}

impl From<f64> for SignalValue {
    fn from(value: f64) -> Self { SignalValue::Number(value) }
}

impl From<bool> for SignalValue {
    fn from(value: bool) -> Self { SignalValue::Number(if value { 1.0 } else { 0.0 }) }
}

impl From<&str> for SignalValue {
    fn from(value: &str) -> Self { SignalValue::Text(String::from(value)) }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum BusError {
    Disconnected,
    UnknownVariable(String),
}

impl std::error::Error for BusError {}

/// Flat key/value view of the simulator and the ground add-on.
///
/// `status` mirrors the transport's status function: `1` while the variable
/// provider is alive, `0` once it dropped off. All calls are cheap and
/// non-blocking; the transport refreshes the backing store on its own cadence.
pub trait SignalBus: Send + Sync {
    fn subscribe(&self, name: &str);
    fn get(&self, name: &str) -> Result<SignalValue, BusError>;
    fn set(&self, name: &str, value: SignalValue) -> Result<(), BusError>;
    fn status(&self, name: &str) -> i32;

    fn get_f64(&self, name: &str) -> Result<f64, BusError> {
        Ok(self.get(name)?.as_f64())
    }

    fn get_bool(&self, name: &str) -> Result<bool, BusError> {
        Ok(self.get(name)?.as_bool())
    }
}

/// In-process mirror of the variable space.
///
/// The transport adapter feeds this from the simulator side; the tick loop
/// and the coordinators only ever see this mirror. Doubles as the bus used
/// by the test suites. Write counts are kept per variable so command
/// once-only guarantees stay observable.
pub struct InMemoryBus {
    values: RwLock<HashMap<String, SignalValue>>,
    set_counts: RwLock<HashMap<String, u32>>,
    connected: AtomicBool,
}

impl Default for InMemoryBus {
    fn default() -> Self { Self::new() }
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            set_counts: RwLock::new(HashMap::new()),
            connected: AtomicBool::new(true),
        }
    }

    /// Flips the simulated transport link. While `false` every read fails
    /// with [`BusError::Disconnected`] and all status functions report `0`.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    pub fn is_connected(&self) -> bool { self.connected.load(Ordering::Acquire) }

    /// Number of writes this process issued to `name` so far.
    pub fn set_count(&self, name: &str) -> u32 {
        self.set_counts.read().unwrap().get(name).copied().unwrap_or(0)
    }

    /// Transport-side update, does not count as a command write.
    pub fn feed(&self, name: &str, value: SignalValue) {
        self.values.write().unwrap().insert(String::from(name), value);
    }
}

impl SignalBus for InMemoryBus {
    fn subscribe(&self, name: &str) {
        self.values.write().unwrap().entry(String::from(name)).or_insert(SignalValue::Number(0.0));
    }

    fn get(&self, name: &str) -> Result<SignalValue, BusError> {
        if !self.is_connected() {
            return Err(BusError::Disconnected);
        }
        self.values
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| BusError::UnknownVariable(String::from(name)))
    }

    fn set(&self, name: &str, value: SignalValue) -> Result<(), BusError> {
        if !self.is_connected() {
            return Err(BusError::Disconnected);
        }
        self.values.write().unwrap().insert(String::from(name), value);
        *self.set_counts.write().unwrap().entry(String::from(name)).or_insert(0) += 1;
        Ok(())
    }

    fn status(&self, _name: &str) -> i32 {
        i32::from(self.is_connected())
    }
}
