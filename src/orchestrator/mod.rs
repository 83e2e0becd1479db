//! Service orchestration: phase-entry actions, per-tick sequencing, and the
//! supervisor loop that drives everything.

pub mod orchestrator;
pub mod supervisor;

#[cfg(test)]
mod tests;

pub use orchestrator::Orchestrator;
pub use supervisor::{ServiceCommand, Supervisor};
