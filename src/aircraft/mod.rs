//! Thin accessors over the aircraft side of the signal bus.
//!
//! Each service owns one slice of externally observed aircraft state; none
//! of them holds mutable state of its own. The per-tick aggregate view lives
//! in [`snapshot::AircraftSnapshot`].

pub mod cargo;
pub mod doors;
pub mod equipment;
pub mod flight_plan;
pub mod fuel;
pub mod pax;
pub mod snapshot;

pub use flight_plan::FlightPlan;
pub use snapshot::{AircraftSnapshot, SnapshotReader};
