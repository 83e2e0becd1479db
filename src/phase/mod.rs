//! Flight-phase state machine.
//!
//! The phase is derived once per tick from the current [`AircraftSnapshot`]
//! plus the previous phase; all mutable evaluation state lives in the small
//! [`DebounceState`] value the caller passes back in, which keeps
//! [`evaluate`] a pure function of its arguments.

use crate::aircraft::AircraftSnapshot;
use crate::warn;
use strum_macros::Display;

#[cfg(test)]
mod tests;

/// Operational phase of the aircraft. One-directional cycle; only
/// `Turnaround → Departure` restarts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FlightPhase {
    Preflight,
    Departure,
    TaxiOut,
    Flight,
    TaxiIn,
    Arrival,
    Turnaround,
}

impl FlightPhase {
    pub fn next(self) -> FlightPhase {
        match self {
            FlightPhase::Preflight | FlightPhase::Turnaround => FlightPhase::Departure,
            FlightPhase::Departure => FlightPhase::TaxiOut,
            FlightPhase::TaxiOut => FlightPhase::Flight,
            FlightPhase::Flight => FlightPhase::TaxiIn,
            FlightPhase::TaxiIn => FlightPhase::Arrival,
            FlightPhase::Arrival => FlightPhase::Turnaround,
        }
    }
}

/// Consecutive ticks a ground/airborne signal must hold before it counts.
pub const DEBOUNCE_TICKS: u8 = 3;

/// Rolling evaluation state carried from tick to tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceState {
    airborne_ticks: u8,
    ground_ticks: u8,
    was_airborne: bool,
}

impl DebounceState {
    fn observe(&mut self, on_ground: bool) {
        if on_ground {
            self.ground_ticks = self.ground_ticks.saturating_add(1);
            self.airborne_ticks = 0;
        } else {
            self.airborne_ticks = self.airborne_ticks.saturating_add(1);
            self.ground_ticks = 0;
            if self.airborne_ticks >= DEBOUNCE_TICKS {
                self.was_airborne = true;
            }
        }
    }

    fn airborne_confirmed(&self) -> bool { self.airborne_ticks >= DEBOUNCE_TICKS }
    fn on_ground_confirmed(&self) -> bool { self.ground_ticks >= DEBOUNCE_TICKS }
}

/// Non-snapshot inputs to one evaluation.
pub struct PhaseInputs<'a> {
    pub snapshot: &'a AircraftSnapshot,
    /// Deboarding coordinator reported `Completed` this cycle.
    pub deboarding_complete: bool,
    /// A plan with a different flight number, or an explicit reload, was
    /// detected since the current cycle began.
    pub new_flight_plan: bool,
}

/// Derives the phase for this tick.
///
/// Entry conditions are checked in cycle order from the phase after
/// `previous` to the end of the cycle; the first condition that holds wins.
/// The normal single-step progression is the common case, but a later phase
/// whose preconditions are already satisfied is entered directly (missed
/// intermediate signals, process start mid-flight). The scan never wraps, so
/// transitions stay one-directional; `Turnaround` only restarts at
/// `Departure`.
pub fn evaluate(
    inputs: &PhaseInputs,
    previous: FlightPhase,
    debounce: &mut DebounceState,
) -> (FlightPhase, bool) {
    debounce.observe(inputs.snapshot.on_ground);

    let mut candidate = previous.next();
    loop {
        if enters(candidate, previous, inputs, debounce) {
            if candidate != previous.next() {
                warn!("Phase jump {previous} -> {candidate}, intermediate signals missed");
            }
            if candidate == FlightPhase::Turnaround {
                debounce.was_airborne = false;
            }
            return (candidate, true);
        }
        if candidate == FlightPhase::Turnaround || previous == FlightPhase::Turnaround {
            break;
        }
        candidate = candidate.next();
    }
    (previous, false)
}

fn enters(
    target: FlightPhase,
    previous: FlightPhase,
    inputs: &PhaseInputs,
    debounce: &DebounceState,
) -> bool {
    let snap = inputs.snapshot;
    match target {
        FlightPhase::Preflight => false,
        // The only cycle restart; a plan mid-cycle must not drag the phase
        // back to Departure.
        FlightPhase::Departure => match previous {
            FlightPhase::Preflight => snap.flight_plan.is_some(),
            FlightPhase::Turnaround => inputs.new_flight_plan,
            _ => false,
        },
        FlightPhase::TaxiOut => {
            snap.equipment.all_removed() && !snap.parking_brake_set && snap.beacon_on
        }
        FlightPhase::Flight => debounce.airborne_confirmed(),
        FlightPhase::TaxiIn => debounce.on_ground_confirmed() && debounce.was_airborne,
        FlightPhase::Arrival => {
            snap.on_ground
                && !snap.engines_running
                && snap.parking_brake_set
                && debounce.was_airborne
        }
        FlightPhase::Turnaround => inputs.deboarding_complete,
    }
}
