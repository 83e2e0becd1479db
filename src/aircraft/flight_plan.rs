use crate::signal_bus::{BusError, SignalBus, names};
use regex::Regex;
use std::sync::LazyLock;

/// Flight-plan figures as imported into the aircraft system.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPlan {
    number: String,
    planned_pax: u32,
    planned_fuel_kg: f64,
    planned_cargo_kg: f64,
    reload_count: u32,
}

static FLIGHT_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*([A-Z]{2,3})\s*0*(\d{1,4})\s*([A-Z]?)\s*$").unwrap());

/// Normalizes the flight-number text read off the bus.
///
/// The aircraft system writes whatever the crew typed (`"LH 039"`, `"lh39"`,
/// `"LH39 "`), so plan comparison runs on a canonical `LH39` form. Text that
/// does not look like a flight number is passed through trimmed.
pub fn normalize_flight_number(raw: &str) -> String {
    if let Some(caps) = FLIGHT_NUMBER_REGEX.captures(raw) {
        let airline = caps.get(1).map_or("", |m| m.as_str()).to_uppercase();
        let number = caps.get(2).map_or("", |m| m.as_str());
        let suffix = caps.get(3).map_or("", |m| m.as_str()).to_uppercase();
        format!("{airline}{number}{suffix}")
    } else {
        raw.trim().to_string()
    }
}

impl FlightPlan {
    /// Reads the current plan from the bus, `None` while nothing is loaded.
    pub fn read(bus: &dyn SignalBus) -> Result<Option<FlightPlan>, BusError> {
        if !bus.get_bool(names::aircraft::FLIGHT_PLAN_LOADED)? {
            return Ok(None);
        }
        let raw_number = bus.get(names::aircraft::FLIGHT_NUMBER)?;
        Ok(Some(FlightPlan {
            number: normalize_flight_number(raw_number.as_text()),
            planned_pax: bus.get_f64(names::aircraft::PLANNED_PAX)? as u32,
            planned_fuel_kg: bus.get_f64(names::aircraft::PLANNED_FUEL_KG)?,
            planned_cargo_kg: bus.get_f64(names::aircraft::PLANNED_CARGO_KG)?,
            reload_count: bus.get_f64(names::aircraft::FLIGHT_PLAN_RELOAD_COUNT)? as u32,
        }))
    }

    pub fn number(&self) -> &str { &self.number }
    pub fn planned_pax(&self) -> u32 { self.planned_pax }
    pub fn planned_fuel_kg(&self) -> f64 { self.planned_fuel_kg }
    pub fn planned_cargo_kg(&self) -> f64 { self.planned_cargo_kg }
    pub fn reload_count(&self) -> u32 { self.reload_count }

    /// A plan counts as new when the normalized number changed or the crew
    /// explicitly reloaded the same plan.
    pub fn is_new_versus(&self, previous: Option<&FlightPlan>) -> bool {
        match previous {
            None => true,
            Some(prev) => {
                prev.number != self.number || prev.reload_count != self.reload_count
            }
        }
    }

    #[cfg(test)]
    pub fn test_plan(number: &str, planned_pax: u32, planned_fuel_kg: f64) -> FlightPlan {
        FlightPlan {
            number: normalize_flight_number(number),
            planned_pax,
            planned_fuel_kg,
            planned_cargo_kg: 3400.0,
            reload_count: 0,
        }
    }

    #[cfg(test)]
    pub fn with_reload_count(mut self, reload_count: u32) -> FlightPlan {
        self.reload_count = reload_count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_flight_number() {
        assert_eq!(normalize_flight_number("LH 039"), "LH39");
        assert_eq!(normalize_flight_number("lh39"), "LH39");
        assert_eq!(normalize_flight_number(" dlh 39a "), "DLH39A");
        assert_eq!(normalize_flight_number("not a number"), "not a number");
    }

    #[test]
    fn test_is_new_versus() {
        let a = FlightPlan::test_plan("LH39", 150, 5000.0);
        let same = FlightPlan::test_plan("lh 039", 150, 5000.0);
        assert!(a.is_new_versus(None));
        assert!(!same.is_new_versus(Some(&a)));
        let other = FlightPlan::test_plan("LH40", 150, 5000.0);
        assert!(other.is_new_versus(Some(&a)));
        let reloaded = FlightPlan::test_plan("LH39", 150, 5000.0).with_reload_count(1);
        assert!(reloaded.is_new_versus(Some(&a)));
    }
}
