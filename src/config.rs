//! Automation configuration.
//!
//! Everything here is operator-adjustable except ground-equipment removal on
//! departure, which is always active and therefore has no switch.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelUnit {
    Kg,
    Lb,
}

pub const KG_PER_LB: f64 = 0.453_592_37;

impl FuelUnit {
    pub fn to_kg(self, amount: f64) -> f64 {
        match self {
            FuelUnit::Kg => amount,
            FuelUnit::Lb => amount * KG_PER_LB,
        }
    }

    pub fn from_kg(self, amount_kg: f64) -> f64 {
        match self {
            FuelUnit::Kg => amount_kg,
            FuelUnit::Lb => amount_kg / KG_PER_LB,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    pub auto_refuel: bool,
    pub auto_boarding: bool,
    pub auto_deboarding: bool,
    pub call_catering: bool,
    pub connect_pca: bool,
    pub refuel_rate_kg_s: f64,
    pub unit: FuelUnit,
    pub tick_interval: Duration,
    pub loadsheet_max_retries: u32,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            auto_refuel: true,
            auto_boarding: true,
            auto_deboarding: true,
            call_catering: true,
            connect_pca: true,
            refuel_rate_kg_s: 28.0,
            unit: FuelUnit::Kg,
            tick_interval: Duration::from_secs(1),
            loadsheet_max_retries: 3,
        }
    }
}

impl AutomationConfig {
    /// Construction-time validation; a zero tick interval or a non-positive
    /// refuel rate would wedge the tick loop.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval.is_zero() {
            return Err(String::from("tick_interval must be positive"));
        }
        if self.refuel_rate_kg_s <= 0.0 {
            return Err(String::from("refuel_rate_kg_s must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_round_trip() {
        let kg = FuelUnit::Lb.to_kg(1000.0);
        assert!((FuelUnit::Lb.from_kg(kg) - 1000.0).abs() < 1e-9);
        assert_eq!(FuelUnit::Kg.to_kg(5000.0), 5000.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AutomationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = AutomationConfig { refuel_rate_kg_s: 0.0, ..AutomationConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = AutomationConfig { tick_interval: Duration::ZERO, ..AutomationConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
