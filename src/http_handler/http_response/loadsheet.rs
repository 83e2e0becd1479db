use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;
use std::collections::HashMap;

/// Loadsheet figures as computed by the backend's native engine. Only the
/// fields the orchestration core consumes are modeled; everything else in
/// the backend's answer is ignored by serde.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct LoadsheetData {
    zfw_kg: f64,
    tow_kg: f64,
    mac_zfw: f64,
    mac_tow: f64,
    pax_by_zone: HashMap<String, u32>,
    fuel_by_tank: HashMap<String, f64>,
}

impl SerdeJSONBodyHTTPResponseType for LoadsheetData {}

impl LoadsheetData {
    pub fn zfw_kg(&self) -> f64 { self.zfw_kg }
    pub fn tow_kg(&self) -> f64 { self.tow_kg }
    pub fn mac_zfw(&self) -> f64 { self.mac_zfw }
    pub fn mac_tow(&self) -> f64 { self.mac_tow }
    pub fn pax_by_zone(&self) -> &HashMap<String, u32> { &self.pax_by_zone }
    pub fn fuel_by_tank(&self) -> &HashMap<String, f64> { &self.fuel_by_tank }

    pub fn pax_total(&self) -> u32 { self.pax_by_zone.values().sum() }
}
