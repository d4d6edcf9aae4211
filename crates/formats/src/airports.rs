use std::collections::BTreeMap;

use foundation::math::GeoCoordinate;
use serde::{Deserialize, Serialize};

/// Airport code to location lookup.
///
/// JSON form is an object keyed by code with `[lat, lon]` values:
/// `{"LHR": [51.47, -0.45], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirportTable {
    airports: BTreeMap<String, [f64; 2]>,
}

impl AirportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn insert(&mut self, code: impl Into<String>, location: GeoCoordinate) {
        self.airports
            .insert(code.into(), [location.lat_deg, location.lon_deg]);
    }

    pub fn get(&self, code: &str) -> Option<GeoCoordinate> {
        self.airports
            .get(code)
            .map(|[lat, lon]| GeoCoordinate::new(*lat, *lon))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.airports.keys().map(String::as_str)
    }
}
