//! Flight model.
//!
//! A flight is a unit of service to be staffed by one pilot and one
//! copilot. Times are expressed in hours on a single flat timeline
//! (e.g., hours since the start of the planning day).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A flight to be staffed.
///
/// # Time Representation
/// `departure` and `arrival` are real-valued hours relative to the planning
/// epoch. `duration` is the billable flight time; it is not required to
/// equal `arrival - departure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Unique flight identifier (e.g., "AF1001").
    pub id: String,
    /// Departure time (hours).
    pub departure: f64,
    /// Arrival time (hours).
    pub arrival: f64,
    /// Billable flight time (hours).
    pub duration: f64,
    /// Aircraft type the crew must be qualified for (e.g., "A320").
    pub aircraft_type: String,
    /// Departure station code.
    pub dep_base: String,
    /// Arrival station code.
    pub arr_base: String,
    /// Languages every crew member must speak.
    #[serde(alias = "languages", default)]
    pub required_languages: BTreeSet<String>,
    /// Fixed operational cost of flying this leg.
    #[serde(alias = "op_cost", default)]
    pub operational_cost: f64,
}

impl Flight {
    /// Creates a flight between `departure` and `arrival`.
    ///
    /// The duration defaults to `arrival - departure`.
    pub fn new(id: impl Into<String>, departure: f64, arrival: f64) -> Self {
        Self {
            id: id.into(),
            departure,
            arrival,
            duration: arrival - departure,
            aircraft_type: String::new(),
            dep_base: String::new(),
            arr_base: String::new(),
            required_languages: BTreeSet::new(),
            operational_cost: 0.0,
        }
    }

    /// Overrides the billable duration.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the aircraft type.
    pub fn with_aircraft(mut self, aircraft_type: impl Into<String>) -> Self {
        self.aircraft_type = aircraft_type.into();
        self
    }

    /// Sets departure and arrival stations.
    pub fn with_route(mut self, dep_base: impl Into<String>, arr_base: impl Into<String>) -> Self {
        self.dep_base = dep_base.into();
        self.arr_base = arr_base.into();
        self
    }

    /// Adds a required language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.required_languages.insert(language.into());
        self
    }

    /// Sets the operational cost.
    pub fn with_operational_cost(mut self, cost: f64) -> Self {
        self.operational_cost = cost;
        self
    }

    /// Elapsed time between departure and arrival (hours).
    #[inline]
    pub fn block_time(&self) -> f64 {
        self.arrival - self.departure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_builder() {
        let f = Flight::new("AF1001", 8.0, 10.0)
            .with_aircraft("A320")
            .with_route("CDG", "MRS")
            .with_language("FR")
            .with_language("EN")
            .with_operational_cost(500.0);

        assert_eq!(f.id, "AF1001");
        assert_eq!(f.aircraft_type, "A320");
        assert_eq!(f.dep_base, "CDG");
        assert_eq!(f.arr_base, "MRS");
        assert!(f.required_languages.contains("FR"));
        assert_eq!(f.required_languages.len(), 2);
        assert!((f.duration - 2.0).abs() < 1e-10);
        assert!((f.operational_cost - 500.0).abs() < 1e-10);
    }

    #[test]
    fn test_duration_override() {
        let f = Flight::new("F1", 8.0, 10.0).with_duration(1.5);
        assert!((f.duration - 1.5).abs() < 1e-10);
        assert!((f.block_time() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_deserialize_legacy_field_names() {
        let json = r#"{
            "id": "AF1002", "departure": 11, "arrival": 13, "duration": 2,
            "aircraft_type": "A320", "dep_base": "ORY", "arr_base": "CDG",
            "languages": ["FR"], "op_cost": 550
        }"#;
        let f: Flight = serde_json::from_str(json).unwrap();
        assert!(f.required_languages.contains("FR"));
        assert!((f.operational_cost - 550.0).abs() < 1e-10);
    }
}
