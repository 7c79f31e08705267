//! Crew member model.
//!
//! Pilots and copilots share one structure; the pool a member belongs to
//! (see [`Catalog`](super::Catalog)) determines the role they fill.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Seat a crew member occupies on a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CrewRole {
    /// Captain seat.
    Pilot,
    /// First officer seat.
    Copilot,
}

impl CrewRole {
    /// Short tag used in constraint and variable names.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Pilot => "p",
            Self::Copilot => "c",
        }
    }
}

impl fmt::Display for CrewRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pilot => f.write_str("pilot"),
            Self::Copilot => f.write_str("copilot"),
        }
    }
}

/// A pilot or copilot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    /// Unique identifier within the member's pool.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Aircraft types the member is rated on.
    #[serde(default)]
    pub qualifications: BTreeSet<String>,
    /// Languages the member speaks.
    #[serde(default)]
    pub languages: BTreeSet<String>,
    /// Salary cost per flight hour.
    #[serde(default)]
    pub hourly_cost: f64,
    /// Home station code.
    #[serde(alias = "base", default)]
    pub home_base: String,
    /// Contractual minimum flight hours (reported, not enforced).
    #[serde(default)]
    pub min_hours: f64,
    /// Maximum flight hours per planning period.
    pub max_hours: f64,
}

impl CrewMember {
    /// Creates a member with no ratings and an unlimited duty budget.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            qualifications: BTreeSet::new(),
            languages: BTreeSet::new(),
            hourly_cost: 0.0,
            home_base: String::new(),
            min_hours: 0.0,
            max_hours: f64::MAX,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an aircraft type rating.
    pub fn with_qualification(mut self, aircraft_type: impl Into<String>) -> Self {
        self.qualifications.insert(aircraft_type.into());
        self
    }

    /// Adds a spoken language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.insert(language.into());
        self
    }

    /// Sets the hourly cost.
    pub fn with_hourly_cost(mut self, cost: f64) -> Self {
        self.hourly_cost = cost;
        self
    }

    /// Sets the home station.
    pub fn with_home_base(mut self, base: impl Into<String>) -> Self {
        self.home_base = base.into();
        self
    }

    /// Sets the duty-hour window.
    pub fn with_hours(mut self, min_hours: f64, max_hours: f64) -> Self {
        self.min_hours = min_hours;
        self.max_hours = max_hours;
        self
    }

    /// Whether the member is rated on the aircraft type.
    pub fn is_qualified_for(&self, aircraft_type: &str) -> bool {
        self.qualifications.contains(aircraft_type)
    }

    /// Whether the member speaks the language.
    pub fn speaks(&self, language: &str) -> bool {
        self.languages.contains(language)
    }

    /// Display label: the name when set, the id otherwise.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
