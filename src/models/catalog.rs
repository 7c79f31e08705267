//! Domain catalog.
//!
//! The read-only input of one solve: flights plus the two crew pools.
//! A catalog is supplied fresh by the caller for every solve and is never
//! mutated by the formulation.

use serde::{Deserialize, Serialize};

use super::{CrewMember, CrewRole, Flight};
use crate::formulation::FormulationConfig;

/// Flights, pilots and copilots for a single solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Flights to staff.
    #[serde(default)]
    pub flights: Vec<Flight>,
    /// Captain pool.
    #[serde(default)]
    pub pilots: Vec<CrewMember>,
    /// First officer pool.
    #[serde(alias = "copilotes", default)]
    pub copilots: Vec<CrewMember>,
}

/// A catalog bundled with its formulation parameters.
///
/// Mirrors the `{ flights, pilots, copilots, parameters }` document layout
/// used by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Domain data.
    #[serde(flatten)]
    pub catalog: Catalog,
    /// Formulation parameters.
    #[serde(default)]
    pub parameters: FormulationConfig,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flight.
    pub fn with_flight(mut self, flight: Flight) -> Self {
        self.flights.push(flight);
        self
    }

    /// Adds a pilot.
    pub fn with_pilot(mut self, pilot: CrewMember) -> Self {
        self.pilots.push(pilot);
        self
    }

    /// Adds a copilot.
    pub fn with_copilot(mut self, copilot: CrewMember) -> Self {
        self.copilots.push(copilot);
        self
    }

    /// Returns the pool for a role.
    pub fn pool(&self, role: CrewRole) -> &[CrewMember] {
        match role {
            CrewRole::Pilot => &self.pilots,
            CrewRole::Copilot => &self.copilots,
        }
    }

    /// Finds a flight by id.
    pub fn flight(&self, id: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    /// Finds a crew member by role and id.
    pub fn crew_member(&self, role: CrewRole, id: &str) -> Option<&CrewMember> {
        self.pool(role).iter().find(|c| c.id == id)
    }

    /// Total crew members across both pools.
    pub fn crew_count(&self) -> usize {
        self.pilots.len() + self.copilots.len()
    }

    /// Whether any of the three collections is empty.
    ///
    /// Such a catalog can never produce an assignment.
    pub fn has_empty_pool(&self) -> bool {
        self.flights.is_empty() || self.pilots.is_empty() || self.copilots.is_empty()
    }

    /// Returns a copy with every collection sorted lexicographically by id.
    ///
    /// The fallback selector scans in catalog order; sorting first makes its
    /// choice independent of how the caller happened to order the input.
    pub fn sorted_by_id(&self) -> Self {
        let mut sorted = self.clone();
        sorted.flights.sort_by(|a, b| a.id.cmp(&b.id));
        sorted.pilots.sort_by(|a, b| a.id.cmp(&b.id));
        sorted.copilots.sort_by(|a, b| a.id.cmp(&b.id));
        sorted
    }

    /// Demonstration catalog: four flights, three pilots, three copilots.
    ///
    /// Every flight is staffable by at least one pilot/copilot pair.
    pub fn example() -> Self {
        Self::new()
            .with_flight(
                Flight::new("AF1001", 8.0, 10.0)
                    .with_aircraft("A320")
                    .with_route("CDG", "MRS")
                    .with_language("FR")
                    .with_operational_cost(500.0),
            )
            .with_flight(
                Flight::new("AF1002", 11.0, 13.0)
                    .with_aircraft("A320")
                    .with_route("ORY", "CDG")
                    .with_language("FR")
                    .with_operational_cost(550.0),
            )
            .with_flight(
                Flight::new("AF1003", 14.0, 16.0)
                    .with_aircraft("B737")
                    .with_route("CDG", "ORY")
                    .with_language("EN")
                    .with_operational_cost(600.0),
            )
            .with_flight(
                Flight::new("AF1004", 17.0, 19.0)
                    .with_aircraft("A320")
                    .with_route("MRS", "CDG")
                    .with_language("FR")
                    .with_language("EN")
                    .with_operational_cost(650.0),
            )
            .with_pilot(
                CrewMember::new("P001")
                    .with_name("Jean Martin")
                    .with_qualification("A320")
                    .with_language("FR")
                    .with_hourly_cost(150.0)
                    .with_home_base("CDG")
                    .with_hours(0.0, 100.0),
            )
            .with_pilot(
                CrewMember::new("P002")
                    .with_name("Pierre Dubois")
                    .with_qualification("A320")
                    .with_qualification("B737")
                    .with_language("FR")
                    .with_language("EN")
                    .with_hourly_cost(160.0)
                    .with_home_base("ORY")
                    .with_hours(0.0, 100.0),
            )
            .with_pilot(
                CrewMember::new("P003")
                    .with_name("John Smith")
                    .with_qualification("B737")
                    .with_language("EN")
                    .with_hourly_cost(155.0)
                    .with_home_base("MRS")
                    .with_hours(0.0, 100.0),
            )
            .with_copilot(
                CrewMember::new("C001")
                    .with_name("Marie Lambert")
                    .with_qualification("A320")
                    .with_language("FR")
                    .with_hourly_cost(120.0)
                    .with_home_base("CDG")
                    .with_hours(0.0, 90.0),
            )
            .with_copilot(
                CrewMember::new("C002")
                    .with_name("Sophie Bernard")
                    .with_qualification("A320")
                    .with_qualification("B737")
                    .with_language("FR")
                    .with_language("EN")
                    .with_hourly_cost(125.0)
                    .with_home_base("ORY")
                    .with_hours(0.0, 90.0),
            )
            .with_copilot(
                CrewMember::new("C003")
                    .with_name("Emma Wilson")
                    .with_qualification("B737")
                    .with_language("EN")
                    .with_hourly_cost(130.0)
                    .with_home_base("MRS")
                    .with_hours(0.0, 90.0),
            )
    }
}
