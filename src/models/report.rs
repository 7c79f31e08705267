//! Solution report model.
//!
//! A report is the sole persisted output of a solve: the realized
//! assignments with their itemized cost, plus aggregate figures and the
//! status the solve ended in. Reports may be checked after the fact; any
//! broken invariant is described as a [`Violation`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;

use super::{CrewMember, CrewRole, Flight};

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal assignment.
    Optimal,
    /// The constraints admit no solution.
    Infeasible,
    /// The solver ran out of time; the report holds the incumbent, if any.
    TimeLimit,
    /// Any other solver outcome (unbounded, numerical trouble, canceled).
    Other,
    /// No candidate triple existed; the fallback selector produced the report.
    Fallback,
    /// One of flights, pilots or copilots was empty; nothing was built.
    InsufficientData,
    /// The solver adapter faulted.
    Error,
}

impl SolveStatus {
    /// Upper-case display string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Infeasible => "INFEASIBLE",
            Self::TimeLimit => "TIME_LIMIT",
            Self::Other => "OTHER",
            Self::Fallback => "FALLBACK",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::Error => "ERROR",
        }
    }
}

/// Itemized cost of staffing one flight with one crew pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// `(pilot.hourly_cost + copilot.hourly_cost) * flight.duration`.
    pub salary: f64,
    /// The flight's operational cost.
    pub operational: f64,
    /// `penalty_coeff` per crew member whose home base differs from the
    /// flight's arrival station.
    pub base_penalty: f64,
}

impl CostBreakdown {
    /// Computes the cost of a (flight, pilot, copilot) triple.
    pub fn for_triple(
        flight: &Flight,
        pilot: &CrewMember,
        copilot: &CrewMember,
        penalty_coeff: f64,
    ) -> Self {
        let mismatches = [pilot, copilot]
            .iter()
            .filter(|c| c.home_base != flight.arr_base)
            .count();

        Self {
            salary: (pilot.hourly_cost + copilot.hourly_cost) * flight.duration,
            operational: flight.operational_cost,
            base_penalty: penalty_coeff * mismatches as f64,
        }
    }

    /// Sum of all components.
    #[inline]
    pub fn total(&self) -> f64 {
        self.salary + self.operational + self.base_penalty
    }
}

/// A realized (flight, pilot, copilot) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Served flight.
    pub flight_id: String,
    /// Assigned pilot.
    pub pilot_id: String,
    /// Assigned copilot.
    pub copilot_id: String,
    /// Aircraft type (denormalized for display).
    pub aircraft_type: String,
    /// Departure time (hours).
    pub departure: f64,
    /// Arrival time (hours).
    pub arrival: f64,
    /// Billable duration (hours).
    pub duration: f64,
    /// Itemized cost.
    pub cost: CostBreakdown,
}

impl Assignment {
    /// Realizes a triple with the given base-mismatch coefficient.
    pub fn new(flight: &Flight, pilot: &CrewMember, copilot: &CrewMember, penalty_coeff: f64) -> Self {
        Self {
            flight_id: flight.id.clone(),
            pilot_id: pilot.id.clone(),
            copilot_id: copilot.id.clone(),
            aircraft_type: flight.aircraft_type.clone(),
            departure: flight.departure,
            arrival: flight.arrival,
            duration: flight.duration,
            cost: CostBreakdown::for_triple(flight, pilot, copilot, penalty_coeff),
        }
    }

    /// Total cost of this assignment.
    #[inline]
    pub fn total_cost(&self) -> f64 {
        self.cost.total()
    }

    /// ID of the crew member in the seat of `role`.
    pub fn crew_id(&self, role: CrewRole) -> &str {
        match role {
            CrewRole::Pilot => &self.pilot_id,
            CrewRole::Copilot => &self.copilot_id,
        }
    }

    /// Whether the member `crew_id` of the `role` pool fills that seat.
    ///
    /// Pilot and copilot pools are disjoint, so the same ID may name two
    /// different people.
    pub fn involves(&self, role: CrewRole, crew_id: &str) -> bool {
        self.crew_id(role) == crew_id
    }

    fn chronological(a: &Self, b: &Self) -> Ordering {
        a.departure
            .total_cmp(&b.departure)
            .then_with(|| a.flight_id.cmp(&b.flight_id))
    }
}

/// Result of one solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// How the solve ended.
    pub status: SolveStatus,
    /// Human-readable summary.
    pub message: String,
    /// Objective value reported by the solver (if any).
    pub objective_value: Option<f64>,
    /// Wall-clock time spent in the solver.
    pub solve_time: Duration,
    /// Assignments ordered by departure time, then flight id.
    pub assignments: Vec<Assignment>,
    /// Sum of assignment costs.
    pub total_cost: f64,
    /// Served flights / catalog flights (0.0 when the catalog has none).
    pub coverage_rate: f64,
    /// Number of flights in the catalog.
    pub total_flights: usize,
}

impl SolutionReport {
    /// A report with no assignments.
    pub fn empty(status: SolveStatus, total_flights: usize) -> Self {
        Self::from_assignments(status, Vec::new(), total_flights)
    }

    /// Builds a report from assignments, sorting them and computing aggregates.
    pub fn from_assignments(
        status: SolveStatus,
        mut assignments: Vec<Assignment>,
        total_flights: usize,
    ) -> Self {
        assignments.sort_by(Assignment::chronological);
        let total_cost = assignments.iter().map(Assignment::total_cost).sum();
        let coverage_rate = if total_flights == 0 {
            0.0
        } else {
            assignments.len() as f64 / total_flights as f64
        };

        Self {
            status,
            message: String::new(),
            objective_value: None,
            solve_time: Duration::ZERO,
            assignments,
            total_cost,
            coverage_rate,
            total_flights,
        }
    }

    /// Sets the summary message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the objective value.
    pub fn with_objective(mut self, objective_value: Option<f64>) -> Self {
        self.objective_value = objective_value;
        self
    }

    /// Sets the solve time.
    pub fn with_solve_time(mut self, solve_time: Duration) -> Self {
        self.solve_time = solve_time;
        self
    }

    /// Number of flights served.
    pub fn flights_served(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the report carries at least one assignment.
    pub fn has_assignments(&self) -> bool {
        !self.assignments.is_empty()
    }

    /// Finds the assignment serving a flight.
    pub fn assignment_for_flight(&self, flight_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.flight_id == flight_id)
    }

    /// All assignments a crew member of the `role` pool takes part in.
    pub fn assignments_for_crew(&self, role: CrewRole, crew_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.involves(role, crew_id))
            .collect()
    }

    /// Assigned hours of a crew member of the `role` pool.
    pub fn crew_hours(&self, role: CrewRole, crew_id: &str) -> f64 {
        self.assignments_for_crew(role, crew_id)
            .iter()
            .map(|a| a.duration)
            .sum()
    }
}

/// A broken invariant found in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity id (flight or crew member).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of report violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A flight is served more than once.
    DuplicateFlight,
    /// A crew member flies two overlapping flights.
    CrewOverlap,
    /// A crew member flies two flights separated by less than the minimum rest.
    InsufficientRest,
    /// A crew member's assigned hours exceed their maximum.
    DutyHoursExceeded,
    /// A crew member lacks the rating or languages a flight requires.
    IncompatibleCrew,
    /// An assignment references an id missing from the catalog.
    UnknownEntity,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}
