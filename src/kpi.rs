//! Crew assignment quality metrics (KPIs).
//!
//! Computes roster indicators from a finished report and the catalog it
//! was solved for.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage | Flights served / flights in the catalog |
//! | Total Cost | Sum of assignment costs |
//! | Avg Cost | Total cost / flights served |
//! | Crew Hours | Assigned block hours per crew member |
//! | Crew Utilization | Crew members flying at least once / crew size |
//! | Under Minimum | Crew members below their contractual minimum hours |

use std::collections::BTreeMap;

use crate::models::{Catalog, CrewMember, CrewRole, SolutionReport};

/// Roster performance indicators.
///
/// Hours are in the same unit as flight times.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewKpi {
    /// Fraction of catalog flights served (0.0..1.0).
    pub coverage_rate: f64,
    /// Number of flights served.
    pub flights_served: usize,
    /// Sum of assignment costs.
    pub total_cost: f64,
    /// Average cost per served flight; 0.0 with nothing served.
    pub avg_cost_per_flight: f64,
    /// Assigned hours per pilot, keyed by ID. Every pilot appears.
    pub pilot_hours: BTreeMap<String, f64>,
    /// Assigned hours per copilot, keyed by ID. Every copilot appears.
    pub copilot_hours: BTreeMap<String, f64>,
    /// Fraction of crew members with at least one flight (0.0..1.0).
    pub crew_utilization: f64,
    /// Crew members assigned fewer hours than their `min_hours`.
    pub under_min_hours: Vec<(CrewRole, String)>,
}

impl CrewKpi {
    /// Computes KPIs from a report and its catalog.
    pub fn calculate(report: &SolutionReport, catalog: &Catalog) -> Self {
        let pilot_hours = hours_by_member(report, &catalog.pilots, CrewRole::Pilot);
        let copilot_hours = hours_by_member(report, &catalog.copilots, CrewRole::Copilot);

        let flying = pilot_hours
            .values()
            .chain(copilot_hours.values())
            .filter(|h| **h > 0.0)
            .count();
        let crew_count = catalog.crew_count();
        let crew_utilization = if crew_count == 0 {
            0.0
        } else {
            flying as f64 / crew_count as f64
        };

        let mut under_min_hours = Vec::new();
        for (role, hours) in [(CrewRole::Pilot, &pilot_hours), (CrewRole::Copilot, &copilot_hours)] {
            for member in catalog.pool(role) {
                let assigned = hours.get(&member.id).copied().unwrap_or(0.0);
                if assigned < member.min_hours {
                    under_min_hours.push((role, member.id.clone()));
                }
            }
        }

        let flights_served = report.flights_served();
        let coverage_rate = if catalog.flights.is_empty() {
            0.0
        } else {
            flights_served as f64 / catalog.flights.len() as f64
        };
        let avg_cost_per_flight = if flights_served == 0 {
            0.0
        } else {
            report.total_cost / flights_served as f64
        };

        Self {
            coverage_rate,
            flights_served,
            total_cost: report.total_cost,
            avg_cost_per_flight,
            pilot_hours,
            copilot_hours,
            crew_utilization,
            under_min_hours,
        }
    }

    /// Whether the roster meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, max_avg_cost: f64) -> bool {
        self.coverage_rate >= min_coverage && self.avg_cost_per_flight <= max_avg_cost
    }
}

fn hours_by_member(
    report: &SolutionReport,
    pool: &[CrewMember],
    role: CrewRole,
) -> BTreeMap<String, f64> {
    let mut hours: BTreeMap<String, f64> = pool.iter().map(|m| (m.id.clone(), 0.0)).collect();
    for a in &report.assignments {
        *hours.entry(a.crew_id(role).to_string()).or_insert(0.0) += a.duration;
    }
    hours
}
