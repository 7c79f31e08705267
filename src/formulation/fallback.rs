//! Fallback selection for empty models.

use tracing::warn;

use crate::analysis::is_compatible;
use crate::models::{Assignment, Catalog, SolutionReport, SolveStatus};

use super::FormulationConfig;

/// Picks at most one forced assignment without a solver.
///
/// Scans flights, then pilots, then copilots in catalog order and returns
/// the first mutually compatible triple. The choice depends on catalog
/// order; pass [`Catalog::sorted_by_id`] for an order-independent result.
pub fn fallback(catalog: &Catalog, config: &FormulationConfig) -> SolutionReport {
    let total_flights = catalog.flights.len();

    for flight in &catalog.flights {
        let Some(pilot) = catalog.pilots.iter().find(|p| is_compatible(flight, p)) else {
            continue;
        };
        let Some(copilot) = catalog.copilots.iter().find(|c| is_compatible(flight, c)) else {
            continue;
        };

        let assignment = Assignment::new(flight, pilot, copilot, config.base_penalty_coeff);
        return SolutionReport::from_assignments(SolveStatus::Fallback, vec![assignment], total_flights)
            .with_objective(Some(1.0))
            .with_message(format!(
                "fallback: forced assignment of flight '{}' to '{}' and '{}'",
                flight.id, pilot.id, copilot.id
            ));
    }

    warn!(flights = total_flights, "fallback found no compatible crew pair");
    SolutionReport::empty(SolveStatus::Fallback, total_flights)
        .with_objective(Some(0.0))
        .with_message("fallback: no compatible flight/pilot/copilot combination")
}
