//! Solution extraction.
//!
//! Decodes a solver valuation back into assignments. Deterministic: the
//! same model and valuation always yield the same, identically ordered
//! report.

use tracing::info;

use crate::milp::{MilpSolution, SolverStatus};
use crate::models::{SolutionReport, SolveStatus};

use super::CrewModel;

/// Values above this threshold count as a selected binary variable.
const SELECTED: f64 = 0.5;

/// Decodes a solver result into a report.
///
/// Assignments are extracted for an optimal valuation, and for a
/// time-limited one when the solver kept an incumbent. Any other outcome
/// yields an empty report carrying the solver's status.
pub fn extract(model: &CrewModel<'_>, solution: &MilpSolution) -> SolutionReport {
    let total_flights = model.catalog().flights.len();
    let status = map_status(solution.status);

    if !solution.has_valuation() {
        let message = solution
            .message
            .clone()
            .unwrap_or_else(|| format!("no solution ({})", status.as_str()));
        return SolutionReport::empty(status, total_flights)
            .with_message(message)
            .with_solve_time(solution.solve_time);
    }

    let assignments = model
        .triples()
        .iter()
        .filter(|t| solution.value(t.var.index()) > SELECTED)
        .map(|t| model.assignment(t))
        .collect();

    let report = SolutionReport::from_assignments(status, assignments, total_flights)
        .with_objective(solution.objective_value)
        .with_solve_time(solution.solve_time);
    let message = format!(
        "{} assignment(s) found, {:.1}% coverage",
        report.flights_served(),
        report.coverage_rate * 100.0
    );

    info!(
        status = status.as_str(),
        served = report.flights_served(),
        total_cost = report.total_cost,
        "solution extracted"
    );

    report.with_message(message)
}

fn map_status(status: SolverStatus) -> SolveStatus {
    match status {
        SolverStatus::Optimal => SolveStatus::Optimal,
        SolverStatus::Infeasible => SolveStatus::Infeasible,
        SolverStatus::TimeLimit => SolveStatus::TimeLimit,
        SolverStatus::Other => SolveStatus::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::{CrewModelBuilder, FormulationConfig};
    use crate::models::Catalog;

    fn example_model(catalog: &Catalog) -> CrewModel<'_> {
        CrewModelBuilder::new(catalog, FormulationConfig::default())
            .build()
            .into_model()
            .unwrap()
    }

    #[test]
    fn test_extract_selected_variables() {
        let catalog = Catalog::example();
        let model = example_model(&catalog);
        let n = model.milp().variable_count();

        // select the last candidate and the first one
        let mut values = vec![0.0; n];
        values[n - 1] = 1.0;
        values[0] = 0.9999;
        let solution = MilpSolution::optimal(values, 42.0);

        let report = extract(&model, &solution);
        assert_eq!(report.status, SolveStatus::Optimal);
        assert_eq!(report.flights_served(), 2);
        assert_eq!(report.objective_value, Some(42.0));
        // ordered by departure
        assert!(report.assignments[0].departure <= report.assignments[1].departure);
        let expected: f64 = report.assignments.iter().map(|a| a.total_cost()).sum();
        assert!((report.total_cost - expected).abs() < 1e-10);
        assert!((report.coverage_rate - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let catalog = Catalog::example();
        let model = example_model(&catalog);
        let values: Vec<f64> = (0..model.milp().variable_count())
            .map(|i| if i % 3 == 0 { 1.0 } else { 0.0 })
            .collect();
        let solution = MilpSolution::optimal(values, 0.0);

        assert_eq!(extract(&model, &solution), extract(&model, &solution));
    }

    #[test]
    fn test_extract_without_valuation() {
        let catalog = Catalog::example();
        let model = example_model(&catalog);

        let report = extract(&model, &MilpSolution::empty(SolverStatus::Infeasible));
        assert_eq!(report.status, SolveStatus::Infeasible);
        assert!(!report.has_assignments());
        assert_eq!(report.total_flights, 4);

        let report = extract(&model, &MilpSolution::empty(SolverStatus::TimeLimit));
        assert_eq!(report.status, SolveStatus::TimeLimit);
        assert!(!report.has_assignments());
    }

    #[test]
    fn test_extract_time_limit_incumbent() {
        let catalog = Catalog::example();
        let model = example_model(&catalog);
        let mut values = vec![0.0; model.milp().variable_count()];
        values[0] = 1.0;
        let mut solution = MilpSolution::empty(SolverStatus::TimeLimit);
        solution.values = Some(values);

        let report = extract(&model, &solution);
        assert_eq!(report.status, SolveStatus::TimeLimit);
        assert_eq!(report.flights_served(), 1);
    }
}
