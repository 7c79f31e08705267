//! End-to-end crew assignment scenarios solved with the good_lp backend.

use u_crew::formulation::FormulationConfig;
use u_crew::milp::{GoodLpSolver, SolverConfig};
use u_crew::models::{Catalog, CrewMember, CrewRole, Flight, SolutionReport, SolveStatus};
use u_crew::pipeline::solve;
use u_crew::validation::verify_report;

fn a320(id: &str, hourly_cost: f64) -> CrewMember {
    CrewMember::new(id)
        .with_qualification("A320")
        .with_language("FR")
        .with_hourly_cost(hourly_cost)
        .with_home_base("CDG")
}

fn flight(id: &str, departure: f64, arrival: f64) -> Flight {
    Flight::new(id, departure, arrival)
        .with_aircraft("A320")
        .with_route("ORY", "CDG")
        .with_language("FR")
        .with_operational_cost(500.0)
}

fn run(catalog: &Catalog, config: &FormulationConfig) -> SolutionReport {
    let report = solve(catalog, config, &GoodLpSolver::new(), &SolverConfig::default()).unwrap();
    assert!(
        verify_report(catalog, config, &report).is_empty(),
        "report breaks an assignment invariant: {report:?}"
    );
    report
}

#[test]
fn test_single_flight_single_team() {
    let catalog = Catalog::new()
        .with_flight(flight("F1", 8.0, 10.0))
        .with_pilot(a320("P1", 150.0))
        .with_copilot(a320("C1", 120.0));

    let report = run(&catalog, &FormulationConfig::default());
    assert_eq!(report.status, SolveStatus::Optimal);
    assert_eq!(report.flights_served(), 1);

    let a = &report.assignments[0];
    assert_eq!((a.pilot_id.as_str(), a.copilot_id.as_str()), ("P1", "C1"));
    // (150 + 120) * 2h + 500, both crew based at the arrival station
    assert!((a.total_cost() - 1040.0).abs() < 1e-6);
    assert!((a.cost.base_penalty - 0.0).abs() < 1e-10);
    assert!((report.coverage_rate - 1.0).abs() < 1e-10);
}

#[test]
fn test_overlapping_flights_share_one_pilot() {
    let catalog = Catalog::new()
        .with_flight(flight("F1", 8.0, 10.0))
        .with_flight(flight("F2", 9.0, 11.0))
        .with_pilot(a320("P1", 150.0))
        .with_copilot(a320("C1", 120.0))
        .with_copilot(a320("C2", 120.0));

    let report = run(&catalog, &FormulationConfig::default().with_lambda(1.0));
    assert_eq!(report.flights_served(), 1);
    assert_eq!(report.assignments_for_crew(CrewRole::Pilot, "P1").len(), 1);
}

#[test]
fn test_identical_flights_share_one_pilot() {
    let catalog = Catalog::new()
        .with_flight(flight("F1", 8.0, 10.0))
        .with_flight(flight("F2", 8.0, 10.0))
        .with_pilot(a320("P1", 150.0))
        .with_copilot(a320("C1", 120.0))
        .with_copilot(a320("C2", 120.0));

    for lambda in [0.0, 0.5, 1.0] {
        let report = run(&catalog, &FormulationConfig::default().with_lambda(lambda));
        assert_eq!(report.flights_served(), 1, "lambda {lambda}");
        assert_eq!(report.assignments_for_crew(CrewRole::Pilot, "P1").len(), 1);
    }
}

#[test]
fn test_short_rest_blocks_second_flight() {
    let catalog = Catalog::new()
        .with_flight(flight("F1", 8.0, 10.0))
        .with_flight(flight("F2", 13.0, 15.0))
        .with_pilot(a320("P1", 150.0))
        .with_copilot(a320("C1", 120.0))
        .with_copilot(a320("C2", 120.0));
    let config = FormulationConfig::default().with_lambda(1.0);

    let report = run(&catalog, &config.clone().with_min_rest(8.0));
    assert_eq!(report.flights_served(), 1);

    // a 3h gap is enough once the rest requirement drops to 2h
    let report = run(&catalog, &config.with_min_rest(2.0));
    assert_eq!(report.flights_served(), 2);
}

#[test]
fn test_unqualified_crew_falls_back() {
    let catalog = Catalog::new()
        .with_flight(flight("F1", 8.0, 10.0).with_aircraft("B777"))
        .with_pilot(a320("P1", 150.0))
        .with_copilot(a320("C1", 120.0));

    let report = run(&catalog, &FormulationConfig::default());
    assert_eq!(report.status, SolveStatus::Fallback);
    assert!(!report.has_assignments());
    assert_eq!(report.total_flights, 1);
}

#[test]
fn test_cost_only_picks_cheaper_team() {
    let catalog = Catalog::new()
        .with_flight(flight("F1", 8.0, 10.0))
        .with_pilot(a320("P_EXPENSIVE", 200.0))
        .with_pilot(a320("P_CHEAP", 100.0))
        .with_copilot(a320("C1", 120.0));

    let report = run(&catalog, &FormulationConfig::default().with_lambda(0.0));
    assert_eq!(report.status, SolveStatus::Optimal);
    assert_eq!(report.flights_served(), 1);
    assert_eq!(report.assignments[0].pilot_id, "P_CHEAP");
}

#[test]
fn test_zero_duty_budget_never_assigned() {
    let catalog = Catalog::new()
        .with_flight(flight("F1", 8.0, 10.0))
        .with_flight(flight("F2", 20.0, 22.0))
        .with_pilot(a320("P_OFF", 10.0).with_hours(0.0, 0.0))
        .with_pilot(a320("P1", 150.0))
        .with_copilot(a320("C1", 120.0))
        .with_copilot(a320("C2", 120.0));

    for lambda in [0.0, 0.5, 1.0] {
        let report = run(&catalog, &FormulationConfig::default().with_lambda(lambda));
        assert!(report.assignments_for_crew(CrewRole::Pilot, "P_OFF").is_empty(), "lambda {lambda}");
    }
}

#[test]
fn test_example_catalog_coverage_depends_on_rest() {
    let catalog = Catalog::example();
    let config = FormulationConfig::default().with_lambda(1.0);

    // every pair of flights is within 8h, so each crew member flies once
    // and three pilots cap coverage at three flights
    let strict = run(&catalog, &config.clone().with_min_rest(8.0));
    assert_eq!(strict.flights_served(), 3);

    let relaxed = run(&catalog, &config.with_min_rest(0.0));
    assert_eq!(relaxed.flights_served(), 4);
    assert!((relaxed.coverage_rate - 1.0).abs() < 1e-10);
}

#[test]
fn test_optional_assignment_allows_empty_roster() {
    let catalog = Catalog::new()
        .with_flight(flight("F1", 8.0, 10.0))
        .with_pilot(a320("P1", 150.0))
        .with_copilot(a320("C1", 120.0));
    let config = FormulationConfig::default()
        .with_lambda(0.0)
        .with_require_assignment(false);

    // every assignment only costs money
    let report = run(&catalog, &config);
    assert_eq!(report.status, SolveStatus::Optimal);
    assert!(!report.has_assignments());
}

#[test]
fn test_report_serializes() {
    let report = run(&Catalog::example(), &FormulationConfig::default());
    let json = serde_json::to_string(&report).unwrap();
    let back: SolutionReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.status, report.status);
    assert_eq!(back.assignments, report.assignments);
}
