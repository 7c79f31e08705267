//! Randomized invariant checks over generated catalogs.

use proptest::prelude::*;

use u_crew::formulation::FormulationConfig;
use u_crew::generate::CatalogGenerator;
use u_crew::milp::{GoodLpSolver, SolverConfig};
use u_crew::models::SolveStatus;
use u_crew::pipeline::solve;
use u_crew::validation::verify_report;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn solved_rosters_respect_invariants(
        seed in any::<u64>(),
        flights in 1usize..=6,
        crew in 1usize..=3,
        lambda in prop::sample::select(vec![0.0, 0.5, 1.0]),
    ) {
        let catalog = CatalogGenerator::new(seed).with_counts(flights, crew, crew).generate();
        let config = FormulationConfig::default().with_lambda(lambda);

        let report = solve(&catalog, &config, &GoodLpSolver::new(), &SolverConfig::default())
            .expect("generated catalogs are valid");

        prop_assert!(matches!(report.status, SolveStatus::Optimal | SolveStatus::Fallback));
        prop_assert!(verify_report(&catalog, &config, &report).is_empty());
        prop_assert!(report.flights_served() <= catalog.flights.len());
        let cost: f64 = report.assignments.iter().map(|a| a.total_cost()).sum();
        prop_assert!((report.total_cost - cost).abs() < 1e-6);
    }

    #[test]
    fn longer_rest_never_improves_objective(
        seed in any::<u64>(),
        flights in 2usize..=6,
        lambda in prop::sample::select(vec![0.0, 0.5, 1.0]),
    ) {
        let catalog = CatalogGenerator::new(seed)
            .with_counts(flights, 2, 2)
            .with_horizon(24.0)
            .generate();
        let config = FormulationConfig::default().with_lambda(lambda);
        let run = |min_rest: f64| {
            solve(&catalog, &config.clone().with_min_rest(min_rest), &GoodLpSolver::new(), &SolverConfig::default())
                .expect("generated catalogs are valid")
        };
        let (strict, relaxed) = (run(10.0), run(0.0));

        if strict.status == SolveStatus::Optimal && relaxed.status == SolveStatus::Optimal {
            let (Some(strict_obj), Some(relaxed_obj)) = (strict.objective_value, relaxed.objective_value) else {
                return Err(TestCaseError::fail("optimal report without objective"));
            };
            prop_assert!(
                strict_obj <= relaxed_obj + 1e-6,
                "min_rest 10 gave {strict_obj}, min_rest 0 gave {relaxed_obj}"
            );
        }
        if lambda >= 1.0 {
            prop_assert!(strict.flights_served() <= relaxed.flights_served());
        }
    }
}
