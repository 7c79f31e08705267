//! End-to-end solve pipeline.
//!
//! validate → build → solve → extract, or → fallback when the model is
//! empty. The pipeline is synchronous; [`spawn_solve`] runs it on a worker
//! thread for callers that must not block.
//!
//! Solver faults (errors and panics) are caught here, once, and turned into
//! a report with [`SolveStatus::Error`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tracing::{info, warn};

use crate::error::CrewError;
use crate::formulation::{extract, fallback, BuildOutcome, CrewModelBuilder, FormulationConfig};
use crate::milp::{MilpSolver, SolverConfig};
use crate::models::{Catalog, SolutionReport, SolveStatus};
use crate::validation::validate_catalog;

/// Solves a crew assignment problem.
///
/// # Errors
/// [`CrewError::InvalidData`] if the catalog or the parameters are malformed;
/// nothing is built in that case. Every other outcome, solver faults
/// included, is a report.
///
/// # Example
/// ```no_run
/// use u_crew::formulation::FormulationConfig;
/// use u_crew::milp::{GoodLpSolver, SolverConfig};
/// use u_crew::models::Catalog;
/// use u_crew::pipeline::solve;
///
/// let report = solve(
///     &Catalog::example(),
///     &FormulationConfig::default(),
///     &GoodLpSolver::new(),
///     &SolverConfig::default(),
/// )
/// .unwrap();
/// println!("{} flights served", report.flights_served());
/// ```
pub fn solve<S: MilpSolver + ?Sized>(
    catalog: &Catalog,
    config: &FormulationConfig,
    solver: &S,
    solver_config: &SolverConfig,
) -> Result<SolutionReport, CrewError> {
    let mut errors = config.validate().err().unwrap_or_default();
    if let Err(catalog_errors) = validate_catalog(catalog) {
        errors.extend(catalog_errors);
    }
    if !errors.is_empty() {
        warn!(problems = errors.len(), "rejecting malformed input");
        return Err(CrewError::InvalidData(errors));
    }

    info!(
        flights = catalog.flights.len(),
        pilots = catalog.pilots.len(),
        copilots = catalog.copilots.len(),
        "solving crew assignment"
    );

    if catalog.has_empty_pool() {
        warn!("flights, pilots and copilots must all be non-empty");
        return Ok(SolutionReport::empty(SolveStatus::InsufficientData, catalog.flights.len())
            .with_message("insufficient data: flights, pilots and copilots are all required"));
    }

    let model = match CrewModelBuilder::new(catalog, config.clone()).build() {
        BuildOutcome::Model(model) => model,
        BuildOutcome::Empty => {
            warn!("empty model, using fallback selection");
            return Ok(fallback(catalog, config));
        }
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        solver.solve(model.milp(), solver_config)
    }));

    let report = match outcome {
        Ok(Ok(solution)) => extract(&model, &solution),
        Ok(Err(e)) => {
            warn!(solver = solver.name(), error = %e, "solver failed");
            SolutionReport::empty(SolveStatus::Error, catalog.flights.len()).with_message(e.to_string())
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            warn!(solver = solver.name(), reason = %reason, "solver panicked");
            SolutionReport::empty(SolveStatus::Error, catalog.flights.len())
                .with_message(format!("solver panicked: {reason}"))
        }
    };

    info!(
        status = report.status.as_str(),
        served = report.flights_served(),
        solve_time_ms = report.solve_time.as_millis() as u64,
        "solve finished"
    );
    Ok(report)
}

/// Runs [`solve`] on a dedicated worker thread.
///
/// The receiver yields exactly one result. Each call owns its catalog, so
/// concurrent solves share nothing.
///
/// # Errors
/// [`CrewError::Solver`] if the worker thread cannot be spawned.
pub fn spawn_solve<S>(
    catalog: Catalog,
    config: FormulationConfig,
    solver: S,
    solver_config: SolverConfig,
) -> Result<Receiver<Result<SolutionReport, CrewError>>, CrewError>
where
    S: MilpSolver + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("u-crew-solve".into())
        .spawn(move || {
            // caller may have dropped the receiver
            let _ = tx.send(solve(&catalog, &config, &solver, &solver_config));
        })
        .map_err(|e| CrewError::Solver(format!("cannot spawn worker thread: {e}")))?;
    Ok(rx)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
