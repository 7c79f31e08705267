//! `good_lp` solver adapter.
//!
//! Translates a [`MilpModel`] into a `good_lp` problem and solves it with
//! the backend `good_lp` was compiled with (pure-Rust `microlp` by default).
//!
//! The engine has no native time limit, so the solve runs on a helper
//! thread and the adapter waits at most `time_limit` for it. A solve that
//! misses the deadline is reported as [`SolverStatus::TimeLimit`] without a
//! valuation; the helper thread finishes in the background and its result
//! is dropped.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::{debug, warn};

use super::model::{Comparison, MilpModel, Sense, VarId};
use super::solver::{MilpSolution, MilpSolver, SolverConfig, SolverStatus};
use crate::error::CrewError;

/// MILP adapter over `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    /// Creates the adapter.
    pub fn new() -> Self {
        Self
    }
}

impl MilpSolver for GoodLpSolver {
    fn name(&self) -> &str {
        "good_lp"
    }

    fn solve(&self, model: &MilpModel, config: &SolverConfig) -> Result<MilpSolution, CrewError> {
        model.validate().map_err(CrewError::InvalidModel)?;

        debug!(
            model = %model.name,
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            time_limit_ms = config.time_limit.as_millis() as u64,
            "handing model to good_lp"
        );

        let start = Instant::now();
        let (tx, rx) = mpsc::channel();
        let owned = model.clone();
        thread::Builder::new()
            .name("u-crew-milp".into())
            .spawn(move || {
                // receiver may be gone after a timeout
                let _ = tx.send(solve_blocking(&owned));
            })
            .map_err(|e| CrewError::Solver(format!("cannot spawn solver thread: {e}")))?;

        match rx.recv_timeout(config.time_limit) {
            Ok(solution) => Ok(solution.with_solve_time(start.elapsed())),
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    model = %model.name,
                    time_limit_ms = config.time_limit.as_millis() as u64,
                    "solver exceeded its time limit"
                );
                Ok(MilpSolution::empty(SolverStatus::TimeLimit)
                    .with_solve_time(start.elapsed())
                    .with_message("time limit reached before a solution was proven"))
            }
            Err(RecvTimeoutError::Disconnected) => Err(CrewError::Solver(
                "solver thread terminated without a result".into(),
            )),
        }
    }
}

fn solve_blocking(model: &MilpModel) -> MilpSolution {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variables
        .iter()
        .map(|v| vars.add(variable().binary().name(v.name.clone())))
        .collect();

    let (sense, objective) = match &model.objective {
        Some(o) => (o.sense, to_expression(&o.terms, &handles)),
        None => (Sense::Maximize, Expression::default()),
    };

    let unsolved = match sense {
        Sense::Maximize => vars.maximise(objective),
        Sense::Minimize => vars.minimise(objective),
    };
    let mut problem = unsolved.using(default_solver);

    for c in &model.constraints {
        let lhs = to_expression(&c.terms, &handles);
        let constraint = match c.comparison {
            Comparison::LessEq => lhs.leq(c.rhs),
            Comparison::GreaterEq => lhs.geq(c.rhs),
            Comparison::Equal => lhs.eq(c.rhs),
        };
        problem = problem.with(constraint);
    }

    match problem.solve() {
        Ok(solution) => {
            let values: Vec<f64> = handles.iter().map(|&h| solution.value(h)).collect();
            let objective_value = model.objective_value(&values);
            MilpSolution::optimal(values, objective_value)
        }
        Err(ResolutionError::Infeasible) => MilpSolution::empty(SolverStatus::Infeasible)
            .with_message("constraints admit no solution"),
        Err(e) => MilpSolution::empty(SolverStatus::Other).with_message(e.to_string()),
    }
}

fn to_expression(terms: &[(VarId, f64)], handles: &[Variable]) -> Expression {
    let mut expr = Expression::with_capacity(terms.len());
    for &(var, coef) in terms {
        expr.add_mul(coef, handles[var.index()]);
    }
    expr
}
