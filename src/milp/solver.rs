//! MILP solver interface.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::model::MilpModel;
use crate::error::CrewError;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// No feasible solution exists.
    Infeasible,
    /// Solver exceeded its time limit (or was canceled).
    TimeLimit,
    /// Any other outcome (unbounded, numerical failure, ...).
    Other,
}

/// Solution from a MILP solver.
#[derive(Debug, Clone, PartialEq)]
pub struct MilpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Variable values indexed by [`VarId::index`](super::VarId::index).
    ///
    /// Present for `Optimal`; may be present for `TimeLimit` when the
    /// solver kept an incumbent.
    pub values: Option<Vec<f64>>,
    /// Objective function value (if any).
    pub objective_value: Option<f64>,
    /// Wall-clock solve time.
    pub solve_time: Duration,
    /// Diagnostic from the solver, if any.
    pub message: Option<String>,
}

impl MilpSolution {
    /// Creates a solution without a valuation.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            values: None,
            objective_value: None,
            solve_time: Duration::ZERO,
            message: None,
        }
    }

    /// Creates an optimal solution from a valuation.
    pub fn optimal(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status: SolverStatus::Optimal,
            values: Some(values),
            objective_value: Some(objective_value),
            solve_time: Duration::ZERO,
            message: None,
        }
    }

    /// Sets the solve time.
    pub fn with_solve_time(mut self, solve_time: Duration) -> Self {
        self.solve_time = solve_time;
        self
    }

    /// Sets the diagnostic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether a usable valuation is attached.
    ///
    /// `Optimal` always counts; `TimeLimit` counts when an incumbent exists.
    pub fn has_valuation(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::TimeLimit)
            && self.values.is_some()
    }

    /// Value of a variable (0.0 when absent).
    pub fn value(&self, index: usize) -> f64 {
        self.values
            .as_ref()
            .and_then(|v| v.get(index).copied())
            .unwrap_or(0.0)
    }
}

/// Solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum solve time.
    pub time_limit: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
        }
    }
}

impl SolverConfig {
    /// Sets the time limit.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

/// Trait for MILP solver implementations.
///
/// Implementors wrap an external optimization engine. The call may be slow
/// but must honor `config.time_limit`. Statuses such as infeasibility are
/// reported through [`MilpSolution::status`]; `Err` is reserved for faults
/// of the engine itself.
pub trait MilpSolver {
    /// Backend name (for logs).
    fn name(&self) -> &str;

    /// Solves the model.
    fn solve(&self, model: &MilpModel, config: &SolverConfig) -> Result<MilpSolution, CrewError>;
}

impl<S: MilpSolver + ?Sized> MilpSolver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, model: &MilpModel, config: &SolverConfig) -> Result<MilpSolution, CrewError> {
        (**self).solve(model, config)
    }
}
