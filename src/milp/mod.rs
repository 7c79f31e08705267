//! Mixed-integer linear programming layer.
//!
//! Provides a solver-agnostic model for binary decision problems and the
//! interface an external optimization engine must implement.
//!
//! # Key Components
//!
//! - **Model**: [`MilpModel`]: binary variables, [`LinearConstraint`]s, [`Objective`]
//! - **Solver**: [`MilpSolver`] trait: interface for engine adapters
//! - **Adapter**: [`GoodLpSolver`]: `good_lp` backed implementation
//!
//! # Design
//!
//! This module defines the modeling layer only and knows nothing about
//! flights or crews. The formulation layer translates domain objects into
//! a [`MilpModel`]; the engine is swapped by choosing a different
//! [`MilpSolver`].

mod backend;
mod model;
mod solver;

pub use backend::GoodLpSolver;
pub use model::{BinaryVar, Comparison, LinearConstraint, MilpModel, Objective, Sense, VarId};
pub use solver::{MilpSolution, MilpSolver, SolverConfig, SolverStatus};
