//! Crew assignment MILP formulation.
//!
//! Bridges the crew domain models to the [`milp`](crate::milp) layer:
//! builds a [`MilpModel`](crate::milp::MilpModel) from a catalog, decodes
//! valuations back into assignments, and provides a solver-free fallback
//! when no candidate exists.
//!
//! # Formulation
//!
//! Variables: `y[f,p,c] ∈ {0,1}` for every flight `f`, pilot `p` and
//! copilot `c` where both crew members are rated on `f`'s aircraft and
//! speak its languages.
//!
//! Objective (maximize), with `Z_cover = Σ y` and `Z_cost = -Σ cost·y`:
//! - `lambda = 0`: `Z_cost`
//! - `lambda = 1`: `Z_cover`
//! - otherwise: `lambda·flight_cost_unit·Z_cover + (1 - lambda)·Z_cost`
//!
//! See [`CrewModelBuilder`] for the constraint families.

mod builder;
mod config;
mod extract;
mod fallback;

pub use builder::{BuildOutcome, CandidateTriple, CrewModel, CrewModelBuilder};
pub use config::FormulationConfig;
pub use extract::extract;
pub use fallback::fallback;
