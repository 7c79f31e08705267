//! Crew-flight assignment over a mixed-integer linear optimizer.
//!
//! Assigns one pilot and one copilot to each flight while respecting
//! aircraft ratings, languages, overlap, rest and duty-hour limits. The
//! problem is formulated as a binary MILP and handed to an external engine
//! behind the [`milp::MilpSolver`] trait.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Flight`, `CrewMember`, `Catalog`,
//!   `Assignment`, `SolutionReport`
//! - **`analysis`**: Compatibility filter and overlap/rest classification
//! - **`milp`**: Solver-agnostic binary model, solver trait, good_lp backend
//! - **`formulation`**: Model builder, solution extractor, fallback selector
//! - **`pipeline`**: validate → build → solve → extract
//! - **`validation`**: Input integrity checks and report verification
//! - **`kpi`**: Roster quality metrics
//! - **`generate`**: Seeded random catalogs
//!
//! # Example
//!
//! ```no_run
//! use u_crew::formulation::FormulationConfig;
//! use u_crew::milp::{GoodLpSolver, SolverConfig};
//! use u_crew::models::Catalog;
//!
//! let catalog = Catalog::example();
//! let report = u_crew::pipeline::solve(
//!     &catalog,
//!     &FormulationConfig::default().with_lambda(1.0),
//!     &GoodLpSolver::new(),
//!     &SolverConfig::default(),
//! )?;
//! for a in &report.assignments {
//!     println!("{}: {} + {}", a.flight_id, a.pilot_id, a.copilot_id);
//! }
//! # Ok::<(), u_crew::CrewError>(())
//! ```
//!
//! # References
//!
//! - Barnhart et al. (2003), "Airline Crew Scheduling", Handbook of
//!   Transportation Science
//! - Wolsey (2020), "Integer Programming", 2nd ed.

pub mod analysis;
pub mod error;
pub mod formulation;
pub mod generate;
pub mod kpi;
pub mod milp;
pub mod models;
pub mod pipeline;
pub mod validation;

pub use error::CrewError;
