//! Crew assignment domain models.
//!
//! Provides the input catalog (flights and crew pools) and the output
//! report (assignments with itemized cost).
//!
//! # Domain Mappings
//!
//! | u-crew | Airline | Generic scheduling |
//! |--------|---------|--------------------|
//! | Flight | Flight leg | Task |
//! | CrewMember | Pilot / First officer | Resource |
//! | Assignment | Crew pairing for a leg | Assignment |
//! | SolutionReport | Crew roster | Schedule |

mod catalog;
mod crew;
mod flight;
mod report;

pub use catalog::{Catalog, Instance};
pub use crew::{CrewMember, CrewRole};
pub use flight::Flight;
pub use report::{Assignment, CostBreakdown, SolutionReport, SolveStatus, Violation, ViolationType};
