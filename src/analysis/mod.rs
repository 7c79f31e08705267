//! Pure pairwise analyzers feeding the model builder.
//!
//! - [`is_compatible`]: may a crew member staff a flight?
//! - [`classify`]: may the same crew member fly two flights?
//!
//! Both are side-effect free and independent of any solver.

mod compatibility;
mod overlap;

pub use compatibility::{compatible_crew, is_compatible};
pub use overlap::{classify, conflicting_pairs, ConflictPair, PairRelation};
