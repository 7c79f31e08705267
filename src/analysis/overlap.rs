//! Overlap and minimum-rest classification of flight pairs.
//!
//! Flights live on one flat timeline. Two flights conflict for a crew
//! member if their intervals intersect, or if the gap between the earlier
//! arrival and the later departure is positive but shorter than the
//! required rest. Flights that touch exactly (gap of zero) do not conflict.

use serde::{Deserialize, Serialize};

use crate::models::Flight;

/// Relation between two flights from a crew member's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PairRelation {
    /// The flights can be flown by the same member.
    Disjoint,
    /// The flight intervals intersect.
    Overlapping,
    /// The later flight departs after the earlier arrives, but too soon.
    TooClose {
        /// Hours between the earlier arrival and the later departure.
        gap: f64,
    },
}

impl PairRelation {
    /// Whether the same crew member may not fly both flights.
    #[inline]
    pub fn is_conflict(&self) -> bool {
        !matches!(self, Self::Disjoint)
    }
}

/// A conflicting pair of flights, by catalog index (`first < second`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConflictPair {
    /// Index of the first flight.
    pub first: usize,
    /// Index of the second flight.
    pub second: usize,
    /// Why the pair conflicts.
    pub relation: PairRelation,
}

/// Classifies a pair of flights.
///
/// Symmetric in `f1`/`f2`.
pub fn classify(f1: &Flight, f2: &Flight, min_rest: f64) -> PairRelation {
    if !(f1.arrival <= f2.departure || f2.arrival <= f1.departure) {
        return PairRelation::Overlapping;
    }

    let gap = if f2.departure > f1.arrival {
        f2.departure - f1.arrival
    } else if f1.departure > f2.arrival {
        f1.departure - f2.arrival
    } else {
        // touching
        return PairRelation::Disjoint;
    };

    if gap > 0.0 && gap < min_rest {
        PairRelation::TooClose { gap }
    } else {
        PairRelation::Disjoint
    }
}

/// All conflicting unordered flight pairs, each classified once.
///
/// # Complexity
/// O(n²) in the number of flights.
pub fn conflicting_pairs(flights: &[Flight], min_rest: f64) -> Vec<ConflictPair> {
    let mut pairs = Vec::new();
    for i in 0..flights.len() {
        for j in (i + 1)..flights.len() {
            let relation = classify(&flights[i], &flights[j], min_rest);
            if relation.is_conflict() {
                pairs.push(ConflictPair {
                    first: i,
                    second: j,
                    relation,
                });
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(id: &str, dep: f64, arr: f64) -> Flight {
        Flight::new(id, dep, arr)
    }

    #[test]
    fn test_overlapping() {
        assert_eq!(classify(&f("A", 8.0, 10.0), &f("B", 9.0, 11.0), 8.0), PairRelation::Overlapping);
        assert_eq!(classify(&f("B", 9.0, 11.0), &f("A", 8.0, 10.0), 8.0), PairRelation::Overlapping);
        // containment
        assert_eq!(classify(&f("A", 8.0, 12.0), &f("B", 9.0, 10.0), 0.0), PairRelation::Overlapping);
    }

    #[test]
    fn test_too_close_either_order() {
        let a = f("A", 8.0, 10.0);
        let b = f("B", 13.0, 15.0);
        match classify(&a, &b, 8.0) {
            PairRelation::TooClose { gap } => assert!((gap - 3.0).abs() < 1e-10),
            other => panic!("expected TooClose, got {other:?}"),
        }
        assert!(matches!(classify(&b, &a, 8.0), PairRelation::TooClose { .. }));
    }

    #[test]
    fn test_enough_rest() {
        assert_eq!(classify(&f("A", 8.0, 10.0), &f("B", 18.0, 20.0), 8.0), PairRelation::Disjoint);
        assert_eq!(classify(&f("A", 8.0, 10.0), &f("B", 19.0, 20.0), 8.0), PairRelation::Disjoint);
    }

    #[test]
    fn test_touching_is_disjoint() {
        assert_eq!(classify(&f("A", 8.0, 10.0), &f("B", 10.0, 12.0), 8.0), PairRelation::Disjoint);
        assert_eq!(classify(&f("B", 10.0, 12.0), &f("A", 8.0, 10.0), 8.0), PairRelation::Disjoint);
    }

    #[test]
    fn test_zero_rest_never_too_close() {
        assert_eq!(classify(&f("A", 8.0, 10.0), &f("B", 10.5, 12.0), 0.0), PairRelation::Disjoint);
    }

    #[test]
    fn test_conflicting_pairs() {
        let flights = vec![
            f("A", 8.0, 10.0),
            f("B", 9.0, 11.0),  // overlaps A
            f("C", 13.0, 14.0), // too close to A and B
            f("D", 30.0, 31.0), // far away
        ];
        let pairs = conflicting_pairs(&flights, 8.0);
        let idx: Vec<(usize, usize)> = pairs.iter().map(|p| (p.first, p.second)).collect();
        assert_eq!(idx, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(pairs[0].relation, PairRelation::Overlapping);
        assert!(matches!(pairs[1].relation, PairRelation::TooClose { .. }));
    }
}
