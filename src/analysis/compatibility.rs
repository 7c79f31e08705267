//! Flight/crew compatibility filter.

use crate::models::{CrewMember, Flight};

/// Whether a crew member may staff a flight.
///
/// True iff the member is rated on the flight's aircraft type and speaks
/// every language the flight requires.
pub fn is_compatible(flight: &Flight, crew: &CrewMember) -> bool {
    crew.is_qualified_for(&flight.aircraft_type)
        && flight.required_languages.is_subset(&crew.languages)
}

/// Indices of the pool members compatible with a flight, in pool order.
pub fn compatible_crew(flight: &Flight, pool: &[CrewMember]) -> Vec<usize> {
    pool.iter()
        .enumerate()
        .filter(|(_, c)| is_compatible(flight, c))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a320_fr() -> Flight {
        Flight::new("F1", 8.0, 10.0).with_aircraft("A320").with_language("FR")
    }

    #[test]
    fn test_compatible() {
        let c = CrewMember::new("P1")
            .with_qualification("A320")
            .with_language("FR")
            .with_language("EN");
        assert!(is_compatible(&a320_fr(), &c));
    }

    #[test]
    fn test_missing_rating() {
        let c = CrewMember::new("P1").with_qualification("B737").with_language("FR");
        assert!(!is_compatible(&a320_fr(), &c));
    }

    #[test]
    fn test_missing_language() {
        let c = CrewMember::new("P1").with_qualification("A320").with_language("EN");
        assert!(!is_compatible(&a320_fr(), &c));
    }

    #[test]
    fn test_no_language_requirement() {
        let f = Flight::new("F1", 0.0, 1.0).with_aircraft("A320");
        let c = CrewMember::new("P1").with_qualification("A320");
        assert!(is_compatible(&f, &c));
    }

    #[test]
    fn test_compatible_crew_indices() {
        let pool = vec![
            CrewMember::new("P1").with_qualification("B737").with_language("FR"),
            CrewMember::new("P2").with_qualification("A320").with_language("FR"),
            CrewMember::new("P3").with_qualification("A320").with_language("FR"),
        ];
        assert_eq!(compatible_crew(&a320_fr(), &pool), vec![1, 2]);
        assert!(compatible_crew(&a320_fr(), &[]).is_empty());
    }
}
