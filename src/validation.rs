//! Input validation and report verification.
//!
//! [`validate_catalog`] checks the structural integrity of a catalog
//! before any model is built. Detects:
//! - Duplicate IDs
//! - Inverted or empty time windows
//! - Non-positive durations
//! - Negative costs and hours
//! - Non-finite numbers
//!
//! [`verify_report`] re-derives every assignment invariant from a finished
//! report and lists what is broken, independent of how the report was made.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::analysis::{classify, is_compatible, PairRelation};
use crate::formulation::FormulationConfig;
use crate::models::{Catalog, CrewMember, CrewRole, SolutionReport, Violation, ViolationType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Tolerance used when comparing accumulated hours.
const HOURS_EPSILON: f64 = 1e-6;

/// A validation error with a field-level cause.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending entity id (or `"parameters"`).
    pub entity_id: String,
    /// Offending field.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities in the same collection share an ID.
    DuplicateId,
    /// Arrival is not after departure.
    InvalidTimeWindow,
    /// Duration is zero or negative.
    NonPositiveDuration,
    /// A cost is negative.
    NegativeCost,
    /// An hour bound is negative or `min_hours > max_hours`.
    InvalidHours,
    /// A number is NaN or infinite.
    NonFinite,
    /// A formulation parameter is out of range.
    InvalidParameter,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        entity_id: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.entity_id, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a catalog.
///
/// Checks:
/// 1. No duplicate flight, pilot or copilot IDs
/// 2. Every flight has finite times with `arrival > departure`
/// 3. Every flight has a positive duration
/// 4. No negative operational or hourly costs
/// 5. Hour bounds are non-negative with `min_hours <= max_hours`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    let mut flight_ids = HashSet::new();
    for f in &catalog.flights {
        if !flight_ids.insert(f.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &f.id,
                "id",
                format!("Duplicate flight ID: {}", f.id),
            ));
        }

        if !f.departure.is_finite() || !f.arrival.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFinite,
                &f.id,
                "departure",
                "Departure and arrival must be finite",
            ));
        } else if f.arrival <= f.departure {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeWindow,
                &f.id,
                "arrival",
                format!(
                    "Flight '{}' arrives at {} but departs at {}",
                    f.id, f.arrival, f.departure
                ),
            ));
        }

        if !f.duration.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFinite,
                &f.id,
                "duration",
                "Duration must be finite",
            ));
        } else if f.duration <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                &f.id,
                "duration",
                format!("Flight '{}' has duration {}", f.id, f.duration),
            ));
        }

        check_cost(&mut errors, &f.id, "operational_cost", f.operational_cost);
    }

    for role in [CrewRole::Pilot, CrewRole::Copilot] {
        let mut ids = HashSet::new();
        for member in catalog.pool(role) {
            if !ids.insert(member.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    &member.id,
                    "id",
                    format!("Duplicate {role} ID: {}", member.id),
                ));
            }
            check_crew(&mut errors, member);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_cost(errors: &mut Vec<ValidationError>, id: &str, field: &'static str, value: f64) {
    if !value.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonFinite,
            id,
            field,
            format!("{field} must be finite"),
        ));
    } else if value < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeCost,
            id,
            field,
            format!("'{id}' has negative {field}: {value}"),
        ));
    }
}

fn check_crew(errors: &mut Vec<ValidationError>, member: &CrewMember) {
    check_cost(errors, &member.id, "hourly_cost", member.hourly_cost);

    // max_hours may be f64::MAX (unbounded) but never NaN
    if member.min_hours.is_nan() || member.max_hours.is_nan() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonFinite,
            &member.id,
            "max_hours",
            "Hour bounds must be numbers",
        ));
        return;
    }
    if member.min_hours < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHours,
            &member.id,
            "min_hours",
            format!("'{}' has negative min_hours: {}", member.id, member.min_hours),
        ));
    }
    if member.max_hours < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHours,
            &member.id,
            "max_hours",
            format!("'{}' has negative max_hours: {}", member.id, member.max_hours),
        ));
    } else if member.min_hours > member.max_hours {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHours,
            &member.id,
            "min_hours",
            format!(
                "'{}' has min_hours {} above max_hours {}",
                member.id, member.min_hours, member.max_hours
            ),
        ));
    }
}

/// Checks a report against the catalog and parameters it was solved for.
///
/// Verifies that every flight is served at most once, every crew member is
/// rated for what they fly, never flies two conflicting flights, and stays
/// within their maximum hours.
///
/// # Returns
/// All violations found; empty for a sound report.
pub fn verify_report(
    catalog: &Catalog,
    config: &FormulationConfig,
    report: &SolutionReport,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut served: HashMap<&str, usize> = HashMap::new();
    for a in &report.assignments {
        *served.entry(a.flight_id.as_str()).or_insert(0) += 1;
    }
    let mut duplicated: Vec<(&str, usize)> = served.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicated.sort_unstable();
    for (flight_id, n) in duplicated {
        violations.push(Violation::new(
            ViolationType::DuplicateFlight,
            flight_id,
            format!("Flight '{flight_id}' is served {n} times"),
        ));
    }

    for role in [CrewRole::Pilot, CrewRole::Copilot] {
        for member in catalog.pool(role) {
            let flights: Vec<_> = report
                .assignments
                .iter()
                .filter(|a| a.involves(role, &member.id))
                .filter_map(|a| catalog.flight(&a.flight_id))
                .collect();

            for f in &flights {
                if !is_compatible(f, member) {
                    violations.push(Violation::new(
                        ViolationType::IncompatibleCrew,
                        &member.id,
                        format!("{role} '{}' cannot staff flight '{}'", member.id, f.id),
                    ));
                }
            }

            for i in 0..flights.len() {
                for j in (i + 1)..flights.len() {
                    match classify(flights[i], flights[j], config.min_rest) {
                        PairRelation::Disjoint => {}
                        PairRelation::Overlapping => violations.push(Violation::new(
                            ViolationType::CrewOverlap,
                            &member.id,
                            format!(
                                "{role} '{}' flies overlapping flights '{}' and '{}'",
                                member.id, flights[i].id, flights[j].id
                            ),
                        )),
                        PairRelation::TooClose { gap } => violations.push(Violation::new(
                            ViolationType::InsufficientRest,
                            &member.id,
                            format!(
                                "{role} '{}' rests {gap}h between '{}' and '{}'",
                                member.id, flights[i].id, flights[j].id
                            ),
                        )),
                    }
                }
            }

            let hours: f64 = flights.iter().map(|f| f.duration).sum();
            if hours > member.max_hours + HOURS_EPSILON {
                violations.push(Violation::new(
                    ViolationType::DutyHoursExceeded,
                    &member.id,
                    format!(
                        "{role} '{}' flies {hours}h, maximum is {}h",
                        member.id, member.max_hours
                    ),
                ));
            }
        }
    }

    for a in &report.assignments {
        let missing = [
            (catalog.flight(&a.flight_id).is_none(), a.flight_id.as_str()),
            (catalog.crew_member(CrewRole::Pilot, &a.pilot_id).is_none(), a.pilot_id.as_str()),
            (
                catalog.crew_member(CrewRole::Copilot, &a.copilot_id).is_none(),
                a.copilot_id.as_str(),
            ),
        ];
        for (is_missing, id) in missing {
            if is_missing {
                violations.push(Violation::new(
                    ViolationType::UnknownEntity,
                    id,
                    format!("Assignment for flight '{}' references unknown '{id}'", a.flight_id),
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Flight, SolveStatus};

    #[test]
    fn test_valid_example() {
        assert!(validate_catalog(&Catalog::example()).is_ok());
    }

    #[test]
    fn test_duplicate_flight_id() {
        let c = Catalog::new()
            .with_flight(Flight::new("F1", 0.0, 1.0))
            .with_flight(Flight::new("F1", 2.0, 3.0));
        let errors = validate_catalog(&c).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("flight")));
    }

    #[test]
    fn test_same_id_in_both_pools_is_fine() {
        let c = Catalog::new()
            .with_pilot(CrewMember::new("X1"))
            .with_copilot(CrewMember::new("X1"));
        assert!(validate_catalog(&c).is_ok());
    }

    #[test]
    fn test_inverted_window() {
        let c = Catalog::new().with_flight(Flight::new("F1", 10.0, 8.0).with_duration(1.0));
        let errors = validate_catalog(&c).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidTimeWindow);
        assert_eq!(errors[0].entity_id, "F1");
        assert_eq!(errors[0].field, "arrival");
    }

    #[test]
    fn test_non_positive_duration() {
        let c = Catalog::new().with_flight(Flight::new("F1", 8.0, 10.0).with_duration(0.0));
        let errors = validate_catalog(&c).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveDuration && e.field == "duration"));
    }

    #[test]
    fn test_negative_costs_and_hours() {
        let c = Catalog::new()
            .with_flight(Flight::new("F1", 8.0, 10.0).with_operational_cost(-1.0))
            .with_pilot(CrewMember::new("P1").with_hourly_cost(-5.0))
            .with_copilot(CrewMember::new("C1").with_hours(10.0, 5.0))
            .with_copilot(CrewMember::new("C2").with_hours(0.0, -1.0));
        let errors = validate_catalog(&c).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeCost && e.entity_id == "F1"));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeCost && e.field == "hourly_cost"));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidHours && e.entity_id == "C1"));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidHours && e.field == "max_hours"));
    }

    #[test]
    fn test_non_finite() {
        let c = Catalog::new().with_flight(Flight::new("F1", f64::NAN, 10.0).with_duration(1.0));
        let errors = validate_catalog(&c).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::NonFinite));
    }

    fn conflict_catalog() -> Catalog {
        let pilot = CrewMember::new("P1").with_qualification("A320").with_hours(0.0, 3.0);
        let copilot = CrewMember::new("C1").with_qualification("A320");
        Catalog::new()
            .with_flight(Flight::new("F1", 8.0, 10.0).with_aircraft("A320"))
            .with_flight(Flight::new("F2", 9.0, 11.0).with_aircraft("A320"))
            .with_flight(Flight::new("F3", 12.0, 13.0).with_aircraft("B737"))
            .with_pilot(pilot)
            .with_copilot(copilot)
    }

    #[test]
    fn test_verify_sound_report() {
        let c = conflict_catalog();
        let a = Assignment::new(&c.flights[0], &c.pilots[0], &c.copilots[0], 0.0);
        let report = SolutionReport::from_assignments(SolveStatus::Optimal, vec![a], 3);
        assert!(verify_report(&c, &FormulationConfig::default(), &report).is_empty());
    }

    #[test]
    fn test_verify_detects_violations() {
        let c = conflict_catalog();
        let (p, cp) = (&c.pilots[0], &c.copilots[0]);
        let assignments = vec![
            Assignment::new(&c.flights[0], p, cp, 0.0),
            Assignment::new(&c.flights[0], p, cp, 0.0),
            Assignment::new(&c.flights[1], p, cp, 0.0),
            Assignment::new(&c.flights[2], p, cp, 0.0),
        ];
        let report = SolutionReport::from_assignments(SolveStatus::Optimal, assignments, 3);
        let violations = verify_report(&c, &FormulationConfig::default(), &report);
        let has = |t: ViolationType| violations.iter().any(|v| v.violation_type == t);

        assert!(has(ViolationType::DuplicateFlight));
        assert!(has(ViolationType::CrewOverlap));
        assert!(has(ViolationType::InsufficientRest));
        assert!(has(ViolationType::DutyHoursExceeded));
        assert!(has(ViolationType::IncompatibleCrew));
        assert!(!has(ViolationType::UnknownEntity));
    }

    #[test]
    fn test_verify_unknown_entity() {
        let c = conflict_catalog();
        let ghost = CrewMember::new("GHOST");
        let a = Assignment::new(&c.flights[0], &ghost, &c.copilots[0], 0.0);
        let report = SolutionReport::from_assignments(SolveStatus::Optimal, vec![a], 3);
        let violations = verify_report(&c, &FormulationConfig::default(), &report);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::UnknownEntity && v.entity_id == "GHOST"));
    }
}
