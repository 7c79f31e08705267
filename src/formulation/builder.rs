//! Crew assignment model builder.
//!
//! Translates a [`Catalog`] into a [`MilpModel`] with one binary variable
//! per compatible (flight, pilot, copilot) triple.
//!
//! # Constraints
//!
//! | Family | Name prefix | Meaning |
//! |--------|-------------|---------|
//! | Coverage | `flight_` | each flight staffed at most once |
//! | Overlap | `overlap_` | no crew member on two intersecting flights |
//! | Rest | `rest_` | no crew member on two flights closer than `min_rest` |
//! | Duty hours | `max_hours_` | assigned duration within `max_hours` |
//! | Non-triviality | `min_one_assignment` | at least one assignment (optional) |

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::analysis::{compatible_crew, conflicting_pairs, ConflictPair, PairRelation};
use crate::milp::{MilpModel, Objective, VarId};
use crate::models::{Assignment, Catalog, CostBreakdown, CrewRole};

use super::FormulationConfig;

/// A compatible (flight, pilot, copilot) combination and its variable.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTriple {
    /// Flight index in the catalog.
    pub flight: usize,
    /// Pilot index in the catalog.
    pub pilot: usize,
    /// Copilot index in the catalog.
    pub copilot: usize,
    /// Decision variable.
    pub var: VarId,
    /// Cost of realizing this triple.
    pub cost: CostBreakdown,
}

/// A built formulation: the MILP plus the triples behind its variables.
#[derive(Debug, Clone)]
pub struct CrewModel<'a> {
    catalog: &'a Catalog,
    config: FormulationConfig,
    triples: Vec<CandidateTriple>,
    milp: MilpModel,
}

impl<'a> CrewModel<'a> {
    /// The catalog the model was built from.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// The parameters the model was built with.
    pub fn config(&self) -> &FormulationConfig {
        &self.config
    }

    /// Candidate triples, in variable order.
    pub fn triples(&self) -> &[CandidateTriple] {
        &self.triples
    }

    /// The solver-facing model.
    pub fn milp(&self) -> &MilpModel {
        &self.milp
    }

    /// Realizes a triple as an assignment.
    pub fn assignment(&self, triple: &CandidateTriple) -> Assignment {
        Assignment::new(
            &self.catalog.flights[triple.flight],
            &self.catalog.pilots[triple.pilot],
            &self.catalog.copilots[triple.copilot],
            self.config.base_penalty_coeff,
        )
    }
}

/// Outcome of [`CrewModelBuilder::build`].
#[derive(Debug, Clone)]
pub enum BuildOutcome<'a> {
    /// At least one candidate triple exists.
    Model(CrewModel<'a>),
    /// No flight has a compatible pilot and copilot.
    Empty,
}

impl<'a> BuildOutcome<'a> {
    /// Returns the model, if any.
    pub fn into_model(self) -> Option<CrewModel<'a>> {
        match self {
            Self::Model(m) => Some(m),
            Self::Empty => None,
        }
    }

    /// Whether no candidate triple exists.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Builds a crew assignment MILP from a catalog.
///
/// The catalog is assumed valid (see
/// [`validate_catalog`](crate::validation::validate_catalog)).
///
/// # Example
/// ```
/// use u_crew::formulation::{CrewModelBuilder, FormulationConfig};
/// use u_crew::models::Catalog;
///
/// let catalog = Catalog::example();
/// let model = CrewModelBuilder::new(&catalog, FormulationConfig::default())
///     .build()
///     .into_model()
///     .unwrap();
/// assert!(model.milp().variable_count() > 0);
/// ```
pub struct CrewModelBuilder<'a> {
    catalog: &'a Catalog,
    config: FormulationConfig,
}

/// Per crew member: flight index → that member's variables on the flight.
type RoleIndex = Vec<BTreeMap<usize, Vec<VarId>>>;

impl<'a> CrewModelBuilder<'a> {
    /// Creates a builder.
    pub fn new(catalog: &'a Catalog, config: FormulationConfig) -> Self {
        Self { catalog, config }
    }

    /// Builds the model.
    ///
    /// Creates:
    /// - A binary variable per candidate triple
    /// - Coverage, overlap, rest, and duty-hour constraints
    /// - The non-triviality constraint when `require_assignment` is set
    /// - The scalarized maximization objective
    pub fn build(&self) -> BuildOutcome<'a> {
        let mut milp = MilpModel::new("crew_assignment");
        let triples = self.generate_triples(&mut milp);

        if triples.is_empty() {
            warn!(
                flights = self.catalog.flights.len(),
                pilots = self.catalog.pilots.len(),
                copilots = self.catalog.copilots.len(),
                "no compatible flight/pilot/copilot combination"
            );
            return BuildOutcome::Empty;
        }

        let mut by_flight: Vec<Vec<VarId>> = vec![Vec::new(); self.catalog.flights.len()];
        let mut by_pilot: RoleIndex = vec![BTreeMap::new(); self.catalog.pilots.len()];
        let mut by_copilot: RoleIndex = vec![BTreeMap::new(); self.catalog.copilots.len()];
        for t in &triples {
            by_flight[t.flight].push(t.var);
            by_pilot[t.pilot].entry(t.flight).or_default().push(t.var);
            by_copilot[t.copilot].entry(t.flight).or_default().push(t.var);
        }

        self.add_coverage(&mut milp, &by_flight);

        let conflicts = conflicting_pairs(&self.catalog.flights, self.config.min_rest);
        for (role, index) in [(CrewRole::Pilot, &by_pilot), (CrewRole::Copilot, &by_copilot)] {
            self.add_conflicts(&mut milp, role, index, &conflicts);
            self.add_duty_hours(&mut milp, role, index);
        }

        if self.config.require_assignment {
            milp.add_ge(
                "min_one_assignment",
                triples.iter().map(|t| (t.var, 1.0)).collect(),
                1.0,
            );
        }

        milp.set_objective(Objective::maximize(
            triples
                .iter()
                .map(|t| (t.var, self.config.objective_coefficient(t.cost.total())))
                .collect(),
        ));

        debug!(
            coverage = milp.constraint_count_with_prefix("flight_"),
            overlap = milp.constraint_count_with_prefix("overlap_"),
            rest = milp.constraint_count_with_prefix("rest_"),
            duty_hours = milp.constraint_count_with_prefix("max_hours_"),
            "constraint families"
        );
        info!(
            variables = milp.variable_count(),
            constraints = milp.constraint_count(),
            lambda = self.config.lambda,
            "crew assignment model built"
        );

        BuildOutcome::Model(CrewModel {
            catalog: self.catalog,
            config: self.config.clone(),
            triples,
            milp,
        })
    }

    /// One variable per compatible triple.
    ///
    /// Compatible pilots and copilots are filtered per flight first, so only
    /// the sparse product of the two compatible lists is ever enumerated.
    fn generate_triples(&self, milp: &mut MilpModel) -> Vec<CandidateTriple> {
        let c = self.catalog;
        let mut triples = Vec::new();

        for (f_idx, flight) in c.flights.iter().enumerate() {
            let pilots = compatible_crew(flight, &c.pilots);
            if pilots.is_empty() {
                continue;
            }
            let copilots = compatible_crew(flight, &c.copilots);

            for &p_idx in &pilots {
                for &c_idx in &copilots {
                    let (pilot, copilot) = (&c.pilots[p_idx], &c.copilots[c_idx]);
                    let var = milp.add_binary(format!("y_{}_{}_{}", flight.id, pilot.id, copilot.id));
                    triples.push(CandidateTriple {
                        flight: f_idx,
                        pilot: p_idx,
                        copilot: c_idx,
                        var,
                        cost: CostBreakdown::for_triple(
                            flight,
                            pilot,
                            copilot,
                            self.config.base_penalty_coeff,
                        ),
                    });
                }
            }
        }

        triples
    }

    fn add_coverage(&self, milp: &mut MilpModel, by_flight: &[Vec<VarId>]) {
        for (f_idx, vars) in by_flight.iter().enumerate() {
            if vars.is_empty() {
                continue;
            }
            milp.add_le(
                format!("flight_{}", self.catalog.flights[f_idx].id),
                unit_terms(vars),
                1.0,
            );
        }
    }

    fn add_conflicts(
        &self,
        milp: &mut MilpModel,
        role: CrewRole,
        index: &RoleIndex,
        conflicts: &[ConflictPair],
    ) {
        let pool = self.catalog.pool(role);
        let flights = &self.catalog.flights;

        for (m_idx, member_flights) in index.iter().enumerate() {
            if member_flights.len() < 2 {
                continue;
            }
            for pair in conflicts {
                let (Some(first), Some(second)) =
                    (member_flights.get(&pair.first), member_flights.get(&pair.second))
                else {
                    continue;
                };
                let family = match pair.relation {
                    PairRelation::Overlapping => "overlap",
                    PairRelation::TooClose { .. } => "rest",
                    PairRelation::Disjoint => continue,
                };
                let mut terms = unit_terms(first);
                terms.extend(unit_terms(second));
                milp.add_le(
                    format!(
                        "{family}_{}_{}_{}_{}",
                        role.tag(),
                        pool[m_idx].id,
                        flights[pair.first].id,
                        flights[pair.second].id
                    ),
                    terms,
                    1.0,
                );
            }
        }
    }

    fn add_duty_hours(&self, milp: &mut MilpModel, role: CrewRole, index: &RoleIndex) {
        let pool = self.catalog.pool(role);
        let flights = &self.catalog.flights;

        for (m_idx, member_flights) in index.iter().enumerate() {
            let member = &pool[m_idx];
            // unbounded budgets (CrewMember::new default) need no row
            if member_flights.is_empty() || member.max_hours >= f64::MAX {
                continue;
            }
            let terms: Vec<(VarId, f64)> = member_flights
                .iter()
                .flat_map(|(&f_idx, vars)| vars.iter().map(move |&v| (v, flights[f_idx].duration)))
                .collect();
            milp.add_le(
                format!("max_hours_{}_{}", role.tag(), member.id),
                terms,
                member.max_hours,
            );
        }
    }
}

fn unit_terms(vars: &[VarId]) -> Vec<(VarId, f64)> {
    vars.iter().map(|&v| (v, 1.0)).collect()
}
