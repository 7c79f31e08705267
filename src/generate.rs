//! Random catalog generation.
//!
//! Produces valid, reproducible catalogs for benchmarks and property
//! tests. The same seed and settings always yield the same catalog.

use rand::prelude::IndexedRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::{Catalog, CrewMember, Flight};

/// Seeded generator of crew assignment catalogs.
///
/// # Example
/// ```
/// use u_crew::generate::CatalogGenerator;
///
/// let catalog = CatalogGenerator::new(7).with_counts(10, 4, 4).generate();
/// assert_eq!(catalog.flights.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogGenerator {
    seed: u64,
    flights: usize,
    pilots: usize,
    copilots: usize,
    /// Departures fall in `[0, horizon)`.
    horizon: f64,
    aircraft_types: Vec<String>,
    bases: Vec<String>,
    languages: Vec<String>,
    /// Probability that a flight requires one language.
    language_rate: f64,
}

impl CatalogGenerator {
    /// Creates a generator with small default dimensions.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            flights: 8,
            pilots: 3,
            copilots: 3,
            horizon: 72.0,
            aircraft_types: vec!["A320".into(), "B737".into()],
            bases: vec!["CDG".into(), "ORY".into(), "LYS".into(), "NCE".into()],
            languages: vec!["EN".into(), "FR".into()],
            language_rate: 0.3,
        }
    }

    /// Sets the number of flights, pilots and copilots.
    pub fn with_counts(mut self, flights: usize, pilots: usize, copilots: usize) -> Self {
        self.flights = flights;
        self.pilots = pilots;
        self.copilots = copilots;
        self
    }

    /// Sets the departure horizon (hours).
    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon.max(1.0);
        self
    }

    /// Sets the aircraft types to draw from.
    pub fn with_aircraft_types(mut self, types: Vec<String>) -> Self {
        self.aircraft_types = types;
        self
    }

    /// Sets the bases to draw from.
    pub fn with_bases(mut self, bases: Vec<String>) -> Self {
        self.bases = bases;
        self
    }

    /// Sets the languages and the rate at which flights require one.
    pub fn with_languages(mut self, languages: Vec<String>, rate: f64) -> Self {
        self.languages = languages;
        self.language_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Generates a catalog.
    ///
    /// Flights get IDs `F001..`, pilots `P001..`, copilots `C001..`. Every
    /// generated catalog passes [`validate_catalog`](crate::validation::validate_catalog).
    pub fn generate(&self) -> Catalog {
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut catalog = Catalog::new();
        for i in 0..self.flights {
            catalog.flights.push(self.generate_flight(&mut rng, i));
        }
        for i in 0..self.pilots {
            let member = self.generate_crew(&mut rng, format!("P{:03}", i + 1), 120.0..200.0);
            catalog.pilots.push(member);
        }
        for i in 0..self.copilots {
            let member = self.generate_crew(&mut rng, format!("C{:03}", i + 1), 80.0..140.0);
            catalog.copilots.push(member);
        }
        catalog
    }

    fn generate_flight(&self, rng: &mut impl Rng, index: usize) -> Flight {
        // half-hour granularity
        let departure = (rng.random_range(0.0..self.horizon) * 2.0).round() / 2.0;
        let duration = f64::from(rng.random_range(2u32..=12)) / 2.0;

        let mut flight = Flight::new(format!("F{:03}", index + 1), departure, departure + duration)
            .with_operational_cost((rng.random_range(500.0..2000.0_f64)).round());

        if let Some(aircraft) = self.aircraft_types.choose(rng) {
            flight = flight.with_aircraft(aircraft.clone());
        }
        if let (Some(dep), Some(arr)) = (self.bases.choose(rng), self.bases.choose(rng)) {
            flight = flight.with_route(dep.clone(), arr.clone());
        }
        if rng.random_bool(self.language_rate) {
            if let Some(lang) = self.languages.choose(rng) {
                flight = flight.with_language(lang.clone());
            }
        }
        flight
    }

    fn generate_crew(
        &self,
        rng: &mut impl Rng,
        id: String,
        cost_range: std::ops::Range<f64>,
    ) -> CrewMember {
        let mut member = CrewMember::new(id)
            .with_hourly_cost(rng.random_range(cost_range).round())
            .with_hours(0.0, f64::from(rng.random_range(8u32..=40)));

        let ratings = rng.random_range(1..=self.aircraft_types.len().max(1));
        for aircraft in self.aircraft_types.choose_multiple(rng, ratings) {
            member = member.with_qualification(aircraft.clone());
        }
        let spoken = rng.random_range(1..=self.languages.len().max(1));
        for lang in self.languages.choose_multiple(rng, spoken) {
            member = member.with_language(lang.clone());
        }
        if let Some(base) = self.bases.choose(rng) {
            member = member.with_home_base(base.clone());
        }
        member
    }
}
