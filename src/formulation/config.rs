//! Formulation parameters.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind, ValidationResult};

/// Parameters of the crew assignment formulation.
///
/// # Objective weight
/// `lambda` trades coverage against cost:
/// - `0.0`: minimize total cost only
/// - `1.0`: maximize the number of served flights only
/// - otherwise: `lambda * served * flight_cost_unit - (1 - lambda) * cost`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulationConfig {
    /// Minimum rest between two flights of the same crew member (hours).
    pub min_rest: f64,
    /// Penalty per crew member whose home base differs from the arrival station.
    pub base_penalty_coeff: f64,
    /// Objective weight in `[0, 1]`.
    #[serde(alias = "lambda_weight")]
    pub lambda: f64,
    /// Monetary value of one served flight, making coverage and cost commensurable.
    pub flight_cost_unit: f64,
    /// Require at least one assignment whenever a candidate exists.
    ///
    /// Enabled by default. It can force a cost-suboptimal solution under
    /// `lambda = 0`, where serving nothing would otherwise be cheapest.
    pub require_assignment: bool,
}

impl Default for FormulationConfig {
    fn default() -> Self {
        Self {
            min_rest: 8.0,
            base_penalty_coeff: 100.0,
            lambda: 0.5,
            flight_cost_unit: 1000.0,
            require_assignment: true,
        }
    }
}

impl FormulationConfig {
    /// Sets the minimum rest (hours).
    pub fn with_min_rest(mut self, min_rest: f64) -> Self {
        self.min_rest = min_rest;
        self
    }

    /// Sets the base-mismatch penalty coefficient.
    pub fn with_base_penalty(mut self, coeff: f64) -> Self {
        self.base_penalty_coeff = coeff;
        self
    }

    /// Sets the objective weight.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets the value of one served flight.
    pub fn with_flight_cost_unit(mut self, unit: f64) -> Self {
        self.flight_cost_unit = unit;
        self
    }

    /// Enables or disables the at-least-one-assignment constraint.
    pub fn with_require_assignment(mut self, require: bool) -> Self {
        self.require_assignment = require;
        self
    }

    /// Objective coefficient of a candidate with the given total cost.
    pub fn objective_coefficient(&self, cost: f64) -> f64 {
        if self.lambda <= 0.0 {
            -cost
        } else if self.lambda >= 1.0 {
            1.0
        } else {
            self.lambda * self.flight_cost_unit - (1.0 - self.lambda) * cost
        }
    }

    /// Validates parameter ranges.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &'static str, message: String| {
            if !ok {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidParameter,
                    "parameters",
                    field,
                    message,
                ));
            }
        };

        check(
            self.min_rest.is_finite() && self.min_rest >= 0.0,
            "min_rest",
            format!("min_rest must be a non-negative number, got {}", self.min_rest),
        );
        check(
            self.base_penalty_coeff.is_finite() && self.base_penalty_coeff >= 0.0,
            "base_penalty_coeff",
            format!(
                "base_penalty_coeff must be a non-negative number, got {}",
                self.base_penalty_coeff
            ),
        );
        check(
            (0.0..=1.0).contains(&self.lambda),
            "lambda",
            format!("lambda must lie in [0, 1], got {}", self.lambda),
        );
        check(
            self.flight_cost_unit.is_finite() && self.flight_cost_unit > 0.0,
            "flight_cost_unit",
            format!("flight_cost_unit must be positive, got {}", self.flight_cost_unit),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
