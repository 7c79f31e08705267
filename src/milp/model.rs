//! MILP model definition.

use serde::{Deserialize, Serialize};

/// Handle to a variable in a [`MilpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(usize);

impl VarId {
    /// Position of the variable in the model (and in a valuation).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A 0/1 decision variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryVar {
    /// Variable name (for diagnostics and solver logs).
    pub name: String,
}

/// Relational operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// `lhs <= rhs`
    LessEq,
    /// `lhs >= rhs`
    GreaterEq,
    /// `lhs == rhs`
    Equal,
}

/// `Σ coef * var  (<= | >= | ==)  rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Constraint name.
    pub name: String,
    /// (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
    /// Relational operator.
    pub comparison: Comparison,
    /// Right-hand side constant.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Evaluates the left-hand side under a valuation.
    pub fn lhs(&self, values: &[f64]) -> f64 {
        linear_value(&self.terms, values)
    }

    /// Whether the valuation satisfies the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.comparison {
            Comparison::LessEq => lhs <= self.rhs + tolerance,
            Comparison::GreaterEq => lhs >= self.rhs - tolerance,
            Comparison::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    /// Maximize the objective.
    Maximize,
    /// Minimize the objective.
    Minimize,
}

/// Linear objective function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Optimization direction.
    pub sense: Sense,
    /// (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
}

impl Objective {
    /// A maximization objective.
    pub fn maximize(terms: Vec<(VarId, f64)>) -> Self {
        Self {
            sense: Sense::Maximize,
            terms,
        }
    }

    /// A minimization objective.
    pub fn minimize(terms: Vec<(VarId, f64)>) -> Self {
        Self {
            sense: Sense::Minimize,
            terms,
        }
    }

    /// Evaluates the objective under a valuation.
    pub fn value(&self, values: &[f64]) -> f64 {
        linear_value(&self.terms, values)
    }
}

/// A mixed-integer linear model over binary variables.
///
/// Solver-agnostic: any [`MilpSolver`](super::MilpSolver) can consume it.
///
/// # Examples
///
/// ```
/// use u_crew::milp::{MilpModel, Objective};
///
/// let mut model = MilpModel::new("example");
/// let x = model.add_binary("x");
/// let y = model.add_binary("y");
/// model.add_le("pick_one", vec![(x, 1.0), (y, 1.0)], 1.0);
/// model.set_objective(Objective::maximize(vec![(x, 2.0), (y, 3.0)]));
/// assert_eq!(model.variable_count(), 2);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilpModel {
    /// Model name.
    pub name: String,
    /// Binary decision variables, indexed by [`VarId`].
    pub variables: Vec<BinaryVar>,
    /// Linear constraints.
    pub constraints: Vec<LinearConstraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

impl MilpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Adds a binary variable and returns its handle.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(BinaryVar { name: name.into() });
        VarId(self.variables.len() - 1)
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add `Σ terms <= rhs`.
    pub fn add_le(&mut self, name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) {
        self.add_constraint(LinearConstraint {
            name: name.into(),
            terms,
            comparison: Comparison::LessEq,
            rhs,
        });
    }

    /// Convenience: add `Σ terms >= rhs`.
    pub fn add_ge(&mut self, name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) {
        self.add_constraint(LinearConstraint {
            name: name.into(),
            terms,
            comparison: Comparison::GreaterEq,
            rhs,
        });
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable exists and every coefficient
    /// and right-hand side is finite.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.variables.len();
        for c in &self.constraints {
            if !c.rhs.is_finite() {
                return Err(format!("constraint {}: non-finite rhs", c.name));
            }
            for (var, coef) in &c.terms {
                if var.index() >= n {
                    return Err(format!("constraint {}: undefined variable #{}", c.name, var.index()));
                }
                if !coef.is_finite() {
                    return Err(format!("constraint {}: non-finite coefficient", c.name));
                }
            }
        }
        if let Some(objective) = &self.objective {
            for (var, coef) in &objective.terms {
                if var.index() >= n {
                    return Err(format!("objective: undefined variable #{}", var.index()));
                }
                if !coef.is_finite() {
                    return Err("objective: non-finite coefficient".into());
                }
            }
        }
        Ok(())
    }

    /// Evaluates the objective under a valuation (0.0 without an objective).
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.as_ref().map_or(0.0, |o| o.value(values))
    }

    /// Whether every constraint holds under the valuation.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(values, tolerance))
    }

    /// Returns the name of a variable.
    pub fn variable_name(&self, var: VarId) -> Option<&str> {
        self.variables.get(var.index()).map(|v| v.name.as_str())
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of constraints whose name starts with `prefix`.
    pub fn constraint_count_with_prefix(&self, prefix: &str) -> usize {
        self.constraints
            .iter()
            .filter(|c| c.name.starts_with(prefix))
            .count()
    }
}

fn linear_value(terms: &[(VarId, f64)], values: &[f64]) -> f64 {
    terms
        .iter()
        .map(|(var, coef)| coef * values.get(var.index()).copied().unwrap_or(0.0))
        .sum()
}
