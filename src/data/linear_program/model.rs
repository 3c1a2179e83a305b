//! # The model as provided by the user
//!
//! A `Model` is the structured form of the line oriented model text: an objective direction with
//! one cost per variable, one row of coefficients, a constraint type and a right hand side per
//! constraint, and one sign restriction per variable.
//!
//! All dimensions are validated when the model is created; once created, a model doesn't change.
use crate::data::linear_program::elements::{ConstraintType, Objective, SignRestriction, VariableType};
use crate::error::{Error, Result};

/// A linear program, possibly with integer and binary variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    objective: Objective,
    cost: Vec<f64>,
    constraints: Vec<Vec<f64>>,
    constraint_types: Vec<ConstraintType>,
    rhs: Vec<f64>,
    sign_restrictions: Vec<SignRestriction>,
}

impl Model {
    /// Create a new model.
    ///
    /// # Arguments
    ///
    /// * `objective`: Whether to maximize or minimize.
    /// * `cost`: Objective function coefficient of each variable.
    /// * `constraints`: One row of coefficients per constraint, each of the same length as `cost`.
    /// * `constraint_types`: Type of each constraint.
    /// * `rhs`: Right hand side of each constraint.
    /// * `sign_restrictions`: Sign restriction of each variable.
    ///
    /// # Return value
    ///
    /// The model, or a `DimensionMismatch` or `MalformedModel` error. Rows are never truncated or
    /// padded.
    pub fn new(
        objective: Objective,
        cost: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        constraint_types: Vec<ConstraintType>,
        rhs: Vec<f64>,
        sign_restrictions: Vec<SignRestriction>,
    ) -> Result<Self> {
        if cost.is_empty() {
            return Err(Error::MalformedModel("the model has no variables".to_string()));
        }
        for (i, row) in constraints.iter().enumerate() {
            if row.len() != cost.len() {
                return Err(Error::DimensionMismatch {
                    what: format!("constraint {}", i),
                    expected: cost.len(),
                    found: row.len(),
                });
            }
        }
        if constraint_types.len() != constraints.len() {
            return Err(Error::DimensionMismatch {
                what: "constraint types".to_string(),
                expected: constraints.len(),
                found: constraint_types.len(),
            });
        }
        if rhs.len() != constraints.len() {
            return Err(Error::DimensionMismatch {
                what: "right hand side".to_string(),
                expected: constraints.len(),
                found: rhs.len(),
            });
        }
        if sign_restrictions.len() != cost.len() {
            return Err(Error::DimensionMismatch {
                what: "sign restrictions".to_string(),
                expected: cost.len(),
                found: sign_restrictions.len(),
            });
        }
        let all_finite = cost.iter()
            .chain(constraints.iter().flatten())
            .chain(rhs.iter())
            .all(|value| value.is_finite());
        if !all_finite {
            return Err(Error::MalformedModel("the model contains a value that is not finite".to_string()));
        }

        Ok(Self { objective, cost, constraints, constraint_types, rhs, sign_restrictions })
    }

    /// Create a model in which all variables are nonnegative and continuous.
    pub fn with_nonnegative_variables(
        objective: Objective,
        cost: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        constraint_types: Vec<ConstraintType>,
        rhs: Vec<f64>,
    ) -> Result<Self> {
        let sign_restrictions = vec![SignRestriction::NonNegative; cost.len()];
        Self::new(objective, cost, constraints, constraint_types, rhs, sign_restrictions)
    }

    /// Direction of optimization.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Objective function coefficients.
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    /// Coefficients of constraint `i`.
    pub fn constraint(&self, i: usize) -> &[f64] {
        debug_assert!(i < self.nr_constraints());

        &self.constraints[i]
    }

    /// Coefficient rows of all constraints.
    pub fn constraints(&self) -> &[Vec<f64>] {
        &self.constraints
    }

    /// Types of all constraints.
    pub fn constraint_types(&self) -> &[ConstraintType] {
        &self.constraint_types
    }

    /// Right hand sides of all constraints.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Sign restrictions of all variables.
    pub fn sign_restrictions(&self) -> &[SignRestriction] {
        &self.sign_restrictions
    }

    /// Number of (original) variables.
    pub fn nr_variables(&self) -> usize {
        self.cost.len()
    }

    /// Number of (original) constraints.
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Indices of the variables that need an integer value.
    pub fn integer_variables(&self) -> Vec<usize> {
        self.sign_restrictions.iter()
            .enumerate()
            .filter(|(_, restriction)| restriction.variable_type() == VariableType::Integer)
            .map(|(j, _)| j)
            .collect()
    }

    /// Objective value of an assignment of values to the variables.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.nr_variables());

        self.cost.iter().zip(values).map(|(c, x)| c * x).sum()
    }

    /// Whether an assignment satisfies all constraints and sign restrictions, up to `epsilon`.
    ///
    /// Integrality is not checked.
    pub fn is_feasible(&self, values: &[f64], epsilon: f64) -> bool {
        debug_assert_eq!(values.len(), self.nr_variables());

        let rows_satisfied = self.constraints.iter()
            .zip(&self.constraint_types)
            .zip(&self.rhs)
            .all(|((row, constraint_type), b)| {
                let lhs = row.iter().zip(values).map(|(a, x)| a * x).sum::<f64>();
                match constraint_type {
                    ConstraintType::Less => lhs <= b + epsilon,
                    ConstraintType::Greater => lhs >= b - epsilon,
                    ConstraintType::Equal => (lhs - b).abs() <= epsilon,
                }
            });
        let signs_satisfied = self.sign_restrictions.iter()
            .zip(values)
            .all(|(restriction, &x)| match restriction {
                SignRestriction::NonNegative | SignRestriction::Integer => x >= -epsilon,
                SignRestriction::NonPositive => x <= epsilon,
                SignRestriction::Free => true,
                SignRestriction::Binary => x >= -epsilon && x <= 1f64 + epsilon,
            });

        rows_satisfied && signs_satisfied
    }
}
