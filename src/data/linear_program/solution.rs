//! # Representation of optimal solutions
//!
//! Once a linear program is solved, a solution is derived. It is expressed in the variables of the
//! model, not in the columns of the tableau, but keeps the final tableau around for inspection and
//! for sensitivity analysis.
use crate::algorithm::simplex::tableau::Tableau;

/// Represents an optimal solution to a linear program.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Value of the objective function for this solution, in the direction of the model.
    objective_value: f64,
    /// One value for each model variable.
    variable_values: Vec<f64>,
    /// The tableau from which the values were read.
    tableau: Tableau,
}

impl Solution {
    /// Create a new `Solution` instance.
    ///
    /// A plain constructor.
    ///
    /// # Arguments
    ///
    /// * `objective_value`: Value of the model objective.
    /// * `variable_values`: Value of each model variable.
    /// * `tableau`: Final tableau.
    pub fn new(objective_value: f64, variable_values: Vec<f64>, tableau: Tableau) -> Self {
        Self { objective_value, variable_values, tableau }
    }

    /// Value of the model objective.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Value of each model variable.
    pub fn variable_values(&self) -> &[f64] {
        &self.variable_values
    }

    /// Final tableau.
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// Take the final tableau out of the solution.
    pub fn into_tableau(self) -> Tableau {
        self.tableau
    }

    /// For each constraint row of the final tableau, its basic column.
    pub fn basis_indices(&self) -> &[usize] {
        self.tableau.basis_indices()
    }

    /// Whether two solutions have the same objective value and variable values, up to `epsilon`.
    ///
    /// The tableaus are not compared: different (degenerate) bases can describe the same point.
    pub fn is_approximately_equal_to(&self, other: &Self, epsilon: f64) -> bool {
        (self.objective_value - other.objective_value).abs() <= epsilon
            && self.variable_values.len() == other.variable_values.len()
            && self.variable_values.iter()
                .zip(&other.variable_values)
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}
