//! # Integer programming
//!
//! Algorithms that find integer solutions by repeatedly solving linear relaxations that are
//! tightened with extra rows: branch and bound, a specialized branch and bound for 0/1 knapsack
//! problems, and Gomory's fractional cutting planes.
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::canonical_form::{CanonicalForm, VariableColumns};
use crate::data::number_types::float::numerical_precision::is_integral;

pub mod branch_and_bound;
pub mod cutting_plane;
pub mod knapsack;

/// Find the first constraint row of which the basic column belongs to an integer variable that has
/// a fractional value.
///
/// # Arguments
///
/// * `canonical`: Maps the columns back to the model variables.
/// * `tableau`: Optimal tableau.
/// * `integer_variables`: Model variables that need an integer value.
/// * `epsilon`: Integrality tolerance.
///
/// # Return value
///
/// The variable and its current value, if there is one.
pub(crate) fn first_fractional_variable(
    canonical: &CanonicalForm,
    tableau: &Tableau,
    integer_variables: &[usize],
    epsilon: f64,
) -> Option<(usize, f64)> {
    let values = canonical.original_values(&tableau.current_bfs());

    tableau.basis_indices().iter()
        .filter_map(|&column| column_variable(canonical, column))
        .filter(|variable| integer_variables.contains(variable))
        .map(|variable| (variable, values[variable]))
        .find(|&(_, value)| !is_integral(value, epsilon))
}

/// The model variable that a structural column represents (a part of).
fn column_variable(canonical: &CanonicalForm, column: usize) -> Option<usize> {
    canonical.variable_columns().iter().position(|columns| match *columns {
        VariableColumns::Positive(j) | VariableColumns::Negated(j) => j == column,
        VariableColumns::Split { positive, negative } => positive == column || negative == column,
    })
}
