//! # The Simplex algorithm
//!
//! This module contains all data structures and logic specific to the simplex algorithm. The
//! algorithm is implemented as described in chapters 2 and 4 of Combinatorial Optimization, a book
//! by Christos H. Papadimitriou and Kenneth Steiglitz.
//!
//! A tableau is always solved in two stages: the dual simplex method first makes all constraint
//! values nonnegative, after which the primal simplex method optimizes.
use crate::algorithm::{OptimizationResult, SolveRelaxation};
use crate::algorithm::session::{IterationKind, SolverSession};
use crate::algorithm::simplex::strategy::pivot_rule::SteepestDescentAlongVariable;
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;
use crate::error::Result;

pub mod basis;
pub mod dual;
pub mod primal;
pub mod revised;
pub mod strategy;
pub mod tableau;

/// Solve a tableau in place, with the dual simplex method followed by the primal simplex method.
///
/// # Arguments
///
/// * `tableau`: Tableau with a valid basis, which may have negative constraint values.
/// * `session`: Tolerances, limits and audit trail.
///
/// # Return value
///
/// The value of each tableau column if there is a finite optimum.
pub fn solve(
    tableau: &mut Tableau,
    session: &mut SolverSession,
) -> Result<OptimizationResult<Vec<f64>>> {
    match dual::dual(tableau, session)? {
        OptimizationResult::FiniteOptimum(_) => {
            primal::primal::<SteepestDescentAlongVariable>(tableau, session)
        },
        OptimizationResult::Infeasible => Ok(OptimizationResult::Infeasible),
        OptimizationResult::Unbounded => Ok(OptimizationResult::Unbounded),
    }
}

/// Read the solution of a model from an optimal tableau.
///
/// # Arguments
///
/// * `canonical`: Canonical form of the model that the tableau was derived from.
/// * `tableau`: Optimal tableau, possibly with rows and columns appended.
/// * `column_values`: Value of each column of the tableau.
pub fn solution_from_tableau(
    canonical: &CanonicalForm,
    tableau: Tableau,
    column_values: &[f64],
) -> Solution {
    let objective_value = canonical.objective_value(tableau.objective_function_value());
    let variable_values = canonical.original_values(column_values);

    Solution::new(objective_value, variable_values, tableau)
}

/// Solve the linear program described by a canonical form.
///
/// The initial tableau is recorded in the session, followed by every pivot.
pub fn solve_canonical(
    canonical: &CanonicalForm,
    session: &mut SolverSession,
) -> Result<OptimizationResult<Solution>> {
    let mut tableau = canonical.tableau().clone();
    session.record(IterationKind::Initial, &tableau);

    let result = solve(&mut tableau, session)?;
    Ok(result.map(|values| solution_from_tableau(canonical, tableau, &values)))
}

impl SolveRelaxation for Model {
    fn solve_relaxation(&self, session: &mut SolverSession) -> Result<OptimizationResult<Solution>> {
        solve_canonical(&CanonicalForm::new(self), session)
    }
}
