//! # Revised simplex method
//!
//! A primal simplex method that doesn't update the full tableau. Only the basis inverse is
//! maintained, from which the relative costs and the needed columns are computed when they are
//! needed. The full tableau is only built when the optimum is found, or to record a pivot.
use std::collections::HashSet;

use log::{debug, warn};

use crate::algorithm::OptimizationResult;
use crate::algorithm::session::{IterationKind, SolverSession};
use crate::algorithm::simplex::basis::{Basis, tableau_from_basis};
use crate::algorithm::simplex::strategy::pivot_rule::{PivotRule, RelativeCosts};
use crate::algorithm::simplex::tableau::Tableau;
use crate::algorithm::utilities::first_minimum;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::number_types::float::numerical_precision::{is_negative, is_positive};
use crate::error::{Error, Result};

/// State of the revised simplex method.
struct RevisedSimplex<'a> {
    /// Provides the constraint data and the cost.
    original: &'a Tableau,
    /// Cost of each column in the maximization.
    cost: Vec<f64>,
    basis: Basis,
    /// Set version of the basis columns.
    basis_columns: HashSet<usize>,
    /// `c_B B^-1`, recomputed after each basis change.
    shadow_prices: Vec<f64>,
    /// `B^-1 b`, recomputed after each basis change.
    basic_values: Vec<f64>,
}

impl<'a> RevisedSimplex<'a> {
    fn new(canonical: &'a CanonicalForm) -> Self {
        let original = canonical.tableau();
        let basis = Basis::identity(original.basis_indices().to_vec());
        let basis_columns = basis.columns().iter().copied().collect();

        let mut simplex = Self {
            original,
            cost: canonical.canonical_cost(),
            basis,
            basis_columns,
            shadow_prices: Vec::new(),
            basic_values: Vec::new(),
        };
        simplex.update_values();

        simplex
    }

    fn update_values(&mut self) {
        self.shadow_prices = self.basis.shadow_prices(&self.cost);
        self.basic_values = self.basis.transform(&self.original.constraint_values());
    }

    /// `B^-1 a_j`.
    fn generate_column(&self, column: usize) -> Vec<f64> {
        self.basis.transform(&self.original.generate_column(column))
    }

    /// Ratio test, like the one of the full tableau.
    fn select_primal_pivot_row(&self, column_values: &[f64], epsilon: f64) -> Option<usize> {
        let candidates = column_values.iter()
            .enumerate()
            .filter(|&(_, &value)| is_positive(value, epsilon))
            .map(|(row, &value)| (row, self.basic_values[row].max(0f64) / value));

        first_minimum(candidates, epsilon).map(|(row, _)| row)
    }

    fn bring_into_basis(&mut self, row: usize, column: usize, column_values: &[f64]) {
        let leaving = self.basis.columns()[row];
        self.basis.change(row, column, column_values);
        self.basis_columns.remove(&leaving);
        self.basis_columns.insert(column);
        self.update_values();
    }

    fn objective_function_value(&self) -> f64 {
        self.basis.basic_costs(&self.cost).iter()
            .zip(&self.basic_values)
            .map(|(c, x)| c * x)
            .sum()
    }

    /// Value of each column.
    fn current_bfs(&self) -> Vec<f64> {
        let mut values = vec![0f64; self.original.nr_columns()];
        for (&column, &value) in self.basis.columns().iter().zip(&self.basic_values) {
            values[column] = value;
        }

        values
    }
}

impl<'a> RelativeCosts for RevisedSimplex<'a> {
    fn nr_columns(&self) -> usize {
        self.original.nr_columns()
    }

    fn is_in_basis(&self, column: usize) -> bool {
        self.basis_columns.contains(&column)
    }

    fn relative_cost(&self, column: usize) -> f64 {
        Basis::relative_cost(&self.shadow_prices, &self.original.generate_column(column), self.cost[column])
    }
}

/// Solve the linear program of a canonical form with the revised simplex method.
///
/// The slack basis of the canonical form needs to be feasible, that is, all right hand side values
/// need to be nonnegative.
///
/// # Return value
///
/// The final tableau together with the value of each of its columns, if there is a finite optimum.
/// Fails with `Error::MalformedModel` if the slack basis is not feasible.
pub fn revised_primal<PR: PivotRule>(
    canonical: &CanonicalForm,
    session: &mut SolverSession,
) -> Result<OptimizationResult<(Tableau, Vec<f64>)>> {
    let epsilon = session.tolerances().general;
    let max_pivots = session.settings().max_pivots;

    if canonical.tableau().constraint_values().iter().any(|&b| is_negative(b, epsilon)) {
        return Err(Error::MalformedModel(
            "the revised simplex method needs a nonnegative right hand side".to_string(),
        ));
    }

    let mut simplex = RevisedSimplex::new(canonical);
    let mut rule = PR::new();
    let mut nr_pivots = 0;
    loop {
        match rule.select_primal_pivot_column(&simplex, epsilon) {
            Some((column, _)) => {
                let column_values = simplex.generate_column(column);
                match simplex.select_primal_pivot_row(&column_values, epsilon) {
                    Some(row) => {
                        if nr_pivots == max_pivots {
                            warn!("revised simplex stopped after {} pivots", nr_pivots);
                            break Err(Error::PivotLimit(max_pivots));
                        }

                        simplex.bring_into_basis(row, column, &column_values);

                        nr_pivots += 1;
                        session.count_pivot();
                        debug!(
                            "revised pivot on row {}, column {}: objective {}",
                            row, column, simplex.objective_function_value(),
                        );
                        if session.settings().record_iterations {
                            let tableau = tableau_from_basis(simplex.original, &simplex.basis, &simplex.cost);
                            session.record(IterationKind::PrimalPivot { row, column }, &tableau);
                        }
                    },
                    None => break Ok(OptimizationResult::Unbounded),
                }
            },
            None => {
                let values = simplex.current_bfs();
                let tableau = tableau_from_basis(simplex.original, &simplex.basis, &simplex.cost);
                break Ok(OptimizationResult::FiniteOptimum((tableau, values)));
            },
        }
    }
}
