//! # Dual simplex method
//!
//! Restores primal feasibility of a tableau of which some constraint values are negative, as
//! happens after appending a cut, a branching row or a model constraint, or after changing the
//! right hand side.
use log::{debug, warn};

use crate::algorithm::OptimizationResult;
use crate::algorithm::session::{IterationKind, SolverSession};
use crate::algorithm::simplex::tableau::{has_unit_basis, Tableau};
use crate::error::{Error, Result};

/// Pivot until all constraint values are nonnegative.
///
/// The leaving row is the one with the most negative constraint value. The entering column is,
/// among the columns with a negative value in that row, the one with the smallest ratio
/// `|relative cost / value|`.
///
/// # Arguments
///
/// * `tableau`: Tableau with a valid basis, to pivot on in place.
/// * `session`: Provides the tolerances and pivot limit, records every pivot.
///
/// # Return value
///
/// `Infeasible` if a row with a negative constraint value has no negative entries, otherwise a
/// `FiniteOptimum` with the now feasible basic solution. That solution need not be optimal; the
/// primal simplex method should run afterwards. Fails when the pivot limit is reached.
pub fn dual(
    tableau: &mut Tableau,
    session: &mut SolverSession,
) -> Result<OptimizationResult<Vec<f64>>> {
    let epsilon = session.tolerances().general;
    let max_pivots = session.settings().max_pivots;

    let mut nr_pivots = 0;
    loop {
        debug_assert!(has_unit_basis(tableau, epsilon));

        match tableau.select_dual_pivot_row(epsilon) {
            Some(row) => match tableau.select_dual_pivot_column(row, epsilon) {
                Some(column) => {
                    if nr_pivots == max_pivots {
                        warn!("dual simplex stopped after {} pivots", nr_pivots);
                        break Err(Error::PivotLimit(max_pivots));
                    }

                    tableau.bring_into_basis(column, row);

                    nr_pivots += 1;
                    session.count_pivot();
                    debug!(
                        "dual pivot on row {}, column {}: objective {}",
                        row, column, tableau.objective_function_value(),
                    );
                    session.record(IterationKind::DualPivot { row, column }, tableau);
                },
                None => {
                    debug!("row {} proves infeasibility", row);
                    break Ok(OptimizationResult::Infeasible);
                },
            },
            None => break Ok(OptimizationResult::FiniteOptimum(tableau.current_bfs())),
        }
    }
}
