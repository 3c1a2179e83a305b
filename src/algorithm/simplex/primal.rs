//! # Primal simplex method
//!
//! Moves from basic feasible solution to basic feasible solution, improving the objective in each
//! step, until no column has a negative relative cost.
use log::{debug, warn};

use crate::algorithm::OptimizationResult;
use crate::algorithm::session::{IterationKind, SolverSession};
use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, PivotRule};
use crate::algorithm::simplex::tableau::{is_in_basic_feasible_solution_state, Tableau};
use crate::data::number_types::float::numerical_precision::is_zero;
use crate::error::{Error, Result};

/// Maximizes the objective of a tableau that is in a basic feasible state.
///
/// After `SolverSettings::max_degenerate_pivots` consecutive pivots that leave the objective
/// unchanged, columns and rows are selected by the smallest index rule until the objective
/// improves again.
///
/// While calling this method, a number of requirements should be satisfied:
/// - There should be a valid basis (not necessarily optimal <=> dual feasible <=> c >= 0)
/// - All constraint values need to be nonnegative (primal feasibility)
///
/// # Arguments
///
/// * `tableau`: Tableau to pivot on, in place.
/// * `session`: Provides the tolerances and pivot limit, records every pivot.
///
/// # Return value
///
/// An `OptimizationResult` indicating whether or not the problem has a finite optimum, containing
/// the value of each tableau column if it does. It cannot be infeasible, as a feasible solution is
/// needed to start using this method. Fails when the pivot limit is reached.
pub fn primal<PR: PivotRule>(
    tableau: &mut Tableau,
    session: &mut SolverSession,
) -> Result<OptimizationResult<Vec<f64>>> {
    let epsilon = session.tolerances().general;
    let max_pivots = session.settings().max_pivots;
    let max_degenerate_pivots = session.settings().max_degenerate_pivots;

    let mut rule = PR::new();
    let mut smallest_index = FirstProfitable::new();
    let mut nr_pivots = 0;
    let mut nr_degenerate_pivots = 0;
    loop {
        debug_assert!(is_in_basic_feasible_solution_state(tableau, epsilon));

        let bland = nr_degenerate_pivots >= max_degenerate_pivots;
        let column = if bland {
            smallest_index.select_primal_pivot_column(tableau, epsilon)
        } else {
            rule.select_primal_pivot_column(tableau, epsilon)
        };

        match column {
            Some((column, _)) => {
                let row = if bland {
                    tableau.select_primal_pivot_row_by_lowest_basic(column, epsilon)
                } else {
                    tableau.select_primal_pivot_row(column, epsilon)
                };

                match row {
                    Some(row) => {
                        if nr_pivots == max_pivots {
                            warn!("primal simplex stopped after {} pivots", nr_pivots);
                            break Err(Error::PivotLimit(max_pivots));
                        }

                        let previous_value = tableau.objective_function_value();
                        tableau.bring_into_basis(column, row);
                        debug_assert!(tableau.objective_function_value() >= previous_value - epsilon);

                        if is_zero(tableau.objective_function_value() - previous_value, epsilon) {
                            nr_degenerate_pivots += 1;
                            if nr_degenerate_pivots == max_degenerate_pivots {
                                debug!("smallest index rule after {} degenerate pivots", nr_degenerate_pivots);
                            }
                        } else {
                            nr_degenerate_pivots = 0;
                        }

                        nr_pivots += 1;
                        session.count_pivot();
                        debug!(
                            "primal pivot on row {}, column {}: objective {}",
                            row, column, tableau.objective_function_value(),
                        );
                        session.record(IterationKind::PrimalPivot { row, column }, tableau);
                    },
                    None => break Ok(OptimizationResult::Unbounded),
                }
            },
            None => break Ok(OptimizationResult::FiniteOptimum(tableau.current_bfs())),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::OptimizationResult;
    use crate::algorithm::session::{IterationKind, SolverSession};
    use crate::algorithm::simplex::primal::primal;
    use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, SteepestDescentAlongVariable};
    use crate::error::Error;
    use crate::settings::SolverSettings;
    use crate::tests::{problem_1, problem_3, problem_5};

    #[test]
    fn finite_optimum() {
        let mut tableau = problem_1::initial_tableau();
        let mut session = SolverSession::default();
        let result = primal::<SteepestDescentAlongVariable>(&mut tableau, &mut session);

        assert_eq!(result, Ok(OptimizationResult::FiniteOptimum(vec![4f64, 0f64, 0f64, 2f64])));
        assert_eq!(tableau, problem_1::optimal_tableau());
        assert_eq!(session.nr_pivots(), 1);
        assert_eq!(session.iterations()[0].kind, IterationKind::PrimalPivot { row: 0, column: 0 });
    }

    #[test]
    fn rules_agree_on_objective() {
        let mut steepest = problem_3::initial_tableau();
        let mut first = problem_3::initial_tableau();
        let mut session = SolverSession::default();
        assert!(primal::<SteepestDescentAlongVariable>(&mut steepest, &mut session).is_ok());
        assert!(primal::<FirstProfitable>(&mut first, &mut session).is_ok());

        assert_abs_diff_eq!(steepest.objective_function_value(), 63f64, epsilon = 1e-9);
        assert_abs_diff_eq!(first.objective_function_value(), 63f64, epsilon = 1e-9);
    }

    #[test]
    fn unbounded() {
        let mut tableau = problem_1::unbounded_tableau();
        let mut session = SolverSession::default();
        let result = primal::<SteepestDescentAlongVariable>(&mut tableau, &mut session);
        assert_eq!(result, Ok(OptimizationResult::Unbounded));
    }

    #[test]
    fn pivot_limit() {
        let mut tableau = problem_3::initial_tableau();
        let settings = SolverSettings { max_pivots: 1, ..SolverSettings::default() };
        let mut session = SolverSession::new(settings);
        let result = primal::<SteepestDescentAlongVariable>(&mut tableau, &mut session);
        assert_eq!(result, Err(Error::PivotLimit(1)));
    }

    #[test]
    fn degenerate_cycle() {
        let settings = SolverSettings {
            max_pivots: 100,
            max_degenerate_pivots: usize::MAX,
            ..SolverSettings::default()
        };
        let mut tableau = problem_5::initial_tableau();
        let mut session = SolverSession::new(settings);
        let result = primal::<SteepestDescentAlongVariable>(&mut tableau, &mut session);
        assert_eq!(result, Err(Error::PivotLimit(100)));

        let mut tableau = problem_5::initial_tableau();
        let mut session = SolverSession::default();
        match primal::<SteepestDescentAlongVariable>(&mut tableau, &mut session) {
            Ok(OptimizationResult::FiniteOptimum(values)) => {
                assert_abs_diff_eq!(tableau.objective_function_value(), 0.05f64, epsilon = 1e-9);
                assert_abs_diff_eq!(values[0], 0.04f64, epsilon = 1e-9);
                assert_abs_diff_eq!(values[2], 1f64, epsilon = 1e-9);
            },
            _ => panic!(),
        }
        assert!(tableau.is_optimal(1e-9));
    }

    #[test]
    fn smallest_index_rule_from_the_start() {
        let settings = SolverSettings { max_degenerate_pivots: 0, ..SolverSettings::default() };
        let mut tableau = problem_5::initial_tableau();
        let mut session = SolverSession::new(settings);
        let result = primal::<SteepestDescentAlongVariable>(&mut tableau, &mut session);

        assert!(matches!(result, Ok(OptimizationResult::FiniteOptimum(_))));
        assert_abs_diff_eq!(tableau.objective_function_value(), 0.05f64, epsilon = 1e-9);
    }
}
