//! # Gomory's fractional cutting planes
//!
//! When a constraint row of an optimal tableau has a basic column that should be integer but a
//! fractional right hand side, any integer solution satisfies
//!
//! ```text
//! sum_j frac(a_j) x_j >= frac(b)
//! ```
//!
//! while the current basic solution, in which all non basic columns are zero, doesn't. Appending
//! this row (negated, with its own surplus column) and re-optimizing with the dual simplex method
//! moves the solution closer to the integer hull.
use log::{debug, info, warn};

use crate::algorithm::OptimizationResult;
use crate::algorithm::session::{IterationKind, SolverSession};
use crate::algorithm::simplex::{solution_from_tableau, solve};
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::ConstraintType;
use crate::data::linear_program::solution::Solution;
use crate::data::number_types::float::numerical_precision::{fractional_part, is_positive, snap_to_integer};
use crate::error::{Error, Result};

/// Outcome of the cutting plane method.
#[derive(Clone, Debug, PartialEq)]
pub struct CuttingPlaneReport {
    /// The integer optimum, if there is one.
    pub result: OptimizationResult<Solution>,
    /// Number of cuts that were added.
    pub nr_cuts: usize,
}

/// A cut derived from a tableau row, in `>=` form.
#[derive(Clone, Debug, PartialEq)]
pub struct GomoryCut {
    /// Constraint row the cut was derived from.
    pub source_row: usize,
    /// Fractional part of the coefficient of each column.
    pub coefficients: Vec<f64>,
    /// Fractional part of the right hand side.
    pub rhs: f64,
}

/// Solve a pure integer program with Gomory's fractional cuts.
///
/// # Arguments
///
/// * `canonical`: Canonical form of a model of which all variables are integer and all data is
/// integer. A model without any integer variable is treated as a pure integer program.
/// * `session`: Tolerances, cut and pivot limits and audit trail.
///
/// # Return value
///
/// The integer optimum with the number of cuts needed. Fails with `Error::MalformedModel` if the
/// model is not a pure integer program with integer data, and with `Error::CutLimit` if the
/// maximum number of cuts doesn't suffice.
pub fn cutting_plane(
    canonical: &CanonicalForm,
    session: &mut SolverSession,
) -> Result<CuttingPlaneReport> {
    let mut integer_columns = if canonical.integer_variables().is_empty() {
        canonical.pure_integer_columns()
    } else if canonical.is_pure_integer() {
        canonical.integer_columns().to_vec()
    } else {
        return Err(Error::MalformedModel("cutting planes need all variables to be integer".to_string()));
    };
    if !integer_columns.iter().all(|&is_integer| is_integer) {
        return Err(Error::MalformedModel("cutting planes need all model data to be integer".to_string()));
    }

    let epsilon = session.tolerances().general;
    let max_cuts = session.settings().max_cuts;
    let mut tableau = canonical.tableau().clone();
    session.record(IterationKind::Initial, &tableau);

    let mut nr_cuts = 0;
    let mut result = solve(&mut tableau, session)?;
    loop {
        let values = match result {
            OptimizationResult::FiniteOptimum(values) => values,
            OptimizationResult::Infeasible => {
                info!("relaxation became infeasible after {} cuts", nr_cuts);
                return Ok(CuttingPlaneReport { result: OptimizationResult::Infeasible, nr_cuts });
            },
            OptimizationResult::Unbounded => {
                info!("relaxation is unbounded after {} cuts", nr_cuts);
                return Ok(CuttingPlaneReport { result: OptimizationResult::Unbounded, nr_cuts });
            },
        };

        match generate_cut(&tableau, &integer_columns, epsilon) {
            None => {
                info!("integer optimum found after {} cuts", nr_cuts);
                let solution = solution_from_tableau(canonical, tableau, &values);
                let variable_values = solution.variable_values().iter()
                    .map(|&value| snap_to_integer(value, epsilon))
                    .collect();
                let solution = Solution::new(solution.objective_value(), variable_values, solution.into_tableau());
                return Ok(CuttingPlaneReport { result: OptimizationResult::FiniteOptimum(solution), nr_cuts });
            },
            Some(cut) => {
                if nr_cuts == max_cuts {
                    warn!("cutting planes stopped after {} cuts", nr_cuts);
                    return Err(Error::CutLimit(max_cuts));
                }

                debug!("cut from row {} with right hand side {}", cut.source_row, cut.rhs);
                tableau.add_constraint(&cut.coefficients, ConstraintType::Greater, cut.rhs);
                integer_columns.push(true);
                nr_cuts += 1;
                session.record(IterationKind::Cut { source_row: cut.source_row }, &tableau);

                result = solve(&mut tableau, session)?;
            },
        }
    }
}

/// Derive a cut from the first row with an integer basic column and a fractional value.
///
/// # Arguments
///
/// * `tableau`: Optimal tableau.
/// * `integer_columns`: For each column of the tableau, whether it is integer in every integer
/// solution.
/// * `epsilon`: Fractional parts at most this large are considered zero.
///
/// # Return value
///
/// The cut, or `None` if all integer basic columns have an integer value.
pub fn generate_cut(tableau: &Tableau, integer_columns: &[bool], epsilon: f64) -> Option<GomoryCut> {
    debug_assert_eq!(integer_columns.len(), tableau.nr_columns());

    let source_row = (0..tableau.nr_rows()).find(|&i| {
        integer_columns[tableau.basis_indices()[i]]
            && is_positive(fractional_part(tableau.constraint_value(i), epsilon), epsilon)
    })?;

    let coefficients = tableau.generate_row(source_row).iter()
        .map(|&value| fractional_part(value, epsilon))
        .collect();
    let rhs = fractional_part(tableau.constraint_value(source_row), epsilon);

    Some(GomoryCut { source_row, coefficients, rhs })
}

#[cfg(test)]
mod test {
    use crate::algorithm::integer::cutting_plane::{cutting_plane, generate_cut};
    use crate::algorithm::session::{IterationKind, SolverSession};
    use crate::algorithm::simplex::solve;
    use crate::data::linear_program::canonical_form::CanonicalForm;
    use crate::data::linear_program::elements::{ConstraintType, Objective, SignRestriction};
    use crate::data::linear_program::model::Model;
    use crate::error::Error;
    use crate::settings::SolverSettings;
    use crate::tests::{problem_1, problem_3};

    #[test]
    fn first_cut() {
        let canonical = CanonicalForm::new(&problem_3::integer_model());
        let mut tableau = canonical.tableau().clone();
        let mut session = SolverSession::default();
        assert!(solve(&mut tableau, &mut session).is_ok());

        // x2 + 7/22 s1 + 1/22 s2 = 7/2
        let cut = generate_cut(&tableau, canonical.integer_columns(), 1e-6).unwrap();
        assert_eq!(cut.source_row, 0);
        assert_abs_diff_eq!(cut.rhs, 0.5f64, epsilon = 1e-9);
        assert_abs_diff_eq!(cut.coefficients.as_slice(), &[0f64, 0f64, 7f64 / 22f64, 1f64 / 22f64][..], epsilon = 1e-9);
    }

    #[test]
    fn integer_optimum() {
        let canonical = CanonicalForm::new(&problem_3::integer_model());
        let mut session = SolverSession::default();
        let report = cutting_plane(&canonical, &mut session).unwrap();

        assert!(report.nr_cuts > 0);
        let solution = report.result.finite_optimum().unwrap();
        assert_abs_diff_eq!(solution.objective_value(), 55f64, epsilon = 1e-6);
        assert_eq!(solution.variable_values(), &[4f64, 3f64]);
        let nr_recorded_cuts = session.iterations().iter()
            .filter(|iteration| matches!(iteration.kind, IterationKind::Cut { .. }))
            .count();
        assert_eq!(nr_recorded_cuts, report.nr_cuts);
    }

    #[test]
    fn no_cut_needed() {
        let mut session = SolverSession::default();
        for model in [problem_1::model_with_integer_variables(), problem_1::model()] {
            let report = cutting_plane(&CanonicalForm::new(&model), &mut session).unwrap();
            assert_eq!(report.nr_cuts, 0);
            let solution = report.result.finite_optimum().unwrap();
            assert_abs_diff_eq!(solution.objective_value(), 12f64, epsilon = 1e-9);
            assert_eq!(solution.variable_values(), &[4f64, 0f64]);
        }
    }

    #[test]
    fn mixed_integer_model() {
        let model = Model::new(
            Objective::Maximize,
            vec![3f64, 2f64],
            vec![vec![1f64, 1f64], vec![1f64, 3f64]],
            vec![ConstraintType::Less, ConstraintType::Less],
            vec![4f64, 6f64],
            vec![SignRestriction::Integer, SignRestriction::NonNegative],
        ).unwrap();
        let mut session = SolverSession::default();
        let result = cutting_plane(&CanonicalForm::new(&model), &mut session);
        assert!(matches!(result, Err(Error::MalformedModel(_))));
    }

    #[test]
    fn unmarked_model_is_pure_integer() {
        let canonical = CanonicalForm::new(&problem_3::model());
        assert!(canonical.integer_columns().iter().all(|&is_integer| !is_integer));
        assert!(canonical.pure_integer_columns().iter().all(|&is_integer| is_integer));

        let mut session = SolverSession::default();
        let solution = cutting_plane(&canonical, &mut session).unwrap().result.finite_optimum().unwrap();
        assert_abs_diff_eq!(solution.objective_value(), 55f64, epsilon = 1e-6);
        assert_eq!(solution.variable_values(), &[4f64, 3f64]);
    }

    #[test]
    fn cut_limit() {
        let canonical = CanonicalForm::new(&problem_3::integer_model());
        let settings = SolverSettings { max_cuts: 0, ..SolverSettings::default() };
        let mut session = SolverSession::new(settings);
        assert_eq!(cutting_plane(&canonical, &mut session), Err(Error::CutLimit(0)));
    }
}
