//! Minimization with `>=` constraints, of which the slack basis is infeasible.
//!
//! ```text
//! min 2x1 + 3x2
//! s.t. x1 +  x2 >= 4
//!      x1 + 3x2 >= 6
//! ```
//!
//! The dual simplex method pivots on (row 1, column 1) and then on (row 0, column 0), reaching the
//! optimum 9 at `(3, 1)`.
use crate::algorithm::OptimizationResult;
use crate::algorithm::session::{IterationKind, SolverSession};
use crate::algorithm::simplex::solve_canonical;
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::{ConstraintType, Objective};
use crate::data::linear_program::model::Model;

#[test]
fn conversion_pipeline() {
    let canonical = CanonicalForm::new(&model());
    assert_eq!(canonical.tableau(), &initial_tableau());

    let mut session = SolverSession::default();
    match solve_canonical(&canonical, &mut session) {
        Ok(OptimizationResult::FiniteOptimum(solution)) => {
            assert!(solution.tableau().matrix().approximately_equals(optimal_tableau().matrix(), 1e-9));
            assert_abs_diff_eq!(solution.objective_value(), 9f64, epsilon = 1e-9);
            assert_abs_diff_eq!(solution.variable_values(), &[3f64, 1f64][..], epsilon = 1e-9);
        },
        _ => panic!(),
    }

    let pivots = session.iterations().iter()
        .skip(1)
        .map(|iteration| iteration.kind)
        .collect::<Vec<_>>();
    assert_eq!(pivots, vec![
        IterationKind::DualPivot { row: 1, column: 1 },
        IterationKind::DualPivot { row: 0, column: 0 },
    ]);
}

pub fn model() -> Model {
    Model::with_nonnegative_variables(
        Objective::Minimize,
        vec![2f64, 3f64],
        vec![vec![1f64, 1f64], vec![1f64, 3f64]],
        vec![ConstraintType::Greater, ConstraintType::Greater],
        vec![4f64, 6f64],
    ).unwrap()
}

pub fn initial_tableau() -> Tableau {
    Tableau::new(
        DenseMatrix::from_data(vec![
            vec![2f64, 3f64, 0f64, 0f64, 0f64],
            vec![-1f64, -1f64, 1f64, 0f64, -4f64],
            vec![-1f64, -3f64, 0f64, 1f64, -6f64],
        ]),
        vec![2, 3],
    )
}

pub fn optimal_tableau() -> Tableau {
    Tableau::new(
        DenseMatrix::from_data(vec![
            vec![0f64, 0f64, 1.5f64, 0.5f64, -9f64],
            vec![1f64, 0f64, -1.5f64, 0.5f64, 3f64],
            vec![0f64, 1f64, 0.5f64, -0.5f64, 1f64],
        ]),
        vec![0, 1],
    )
}
