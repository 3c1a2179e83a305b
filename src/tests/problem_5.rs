//! Beale's degenerate problem, on which the most negative relative cost rule cycles.
//!
//! ```text
//! max 0.75x1 - 150x2 + 0.02x3 - 6x4
//! s.t. 0.25x1 - 60x2 - 0.04x3 + 9x4 <= 0
//!      0.5x1  - 90x2 - 0.02x3 + 3x4 <= 0
//!                         x3        <= 1
//! ```
//!
//! The optimum is 0.05 at `(0.04, 0, 1, 0)`.
use crate::algorithm::OptimizationResult;
use crate::algorithm::SolveRelaxation;
use crate::algorithm::session::SolverSession;
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::{ConstraintType, Objective};
use crate::data::linear_program::model::Model;

#[test]
fn conversion_pipeline() {
    assert_eq!(CanonicalForm::new(&model()).tableau(), &initial_tableau());

    let mut session = SolverSession::default();
    match model().solve_relaxation(&mut session) {
        Ok(OptimizationResult::FiniteOptimum(solution)) => {
            assert_abs_diff_eq!(solution.objective_value(), 0.05f64, epsilon = 1e-9);
            assert_abs_diff_eq!(solution.variable_values(), &[0.04f64, 0f64, 1f64, 0f64][..], epsilon = 1e-9);
        },
        _ => panic!(),
    }
    // ten degenerate pivots, then two by the smallest index rule
    assert_eq!(session.nr_pivots(), 12);
}

pub fn model() -> Model {
    Model::with_nonnegative_variables(
        Objective::Maximize,
        vec![0.75f64, -150f64, 0.02f64, -6f64],
        vec![
            vec![0.25f64, -60f64, -0.04f64, 9f64],
            vec![0.5f64, -90f64, -0.02f64, 3f64],
            vec![0f64, 0f64, 1f64, 0f64],
        ],
        vec![ConstraintType::Less, ConstraintType::Less, ConstraintType::Less],
        vec![0f64, 0f64, 1f64],
    ).unwrap()
}

pub fn initial_tableau() -> Tableau {
    Tableau::new(
        DenseMatrix::from_data(vec![
            vec![-0.75f64, 150f64, -0.02f64, 6f64, 0f64, 0f64, 0f64, 0f64],
            vec![0.25f64, -60f64, -0.04f64, 9f64, 1f64, 0f64, 0f64, 0f64],
            vec![0.5f64, -90f64, -0.02f64, 3f64, 0f64, 1f64, 0f64, 0f64],
            vec![0f64, 0f64, 1f64, 0f64, 0f64, 0f64, 1f64, 1f64],
        ]),
        vec![4, 5, 6],
    )
}
