//! Properties of the algorithms on small, randomly generated problems.
//!
//! All problems are maximizations with nonnegative data and `<=` constraints, such that they are
//! feasible (the origin) and bounded (every coefficient is positive). Integer points can be
//! enumerated within the bounds that the right hand sides imply.
use itertools::Itertools;
use proptest::prelude::*;

use tableau_lp::algorithm::{OptimizationResult, SolveRelaxation};
use tableau_lp::algorithm::integer::branch_and_bound::branch_and_bound;
use tableau_lp::algorithm::integer::cutting_plane::generate_cut;
use tableau_lp::algorithm::sensitivity::{Duality, SensitivityAnalyzer};
use tableau_lp::algorithm::session::SolverSession;
use tableau_lp::algorithm::simplex::basis::{Basis, basis_submatrix};
use tableau_lp::algorithm::simplex::solve;
use tableau_lp::data::linear_algebra::matrix::DenseMatrix;
use tableau_lp::data::linear_program::canonical_form::CanonicalForm;
use tableau_lp::data::linear_program::elements::{ConstraintType, Objective, SignRestriction};
use tableau_lp::data::linear_program::model::Model;
use tableau_lp::settings::SolverSettings;

const NR_VARIABLES: usize = 2;
const MAX_RHS: i32 = 15;

fn model(cost: &[i32], constraints: &[Vec<i32>], rhs: &[i32], sign_restriction: SignRestriction) -> Model {
    Model::new(
        Objective::Maximize,
        cost.iter().map(|&c| c as f64).collect(),
        constraints.iter().map(|row| row.iter().map(|&a| a as f64).collect()).collect(),
        vec![ConstraintType::Less; constraints.len()],
        rhs.iter().map(|&b| b as f64).collect(),
        vec![sign_restriction; cost.len()],
    ).unwrap()
}

fn problem() -> impl Strategy<Value = (Vec<i32>, Vec<Vec<i32>>, Vec<i32>)> {
    (1..=3usize).prop_flat_map(|nr_constraints| (
        prop::collection::vec(1..=9i32, NR_VARIABLES),
        prop::collection::vec(prop::collection::vec(1..=6i32, NR_VARIABLES), nr_constraints),
        prop::collection::vec(0..=MAX_RHS, nr_constraints),
    ))
}

/// All integer points satisfying the constraints.
fn integer_points(constraints: &[Vec<i32>], rhs: &[i32]) -> Vec<Vec<i32>> {
    (0..NR_VARIABLES)
        .map(|_| 0..=MAX_RHS)
        .multi_cartesian_product()
        .filter(|x| constraints.iter().zip(rhs).all(|(row, &b)| {
            row.iter().zip(x).map(|(a, x)| a * x).sum::<i32>() <= b
        }))
        .collect()
}

proptest! {
    #[test]
    fn relaxation_is_feasible((cost, constraints, rhs) in problem()) {
        let model = model(&cost, &constraints, &rhs, SignRestriction::NonNegative);
        let mut session = SolverSession::default();
        match model.solve_relaxation(&mut session) {
            Ok(OptimizationResult::FiniteOptimum(solution)) => {
                prop_assert!(model.is_feasible(solution.variable_values(), 1e-6));
                let value = model.objective_value(solution.variable_values());
                prop_assert!((value - solution.objective_value()).abs() < 1e-6);
            },
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn branch_and_bound_matches_enumeration((cost, constraints, rhs) in problem()) {
        let model = model(&cost, &constraints, &rhs, SignRestriction::Integer);
        let best = integer_points(&constraints, &rhs).into_iter()
            .map(|x| cost.iter().zip(&x).map(|(c, x)| c * x).sum::<i32>())
            .max()
            .unwrap_or(0);

        let mut session = SolverSession::new(SolverSettings { record_iterations: false, ..SolverSettings::default() });
        let report = branch_and_bound(&CanonicalForm::new(&model), &mut session).unwrap();
        prop_assert!(!report.limit_reached);
        match report.result {
            OptimizationResult::FiniteOptimum(solution) => {
                prop_assert!((solution.objective_value() - best as f64).abs() < 1e-6);
                prop_assert!(solution.variable_values().iter().all(|x| x.fract() == 0f64));
                prop_assert!(model.is_feasible(solution.variable_values(), 1e-6));
            },
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn cut_separates_vertex_from_integer_points((cost, constraints, rhs) in problem()) {
        let model = model(&cost, &constraints, &rhs, SignRestriction::Integer);
        let canonical = CanonicalForm::new(&model);
        let mut tableau = canonical.tableau().clone();
        let mut session = SolverSession::default();
        let values = solve(&mut tableau, &mut session).unwrap().finite_optimum().unwrap();

        if let Some(cut) = generate_cut(&tableau, canonical.integer_columns(), 1e-6) {
            let lhs = |point: &[f64]| cut.coefficients.iter().zip(point).map(|(a, x)| a * x).sum::<f64>();
            prop_assert!(lhs(&values) < cut.rhs - 1e-6);

            for x in integer_points(&constraints, &rhs) {
                // columns are the variables followed by the slacks
                let point = x.iter()
                    .map(|&x| x as f64)
                    .chain(constraints.iter().zip(&rhs).map(|(row, &b)| {
                        (b - row.iter().zip(&x).map(|(a, x)| a * x).sum::<i32>()) as f64
                    }))
                    .collect::<Vec<_>>();
                prop_assert!(lhs(&point) >= cut.rhs - 1e-6);
            }
        }
    }

    #[test]
    fn basis_inverse_round_trip((cost, constraints, rhs) in problem()) {
        let model = model(&cost, &constraints, &rhs, SignRestriction::NonNegative);
        let canonical = CanonicalForm::new(&model);
        let mut tableau = canonical.tableau().clone();
        let mut session = SolverSession::default();
        prop_assert!(solve(&mut tableau, &mut session).is_ok());

        let basis = Basis::new(canonical.tableau(), tableau.basis_indices().to_vec(), 1e-9).unwrap();
        let product = basis.inverse().multiply(&basis_submatrix(canonical.tableau(), basis.columns()));
        prop_assert!(product.approximately_equals(&DenseMatrix::identity(canonical.nr_rows()), 1e-6));
    }

    #[test]
    fn strong_duality((cost, constraints, rhs) in problem()) {
        let model = model(&cost, &constraints, &rhs, SignRestriction::NonNegative);
        let mut session = SolverSession::default();
        let analyzer = SensitivityAnalyzer::from_model(&model, &mut session).unwrap().finite_optimum().unwrap();

        let report = analyzer.duality();
        prop_assert_eq!(report.duality, Duality::Strong);
        let prices = analyzer.constraint_shadow_prices();
        let dual_objective = prices.iter().zip(&rhs).map(|(y, &b)| y * b as f64).sum::<f64>();
        prop_assert!((dual_objective - analyzer.objective_value()).abs() < 1e-6);
    }
}
