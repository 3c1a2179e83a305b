//! Small textbook problems, solved through the public interface only.
use tableau_lp::algorithm::{OptimizationResult, solve, SolveRelaxation, Status};
use tableau_lp::algorithm::integer::cutting_plane::cutting_plane;
use tableau_lp::algorithm::integer::knapsack::knapsack;
use tableau_lp::algorithm::sensitivity::SensitivityAnalyzer;
use tableau_lp::algorithm::session::{IterationKind, SolverSession};
use tableau_lp::data::linear_program::canonical_form::CanonicalForm;
use tableau_lp::data::linear_program::elements::{ConstraintType, Objective, SignRestriction};
use tableau_lp::data::linear_program::model::Model;

#[test]
fn production_planning() {
    let model = Model::with_nonnegative_variables(
        Objective::Maximize,
        vec![3f64, 2f64],
        vec![vec![1f64, 1f64], vec![1f64, 3f64]],
        vec![ConstraintType::Less, ConstraintType::Less],
        vec![4f64, 6f64],
    ).unwrap();
    let mut session = SolverSession::default();

    let solution = model.solve_relaxation(&mut session).unwrap().finite_optimum().unwrap();
    assert!((solution.objective_value() - 12f64).abs() < 1e-9);
    assert_eq!(solution.basis_indices(), &[0, 3]);

    let mut analyzer = SensitivityAnalyzer::from_model(&model, &mut session).unwrap().finite_optimum().unwrap();
    let report = analyzer.rhs_range(0).unwrap();
    assert_eq!(report.to_string(), "current value 4\n  4 + 1Δ ≥ 0\n  2 - 1Δ ≥ 0\nΔ ∈ [-4, 2]");

    let changed = analyzer.change_rhs(0, 5f64, &mut session).unwrap().finite_optimum().unwrap();
    assert!((changed.objective_value() - 15f64).abs() < 1e-9);
}

#[test]
fn mixed_integer() {
    // max 3x1 + 2x2, x1 + x2 <= 3.5, x1 <= 2.5, x1 integer
    let model = Model::new(
        Objective::Maximize,
        vec![3f64, 2f64],
        vec![vec![1f64, 1f64], vec![1f64, 0f64]],
        vec![ConstraintType::Less, ConstraintType::Less],
        vec![3.5f64, 2.5f64],
        vec![SignRestriction::Integer, SignRestriction::NonNegative],
    ).unwrap();
    let mut session = SolverSession::default();

    let result = solve(&model, &mut session).unwrap();
    assert_eq!(result.status(), Status::Optimal);
    let solution = result.finite_optimum().unwrap();
    assert!((solution.objective_value() - 9f64).abs() < 1e-6);
    assert_eq!(solution.variable_values()[0], 2f64);
    assert!((solution.variable_values()[1] - 1.5f64).abs() < 1e-6);

    let nr_nodes = session.iterations().iter()
        .filter(|iteration| matches!(iteration.kind, IterationKind::Node { .. }))
        .count();
    assert_eq!(nr_nodes, 3);
}

#[test]
fn covering_with_cuts() {
    // min x1 + x2, 2x1 + 2x2 >= 3, x integer
    let model = Model::new(
        Objective::Minimize,
        vec![1f64, 1f64],
        vec![vec![2f64, 2f64]],
        vec![ConstraintType::Greater],
        vec![3f64],
        vec![SignRestriction::Integer; 2],
    ).unwrap();
    let mut session = SolverSession::default();

    let relaxation = model.solve_relaxation(&mut session).unwrap().finite_optimum().unwrap();
    assert!((relaxation.objective_value() - 1.5f64).abs() < 1e-9);

    let report = cutting_plane(&CanonicalForm::new(&model), &mut session).unwrap();
    assert_eq!(report.nr_cuts, 1);
    let solution = report.result.finite_optimum().unwrap();
    assert!((solution.objective_value() - 2f64).abs() < 1e-9);
    assert_eq!(solution.variable_values(), &[2f64, 0f64]);
}

#[test]
fn knapsack_report() {
    let model = Model::new(
        Objective::Maximize,
        vec![8f64, 11f64, 6f64, 4f64],
        vec![vec![5f64, 7f64, 4f64, 3f64]],
        vec![ConstraintType::Less],
        vec![14f64],
        vec![SignRestriction::Binary; 4],
    ).unwrap();
    let mut session = SolverSession::default();

    let report = knapsack(&model, &mut session).unwrap();
    assert!(!report.limit_reached);
    assert!(report.iterations.len() <= 30);
    match report.result {
        OptimizationResult::FiniteOptimum(solution) => {
            assert_eq!(solution.objective_value, 21f64);
            assert_eq!(solution.variable_values, vec![0f64, 1f64, 1f64, 1f64]);
        },
        _ => panic!(),
    }

    let relaxation = solve(&model, &mut session).unwrap().finite_optimum().unwrap();
    assert!((relaxation.objective_value() - 21f64).abs() < 1e-6);
}

#[test]
fn infeasible_and_unbounded() {
    let infeasible = Model::with_nonnegative_variables(
        Objective::Maximize,
        vec![1f64],
        vec![vec![1f64], vec![1f64]],
        vec![ConstraintType::Less, ConstraintType::Greater],
        vec![1f64, 2f64],
    ).unwrap();
    let unbounded = Model::with_nonnegative_variables(
        Objective::Maximize,
        vec![1f64, 1f64],
        vec![vec![1f64, -1f64]],
        vec![ConstraintType::Less],
        vec![1f64],
    ).unwrap();
    let mut session = SolverSession::default();

    assert_eq!(solve(&infeasible, &mut session).unwrap().status(), Status::Infeasible);
    assert_eq!(solve(&unbounded, &mut session).unwrap().status(), Status::Unbounded);
    assert!(matches!(
        SensitivityAnalyzer::from_model(&unbounded, &mut session),
        Ok(OptimizationResult::Unbounded),
    ));
}
