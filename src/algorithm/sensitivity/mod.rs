//! # Sensitivity analysis
//!
//! Given an optimal tableau, the basis inverse `B^-1` relates every quantity of the current
//! tableau to the data of the original tableau:
//!
//! ```text
//! x_B = B^-1 b,    y = c_B B^-1,    d_j = y a_j - c_j
//! ```
//!
//! The basis stays optimal for as long as `x_B >= 0` and `d >= 0`. Perturbing a single model value
//! by `Δ` changes one of these vectors linearly in `Δ`, which gives the ranges below.
//!
//! The analyzer owns a copy of the canonical form. Changes are applied to it, such that it always
//! describes the current problem, and the current tableau is re-optimized from the last basis.
use std::fmt::{Display, Formatter};
use std::fmt;

use itertools::Itertools;
use log::{debug, info};

use crate::algorithm::OptimizationResult;
use crate::algorithm::sensitivity::range::{DeltaInequality, Range};
use crate::algorithm::session::{IterationKind, SolverSession};
use crate::algorithm::simplex::{solution_from_tableau, solve};
use crate::algorithm::simplex::basis::{Basis, tableau_from_basis};
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_algebra::matrix::{DenseMatrix, inner_product};
use crate::data::linear_program::canonical_form::{CanonicalForm, VariableColumns};
use crate::data::linear_program::elements::ConstraintType;
use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;
use crate::data::number_types::float::numerical_precision::{is_negative, is_zero};
use crate::error::{Error, Result};
use crate::settings::Tolerances;

pub mod range;

/// Analysis of an optimal tableau and its basis.
#[derive(Clone, Debug, PartialEq)]
pub struct SensitivityAnalyzer {
    /// Describes the current problem, including all changes that were applied.
    canonical: CanonicalForm,
    /// Current tableau, of the same dimensions as the initial tableau of `canonical`.
    tableau: Tableau,
    /// Basis of `tableau`, with its inverse relative to the initial tableau of `canonical`.
    basis: Basis,
    tolerances: Tolerances,
}

/// The range of a single model value for which the basis stays optimal.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeReport {
    /// Current value in the model.
    pub current: f64,
    /// The conditions on the change `Δ`.
    pub inequalities: Vec<DeltaInequality>,
    /// All values of `Δ` that satisfy the conditions.
    pub range: Range,
}

impl RangeReport {
    fn new(current: f64, inequalities: Vec<DeltaInequality>, epsilon: f64) -> Self {
        let range = Range::from_inequalities(&inequalities, epsilon);

        Self { current, inequalities, range }
    }

    /// Range of the model value itself, rather than of its change.
    pub fn value_range(&self) -> Range {
        self.range.shifted(self.current)
    }
}

impl Display for RangeReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "current value {}", self.current)?;
        for inequality in &self.inequalities {
            writeln!(f, "  {}", inequality)?;
        }
        write!(f, "Δ ∈ {}", self.range)
    }
}

/// Relation between the primal and dual objective values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Duality {
    /// The dual values are feasible and both objective values are equal.
    Strong,
    /// The objective values differ, or the dual values are not feasible.
    Weak {
        /// Absolute difference between the objective values.
        gap: f64,
    },
}

/// Outcome of a duality check.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DualityReport {
    /// Objective value of the model.
    pub primal_objective: f64,
    /// `y b`, in the direction of the model.
    pub dual_objective: f64,
    /// Whether `y` satisfies all dual constraints.
    pub dual_feasible: bool,
    #[allow(missing_docs)]
    pub duality: Duality,
}

impl SensitivityAnalyzer {
    /// Start analyzing an optimal tableau.
    ///
    /// # Arguments
    ///
    /// * `canonical`: Canonical form of the problem that the tableau solves.
    /// * `tableau`: Optimal tableau without any appended rows or columns.
    /// * `tolerances`: Used for basis detection and for all sign decisions.
    ///
    /// # Return value
    ///
    /// `Error::NotOptimal` if the tableau isn't optimal, a basis error if its basis can't be
    /// recovered.
    pub fn new(canonical: CanonicalForm, tableau: Tableau, tolerances: Tolerances) -> Result<Self> {
        if tableau.nr_rows() != canonical.nr_rows() {
            return Err(Error::DimensionMismatch {
                what: "tableau rows".to_string(),
                expected: canonical.nr_rows(),
                found: tableau.nr_rows(),
            });
        }
        if tableau.nr_columns() != canonical.nr_columns() {
            return Err(Error::DimensionMismatch {
                what: "tableau columns".to_string(),
                expected: canonical.nr_columns(),
                found: tableau.nr_columns(),
            });
        }
        if !tableau.is_optimal(tolerances.general) {
            return Err(Error::NotOptimal);
        }

        let basis = Basis::from_tableau(&tableau, canonical.tableau(), tolerances.unit, tolerances.general)?;
        debug!("analyzing basis [{}]", basis.columns().iter().join(", "));

        Ok(Self { canonical, tableau, basis, tolerances })
    }

    /// Solve the relaxation of a model and start analyzing the optimum.
    pub fn from_model(model: &Model, session: &mut SolverSession) -> Result<OptimizationResult<Self>> {
        let canonical = CanonicalForm::new(model);
        let mut tableau = canonical.tableau().clone();
        session.record(IterationKind::Initial, &tableau);

        match solve(&mut tableau, session)? {
            OptimizationResult::FiniteOptimum(_) => {
                let tolerances = *session.tolerances();
                Self::new(canonical, tableau, tolerances).map(OptimizationResult::FiniteOptimum)
            },
            OptimizationResult::Infeasible => Ok(OptimizationResult::Infeasible),
            OptimizationResult::Unbounded => Ok(OptimizationResult::Unbounded),
        }
    }

    /// The canonical form of the current problem.
    pub fn canonical(&self) -> &CanonicalForm {
        &self.canonical
    }

    /// The current tableau.
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// The current basis.
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// `B^-1`, relative to the initial tableau of the current problem.
    pub fn basis_inverse(&self) -> &DenseMatrix {
        self.basis.inverse()
    }

    /// Objective value of the current tableau, in the direction of the model.
    pub fn objective_value(&self) -> f64 {
        self.canonical.objective_value(self.tableau.objective_function_value())
    }

    /// Value of each model variable in the current tableau.
    pub fn variable_values(&self) -> Vec<f64> {
        self.canonical.original_values(&self.tableau.current_bfs())
    }

    /// Shadow prices `c_B B^-1` of the rows of the canonical form.
    pub fn shadow_prices(&self) -> Vec<f64> {
        self.basis.shadow_prices(&self.canonical.canonical_cost())
    }

    /// Shadow price of each model constraint, in the direction of the model.
    ///
    /// This is the rate at which the objective value changes with the right hand side of the
    /// constraint. The two rows of an equality constraint are combined.
    pub fn constraint_shadow_prices(&self) -> Vec<f64> {
        let prices = self.shadow_prices();
        let sigma = self.canonical.objective().sign();

        (0..self.canonical.nr_constraints())
            .map(|constraint| {
                sigma * self.canonical.constraint_rows(constraint).into_iter()
                    .map(|(row, sign)| sign * prices[row])
                    .sum::<f64>()
            })
            .collect()
    }

    /// Range of the cost of a non basic variable.
    ///
    /// Only the relative cost of the variable's own column changes; it needs to stay nonnegative.
    pub fn non_basic_cost_range(&self, variable: usize) -> Result<RangeReport> {
        self.check_optimal()?;
        let (column, factor) = self.variable_column(variable)?;
        if self.tableau.is_in_basis(column) {
            return Err(Error::NotNonBasic(variable));
        }

        let sigma = self.canonical.objective().sign();
        let inequality = DeltaInequality::new(self.tableau.relative_cost(column), -sigma * factor);

        Ok(RangeReport::new(self.current_cost(column, factor), vec![inequality], self.tolerances.general))
    }

    /// Range of the cost of a basic variable.
    ///
    /// Changing `c_B` changes the relative cost of every non basic column `k` by `Δ α_rk`, with `r`
    /// the row in which the variable is basic.
    pub fn basic_cost_range(&self, variable: usize) -> Result<RangeReport> {
        self.check_optimal()?;
        let (column, factor) = self.variable_column(variable)?;
        let row = self.tableau.basis_row(column).ok_or(Error::NotBasic(variable))?;

        let sigma = self.canonical.objective().sign();
        let inequalities = self.tableau.non_basic_columns().into_iter()
            .map(|k| (k, self.tableau.generate_element(row, k)))
            .filter(|&(_, alpha)| !is_zero(alpha, self.tolerances.general))
            .map(|(k, alpha)| DeltaInequality::new(self.tableau.relative_cost(k), sigma * factor * alpha))
            .collect();

        Ok(RangeReport::new(self.current_cost(column, factor), inequalities, self.tolerances.general))
    }

    /// Range of the cost of a variable, whether it is basic or not.
    pub fn cost_range(&self, variable: usize) -> Result<RangeReport> {
        let (column, _) = self.variable_column(variable)?;
        if self.tableau.is_in_basis(column) {
            self.basic_cost_range(variable)
        } else {
            self.non_basic_cost_range(variable)
        }
    }

    /// Range of the right hand side of a constraint.
    ///
    /// The basic values change by `Δ B^-1 e_r` for each row `r` of the constraint, and need to
    /// stay nonnegative.
    pub fn rhs_range(&self, constraint: usize) -> Result<RangeReport> {
        self.check_optimal()?;
        let rows = self.constraint_rows(constraint)?;

        let direction = rows.iter()
            .map(|&(row, sign)| {
                self.basis.inverse().column(row).into_iter().map(|value| sign * value).collect::<Vec<_>>()
            })
            .fold(vec![0f64; self.tableau.nr_rows()], |total, column| {
                total.iter().zip(column).map(|(a, b)| a + b).collect()
            });
        let inequalities = self.tableau.constraint_values().into_iter()
            .zip(direction)
            .map(|(value, rate)| DeltaInequality::new(value, rate))
            .collect();

        let (first_row, sign) = rows[0];
        let current = sign * self.canonical.tableau().constraint_value(first_row);

        Ok(RangeReport::new(current, inequalities, self.tolerances.general))
    }

    /// Range of a coefficient of a non basic variable in a constraint.
    ///
    /// The relative cost of the variable's column changes by `Δ y_r` for each row `r` of the
    /// constraint.
    pub fn coefficient_range(&self, constraint: usize, variable: usize) -> Result<RangeReport> {
        self.check_optimal()?;
        let rows = self.constraint_rows(constraint)?;
        let (column, factor) = self.variable_column(variable)?;
        if self.tableau.is_in_basis(column) {
            return Err(Error::NotNonBasic(variable));
        }

        let prices = self.shadow_prices();
        let rate = factor * rows.iter().map(|&(row, sign)| sign * prices[row]).sum::<f64>();
        let inequality = DeltaInequality::new(self.tableau.relative_cost(column), rate);

        let (first_row, sign) = rows[0];
        let current = sign * factor * self.canonical.tableau().generate_element(first_row, column);

        Ok(RangeReport::new(current, vec![inequality], self.tolerances.general))
    }

    /// Change the cost of a variable and re-optimize.
    pub fn change_cost(
        &mut self,
        variable: usize,
        cost: f64,
        session: &mut SolverSession,
    ) -> Result<OptimizationResult<Solution>> {
        self.variable_column(variable)?;
        debug!("changing the cost of variable {} to {}", variable, cost);

        self.canonical.set_cost(variable, cost);
        self.rebuild_tableau();
        self.reoptimize(session)
    }

    /// Change the right hand side of a constraint and re-optimize.
    pub fn change_rhs(
        &mut self,
        constraint: usize,
        rhs: f64,
        session: &mut SolverSession,
    ) -> Result<OptimizationResult<Solution>> {
        self.constraint_rows(constraint)?;
        debug!("changing the right hand side of constraint {} to {}", constraint, rhs);

        self.canonical.set_rhs(constraint, rhs);
        self.rebuild_tableau();
        self.reoptimize(session)
    }

    /// Change a coefficient of a non basic variable and re-optimize.
    pub fn change_coefficient(
        &mut self,
        constraint: usize,
        variable: usize,
        value: f64,
        session: &mut SolverSession,
    ) -> Result<OptimizationResult<Solution>> {
        self.constraint_rows(constraint)?;
        let (column, _) = self.variable_column(variable)?;
        if self.tableau.is_in_basis(column) {
            return Err(Error::NotNonBasic(variable));
        }
        debug!("changing coefficient ({}, {}) to {}", constraint, variable, value);

        self.canonical.set_coefficient(constraint, variable, value);
        self.rebuild_tableau();
        self.reoptimize(session)
    }

    /// Add a nonnegative variable and re-optimize.
    ///
    /// # Arguments
    ///
    /// * `cost`: Objective function coefficient of the new variable.
    /// * `coefficients`: Its coefficient in each constraint.
    pub fn add_activity(
        &mut self,
        cost: f64,
        coefficients: &[f64],
        session: &mut SolverSession,
    ) -> Result<OptimizationResult<Solution>> {
        if coefficients.len() != self.canonical.nr_constraints() {
            return Err(Error::DimensionMismatch {
                what: "activity".to_string(),
                expected: self.canonical.nr_constraints(),
                found: coefficients.len(),
            });
        }

        let column = self.canonical.add_variable(cost, coefficients);
        let original_column = self.canonical.tableau().generate_column(column);
        let relative_cost = Basis::relative_cost(
            &self.shadow_prices(),
            &original_column,
            self.canonical.canonical_cost()[column],
        );
        debug!("new activity in column {} has relative cost {}", column, relative_cost);

        let mut values = vec![relative_cost];
        values.extend(self.basis.transform(&original_column));
        let new_column = self.tableau.add_column(values);
        debug_assert_eq!(new_column, column);

        self.reoptimize(session)
    }

    /// Add a constraint and re-optimize.
    ///
    /// The new row is expressed in terms of the current basis before the dual simplex method
    /// restores feasibility.
    pub fn add_constraint(
        &mut self,
        coefficients: &[f64],
        constraint_type: ConstraintType,
        rhs: f64,
        session: &mut SolverSession,
    ) -> Result<OptimizationResult<Solution>> {
        if coefficients.len() != self.canonical.nr_variables() {
            return Err(Error::DimensionMismatch {
                what: "constraint".to_string(),
                expected: self.canonical.nr_variables(),
                found: coefficients.len(),
            });
        }

        let row = self.canonical.canonical_coefficients(coefficients);
        let constraint = self.canonical.add_constraint(coefficients, constraint_type, rhs);
        self.tableau.add_constraint(&row, constraint_type, rhs);
        debug_assert_eq!(self.tableau.nr_rows(), self.canonical.nr_rows());
        debug!("added constraint {}", constraint);

        self.reoptimize(session)
    }

    /// Compare the objective values of the primal and the dual problem.
    ///
    /// The shadow prices are the dual values. For the optimal basis, strong duality holds.
    pub fn duality(&self) -> DualityReport {
        let epsilon = self.tolerances.general;
        let sigma = self.canonical.objective().sign();

        let prices = self.shadow_prices();
        let dual_objective = sigma * inner_product(&prices, &self.canonical.tableau().constraint_values());
        let primal_objective = self.objective_value();
        let dual_feasible = prices.iter().all(|&price| !is_negative(price, epsilon))
            && self.tableau.is_dual_feasible(epsilon);

        let gap = (primal_objective - dual_objective).abs();
        let duality = if dual_feasible && is_zero(gap, epsilon) {
            Duality::Strong
        } else {
            Duality::Weak { gap }
        };

        DualityReport { primal_objective, dual_objective, dual_feasible, duality }
    }

    /// Replace the current tableau by the one of the current basis, for the current data.
    ///
    /// The basis matrix needs to be unaffected by the changes made to the canonical form.
    fn rebuild_tableau(&mut self) {
        self.tableau = tableau_from_basis(self.canonical.tableau(), &self.basis, &self.canonical.canonical_cost());
    }

    /// Solve the current tableau and update the basis.
    fn reoptimize(&mut self, session: &mut SolverSession) -> Result<OptimizationResult<Solution>> {
        session.record(IterationKind::Initial, &self.tableau);
        let result = solve(&mut self.tableau, session)?;
        self.basis = Basis::new(
            self.canonical.tableau(),
            self.tableau.basis_indices().to_vec(),
            self.tolerances.general,
        )?;

        let result = result.map(|values| solution_from_tableau(&self.canonical, self.tableau.clone(), &values));
        if let OptimizationResult::FiniteOptimum(solution) = &result {
            info!("re-optimized to objective {}", solution.objective_value());
        }

        Ok(result)
    }

    fn check_optimal(&self) -> Result<()> {
        if self.tableau.is_optimal(self.tolerances.general) {
            Ok(())
        } else {
            Err(Error::NotOptimal)
        }
    }

    /// Column of a variable with the factor that maps the variable onto the column.
    fn variable_column(&self, variable: usize) -> Result<(usize, f64)> {
        match self.canonical.variable_columns().get(variable) {
            None => Err(Error::VariableIndex { index: variable, len: self.canonical.nr_variables() }),
            Some(&VariableColumns::Positive(column)) => Ok((column, 1f64)),
            Some(&VariableColumns::Negated(column)) => Ok((column, -1f64)),
            Some(VariableColumns::Split { .. }) => Err(Error::MalformedModel(format!(
                "free variable {} is represented by two columns", variable,
            ))),
        }
    }

    /// Model cost of a column.
    fn current_cost(&self, column: usize, factor: f64) -> f64 {
        self.canonical.objective().sign() * factor * self.canonical.canonical_cost()[column]
    }

    fn constraint_rows(&self, constraint: usize) -> Result<Vec<(usize, f64)>> {
        if constraint < self.canonical.nr_constraints() {
            Ok(self.canonical.constraint_rows(constraint))
        } else {
            Err(Error::ConstraintIndex { index: constraint, len: self.canonical.nr_constraints() })
        }
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::OptimizationResult;
    use crate::algorithm::sensitivity::{Duality, SensitivityAnalyzer};
    use crate::algorithm::sensitivity::range::Range;
    use crate::algorithm::session::SolverSession;
    use crate::data::linear_algebra::matrix::DenseMatrix;
    use crate::data::linear_program::canonical_form::CanonicalForm;
    use crate::data::linear_program::elements::ConstraintType;
    use crate::data::linear_program::solution::Solution;
    use crate::error::Error;
    use crate::settings::Tolerances;
    use crate::tests::{problem_1, problem_2};

    fn analyzer_1(session: &mut SolverSession) -> SensitivityAnalyzer {
        SensitivityAnalyzer::from_model(&problem_1::model(), session).unwrap().finite_optimum().unwrap()
    }

    fn assert_optimum(result: OptimizationResult<Solution>, objective_value: f64, values: &[f64]) {
        let solution = result.finite_optimum().unwrap();
        assert_abs_diff_eq!(solution.objective_value(), objective_value, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.variable_values(), values, epsilon = 1e-9);
    }

    #[test]
    fn needs_optimal_tableau() {
        let canonical = CanonicalForm::new(&problem_1::model());
        let initial = canonical.tableau().clone();
        let result = SensitivityAnalyzer::new(canonical, initial, Tolerances::default());
        assert_eq!(result, Err(Error::NotOptimal));

        let canonical = CanonicalForm::new(&problem_1::model());
        assert!(SensitivityAnalyzer::new(canonical, problem_1::optimal_tableau(), Tolerances::default()).is_ok());
    }

    #[test]
    fn shadow_prices() {
        let mut session = SolverSession::default();
        let analyzer = analyzer_1(&mut session);
        assert_eq!(analyzer.basis().columns(), &[0, 3]);
        assert!(analyzer.basis_inverse().approximately_equals(&DenseMatrix::from_data(vec![
            vec![1f64, 0f64],
            vec![-1f64, 1f64],
        ]), 1e-9));
        assert_abs_diff_eq!(analyzer.shadow_prices().as_slice(), &[3f64, 0f64][..], epsilon = 1e-9);
        assert_abs_diff_eq!(analyzer.constraint_shadow_prices().as_slice(), &[3f64, 0f64][..], epsilon = 1e-9);

        let analyzer = SensitivityAnalyzer::from_model(&problem_2::model(), &mut session)
            .unwrap().finite_optimum().unwrap();
        assert_abs_diff_eq!(analyzer.shadow_prices().as_slice(), &[1.5f64, 0.5f64][..], epsilon = 1e-9);
        // each extra unit of demand costs
        assert_abs_diff_eq!(analyzer.constraint_shadow_prices().as_slice(), &[1.5f64, 0.5f64][..], epsilon = 1e-9);
    }

    #[test]
    fn cost_ranges() {
        let mut session = SolverSession::default();
        let analyzer = analyzer_1(&mut session);

        let report = analyzer.non_basic_cost_range(1).unwrap();
        assert_abs_diff_eq!(report.current, 2f64);
        assert_eq!(report.inequalities.len(), 1);
        assert_eq!(report.inequalities[0].to_string(), "1 - 1Δ ≥ 0");
        assert_eq!(report.range.lower, None);
        assert_abs_diff_eq!(report.range.upper.unwrap(), 1f64, epsilon = 1e-9);
        assert_abs_diff_eq!(report.value_range().upper.unwrap(), 3f64, epsilon = 1e-9);
        assert_eq!(analyzer.non_basic_cost_range(0), Err(Error::NotNonBasic(0)));

        let report = analyzer.basic_cost_range(0).unwrap();
        assert_abs_diff_eq!(report.current, 3f64);
        assert_abs_diff_eq!(report.range.lower.unwrap(), -1f64, epsilon = 1e-9);
        assert_eq!(report.range.upper, None);
        assert_eq!(analyzer.basic_cost_range(1), Err(Error::NotBasic(1)));

        assert_eq!(analyzer.cost_range(0), analyzer.basic_cost_range(0));
        assert_eq!(analyzer.cost_range(2), Err(Error::VariableIndex { index: 2, len: 2 }));
    }

    #[test]
    fn rhs_ranges() {
        let mut session = SolverSession::default();
        let analyzer = analyzer_1(&mut session);

        let report = analyzer.rhs_range(0).unwrap();
        assert_abs_diff_eq!(report.current, 4f64);
        assert_abs_diff_eq!(report.range.lower.unwrap(), -4f64, epsilon = 1e-9);
        assert_abs_diff_eq!(report.range.upper.unwrap(), 2f64, epsilon = 1e-9);

        let report = analyzer.rhs_range(1).unwrap();
        assert_abs_diff_eq!(report.range.lower.unwrap(), -2f64, epsilon = 1e-9);
        assert_eq!(report.range.upper, None);
        assert_eq!(analyzer.rhs_range(2), Err(Error::ConstraintIndex { index: 2, len: 2 }));

        let analyzer = SensitivityAnalyzer::from_model(&problem_2::model(), &mut session)
            .unwrap().finite_optimum().unwrap();
        let report = analyzer.rhs_range(0).unwrap();
        assert_abs_diff_eq!(report.current, 4f64);
        assert_abs_diff_eq!(report.range.lower.unwrap(), -2f64, epsilon = 1e-9);
        assert_abs_diff_eq!(report.range.upper.unwrap(), 2f64, epsilon = 1e-9);
    }

    #[test]
    fn coefficient_range() {
        let mut session = SolverSession::default();
        let analyzer = analyzer_1(&mut session);

        let report = analyzer.coefficient_range(0, 1).unwrap();
        assert_abs_diff_eq!(report.current, 1f64);
        assert_abs_diff_eq!(report.range.lower.unwrap(), -1f64 / 3f64, epsilon = 1e-9);
        assert_eq!(report.range.upper, None);
        assert_eq!(analyzer.coefficient_range(0, 0), Err(Error::NotNonBasic(0)));
    }

    #[test]
    fn change_within_range_keeps_basis() {
        let mut session = SolverSession::default();
        let mut analyzer = analyzer_1(&mut session);

        let result = analyzer.change_cost(1, 2.5f64, &mut session).unwrap();
        assert_optimum(result, 12f64, &[4f64, 0f64]);
        assert_eq!(analyzer.basis().columns(), &[0, 3]);

        let result = analyzer.change_rhs(0, 5f64, &mut session).unwrap();
        assert_optimum(result, 15f64, &[5f64, 0f64]);
        assert_eq!(analyzer.basis().columns(), &[0, 3]);
    }

    #[test]
    fn change_cost() {
        let mut session = SolverSession::default();
        let mut analyzer = analyzer_1(&mut session);
        let result = analyzer.change_cost(1, 4f64, &mut session).unwrap();
        assert_optimum(result, 13f64, &[3f64, 1f64]);
        assert_eq!(analyzer.change_cost(5, 1f64, &mut session), Err(Error::VariableIndex { index: 5, len: 2 }));
    }

    #[test]
    fn change_rhs() {
        let mut session = SolverSession::default();
        let mut analyzer = analyzer_1(&mut session);
        let result = analyzer.change_rhs(0, 7f64, &mut session).unwrap();
        assert_optimum(result, 18f64, &[6f64, 0f64]);
        assert_abs_diff_eq!(analyzer.objective_value(), 18f64, epsilon = 1e-9);
    }

    #[test]
    fn change_coefficient() {
        let mut session = SolverSession::default();
        let mut analyzer = analyzer_1(&mut session);
        let result = analyzer.change_coefficient(0, 1, 0.5f64, &mut session).unwrap();
        assert_optimum(result, 12.4f64, &[3.6f64, 0.8f64]);

        // x2 is basic now
        assert_eq!(analyzer.change_coefficient(0, 1, 1f64, &mut session), Err(Error::NotNonBasic(1)));
    }

    #[test]
    fn add_activity() {
        let mut session = SolverSession::default();
        let mut analyzer = analyzer_1(&mut session);
        let result = analyzer.add_activity(5f64, &[1f64, 1f64], &mut session).unwrap();
        assert_optimum(result, 20f64, &[0f64, 0f64, 4f64]);
        assert_eq!(analyzer.canonical().nr_variables(), 3);
        assert!(matches!(
            analyzer.add_activity(1f64, &[1f64], &mut session),
            Err(Error::DimensionMismatch { .. }),
        ));
    }

    #[test]
    fn add_constraint() {
        let mut session = SolverSession::default();
        let mut analyzer = analyzer_1(&mut session);
        let result = analyzer.add_constraint(&[1f64, 0f64], ConstraintType::Less, 3f64, &mut session).unwrap();
        assert_optimum(result, 11f64, &[3f64, 1f64]);
        assert_eq!(analyzer.tableau().nr_rows(), 3);

        // ranges remain available for the new problem
        let report = analyzer.rhs_range(2).unwrap();
        assert_abs_diff_eq!(report.current, 3f64);
        assert!(report.range.contains(0f64, 1e-9));
    }

    #[test]
    fn infeasible_change() {
        let mut session = SolverSession::default();
        let mut analyzer = analyzer_1(&mut session);
        let result = analyzer.add_constraint(&[1f64, 1f64], ConstraintType::Greater, 5f64, &mut session).unwrap();
        assert_eq!(result, OptimizationResult::Infeasible);
        assert_eq!(analyzer.rhs_range(0), Err(Error::NotOptimal));
    }

    #[test]
    fn duality() {
        let mut session = SolverSession::default();
        let report = analyzer_1(&mut session).duality();
        assert_eq!(report.duality, Duality::Strong);
        assert!(report.dual_feasible);
        assert_abs_diff_eq!(report.dual_objective, 12f64, epsilon = 1e-9);

        let analyzer = SensitivityAnalyzer::from_model(&problem_2::model(), &mut session)
            .unwrap().finite_optimum().unwrap();
        let report = analyzer.duality();
        assert_eq!(report.duality, Duality::Strong);
        assert_abs_diff_eq!(report.primal_objective, 9f64, epsilon = 1e-9);
        assert_abs_diff_eq!(report.dual_objective, 9f64, epsilon = 1e-9);
    }

    #[test]
    fn value_range() {
        let mut session = SolverSession::default();
        let report = analyzer_1(&mut session).rhs_range(0).unwrap();
        let range = report.value_range();
        assert_abs_diff_eq!(range.lower.unwrap(), 0f64, epsilon = 1e-9);
        assert_abs_diff_eq!(range.upper.unwrap(), 6f64, epsilon = 1e-9);
        assert_ne!(range, Range::unrestricted());
    }
}
