//! # Data structures for Simplex
//!
//! Contains the simplex tableau and logic for elementary operations which can be performed upon
//! it.
//!
//! The tableau is stored densely. Row `0` holds the relative costs of all columns, rows `1`
//! through `m` hold the constraints. The last column holds the right hand side; its row `0` entry
//! holds the objective function value (of the maximization that the tableau represents).
//!
//! Constraint rows are indexed from `0` in the methods of the `Tableau`, so constraint row `i` is
//! row `i + 1` of the underlying matrix.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::fmt;

use itertools::{repeat_n, Itertools};

use crate::algorithm::utilities::first_minimum;
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::linear_program::elements::ConstraintType;
use crate::data::number_types::float::numerical_precision::{is_negative, is_positive, is_zero};

/// The most high-level data structure that is used by the Simplex algorithm: the Simplex tableau.
///
/// It owns all data: the algorithms mutate it in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Tableau {
    /// Matrix of size (m + 1) x (n + 1).
    data: DenseMatrix,

    /// Maps the rows to the column containing its pivot.
    ///
    /// The rows are indexed 0 through self.nr_rows(), while the columns are indexed 0 through
    /// self.nr_columns().
    ///
    /// This attribute changes with a basis change.
    basis_indices: Vec<usize>,
    /// All columns currently in the basis.
    ///
    /// Could also be derived from `basis_indices`, but is here for faster reading and writing.
    basis_columns: HashSet<usize>,
}

impl Tableau {
    /// Create a new tableau.
    ///
    /// # Arguments
    ///
    /// * `data`: Matrix with the cost row, the constraint rows and the right hand side column.
    /// * `basis_indices`: For each constraint row, the column that is basic in it.
    pub fn new(data: DenseMatrix, basis_indices: Vec<usize>) -> Self {
        debug_assert!(data.nr_rows() >= 1);
        debug_assert_eq!(basis_indices.len(), data.nr_rows() - 1);
        debug_assert!(basis_indices.iter().all(|&j| j < data.nr_columns() - 1));

        let basis_columns = basis_indices.iter().copied().collect::<HashSet<_>>();
        debug_assert_eq!(basis_columns.len(), basis_indices.len());

        Self { data, basis_indices, basis_columns }
    }

    /// Brings a column into the basis.
    ///
    /// Performs a Gauss-Jordan elimination step on the entire matrix, including the cost row and
    /// the right hand side column.
    ///
    /// # Arguments
    ///
    /// * `pivot_column_index`: Column entering the basis, not yet in the basis.
    /// * `pivot_row_index`: Constraint row in which it becomes basic.
    pub fn bring_into_basis(&mut self, pivot_column_index: usize, pivot_row_index: usize) {
        debug_assert!(pivot_column_index < self.nr_columns());
        debug_assert!(pivot_row_index < self.nr_rows());
        debug_assert!(!self.is_in_basis(pivot_column_index));

        let pivot_row = pivot_row_index + 1;
        let pivot_value = self.data.get_value(pivot_row, pivot_column_index);
        debug_assert_ne!(pivot_value, 0f64);

        self.data.multiply_row(pivot_row, 1f64 / pivot_value);
        for row in (0..self.data.nr_rows()).filter(|&row| row != pivot_row) {
            let factor = self.data.get_value(row, pivot_column_index);
            if factor != 0f64 {
                self.data.mul_add_rows(pivot_row, row, -factor);
            }
            // Remove the rounding residue, this value is exactly zero by construction.
            self.data.set_value(row, pivot_column_index, 0f64);
        }
        self.data.set_value(pivot_row, pivot_column_index, 1f64);

        self.update_basis_indices(pivot_row_index, pivot_column_index);
    }

    /// Update the basis index.
    ///
    /// Removes the index of the variable leaving the basis from the `basis_columns` attribute,
    /// while inserting the entering variable index.
    ///
    /// # Arguments
    ///
    /// * `pivot_row`: Row index of the pivot, in range 0 until self.nr_rows().
    /// * `pivot_column`: Column index of the pivot, in range 0 until self.nr_columns(). Is not yet
    /// in the basis.
    fn update_basis_indices(&mut self, pivot_row: usize, pivot_column: usize) {
        debug_assert!(pivot_row < self.nr_rows());
        debug_assert!(pivot_column < self.nr_columns());

        let leaving_column = self.basis_indices[pivot_row];
        self.basis_columns.remove(&leaving_column);
        self.basis_indices[pivot_row] = pivot_column;
        self.basis_columns.insert(pivot_column);
    }

    /// Determine the row to pivot on for the primal simplex method.
    ///
    /// This is the row with a positive value in the column and the minimal ratio between the
    /// constraint value and that value. Ties are broken by taking the first row.
    ///
    /// # Arguments
    ///
    /// * `column`: Index of the column that will enter the basis.
    /// * `epsilon`: Column values below this value are not considered positive.
    ///
    /// # Return value
    ///
    /// Index of the row to pivot on. If not found, the problem is unbounded.
    pub fn select_primal_pivot_row(&self, column: usize, epsilon: f64) -> Option<usize> {
        first_minimum(self.primal_ratios(column, epsilon), epsilon).map(|(row, _)| row)
    }

    /// Determine the row to pivot on for the primal simplex method, following Bland's rule.
    ///
    /// Of the rows with a minimal ratio, this is the one of which the basic column has the lowest
    /// index.
    ///
    /// # Arguments
    ///
    /// * `column`: Index of the column that will enter the basis.
    /// * `epsilon`: Column values below this value are not considered positive, ratios that differ
    /// less than this are tied.
    pub fn select_primal_pivot_row_by_lowest_basic(&self, column: usize, epsilon: f64) -> Option<usize> {
        let ratios = self.primal_ratios(column, epsilon);
        let (_, minimum) = first_minimum(ratios.iter().copied(), epsilon)?;

        ratios.into_iter()
            .filter(|&(_, ratio)| ratio <= minimum + epsilon)
            .min_by_key(|&(row, _)| self.basis_indices[row])
            .map(|(row, _)| row)
    }

    /// Ratio of constraint value and column value, for each row with a positive column value.
    fn primal_ratios(&self, column: usize, epsilon: f64) -> Vec<(usize, f64)> {
        debug_assert!(column < self.nr_columns());

        (0..self.nr_rows())
            .map(|row| (row, self.generate_element(row, column)))
            .filter(|&(_, xij)| is_positive(xij, epsilon))
            .map(|(row, xij)| (row, self.constraint_value(row).max(0f64) / xij))
            .collect()
    }

    /// Determine the row to pivot on for the dual simplex method.
    ///
    /// This is the row with the most negative constraint value, first occurrence on ties.
    ///
    /// # Return value
    ///
    /// Index of the row to pivot on. If not found, the tableau is primal feasible.
    pub fn select_dual_pivot_row(&self, epsilon: f64) -> Option<usize> {
        let candidates = (0..self.nr_rows())
            .map(|row| (row, self.constraint_value(row)))
            .filter(|&(_, value)| is_negative(value, epsilon));

        first_minimum(candidates, epsilon).map(|(row, _)| row)
    }

    /// Determine the column to pivot on for the dual simplex method.
    ///
    /// Among the columns with a negative value in the pivot row, the one minimizing
    /// `|relative cost / value|`; first occurrence on ties.
    ///
    /// # Arguments
    ///
    /// * `row`: Constraint row that was selected to leave the basis.
    /// * `epsilon`: Row values above `-epsilon` are not considered negative.
    ///
    /// # Return value
    ///
    /// Index of the column to pivot on. If not found, the problem is infeasible.
    pub fn select_dual_pivot_column(&self, row: usize, epsilon: f64) -> Option<usize> {
        debug_assert!(row < self.nr_rows());

        let candidates = self.non_basic_columns().into_iter()
            .map(|column| (column, self.generate_element(row, column)))
            .filter(|&(_, value)| is_negative(value, epsilon))
            .map(|(column, value)| (column, (self.relative_cost(column) / value).abs()));

        first_minimum(candidates, epsilon).map(|(column, _)| column)
    }

    /// Append a constraint to the tableau, with its own new slack column as basic variable.
    ///
    /// The row is expressed in terms of the current basis: coefficients of basic columns are
    /// eliminated by subtracting the rows in which they are basic. The new row may have a negative
    /// right hand side, such that the tableau is no longer primal feasible.
    ///
    /// # Arguments
    ///
    /// * `coefficients`: Coefficients in the existing columns. Missing trailing values are zero.
    /// * `constraint_type`: `Less` keeps the row, `Greater` negates it. `Equal` appends both.
    /// * `rhs`: Right hand side of the constraint.
    ///
    /// # Return value
    ///
    /// Index of the (last) new slack column.
    pub fn add_constraint(
        &mut self,
        coefficients: &[f64],
        constraint_type: ConstraintType,
        rhs: f64,
    ) -> usize {
        match constraint_type {
            ConstraintType::Less => self.add_inequality(coefficients, 1f64, rhs),
            ConstraintType::Greater => self.add_inequality(coefficients, -1f64, rhs),
            ConstraintType::Equal => {
                self.add_inequality(coefficients, 1f64, rhs);
                self.add_inequality(coefficients, -1f64, rhs)
            },
        }
    }

    /// Append a `sign * (coefficients, rhs)` row with a +1 slack.
    fn add_inequality(&mut self, coefficients: &[f64], sign: f64, rhs: f64) -> usize {
        debug_assert!(coefficients.len() <= self.nr_columns());

        let new_column = self.nr_columns();
        self.data.insert_column(new_column, repeat_n(0f64, self.data.nr_rows()).collect());

        let mut row = coefficients.iter()
            .map(|value| sign * value)
            .chain(repeat_n(0f64, self.nr_columns() - coefficients.len()))
            .collect::<Vec<_>>();
        row[new_column] = 1f64;
        row.push(sign * rhs);

        for (i, &basic_column) in self.basis_indices.iter().enumerate() {
            let factor = row[basic_column];
            if factor != 0f64 {
                for (value, existing) in row.iter_mut().zip(self.data.row(i + 1)) {
                    *value -= factor * existing;
                }
                row[basic_column] = 0f64;
            }
        }

        self.data.push_row(row);
        self.basis_indices.push(new_column);
        self.basis_columns.insert(new_column);

        new_column
    }

    /// Append a non basic column just before the right hand side.
    ///
    /// # Arguments
    ///
    /// * `values`: The relative cost followed by a value for each constraint row.
    ///
    /// # Return value
    ///
    /// Index of the new column.
    pub fn add_column(&mut self, values: Vec<f64>) -> usize {
        debug_assert_eq!(values.len(), self.nr_rows() + 1);

        let new_column = self.nr_columns();
        self.data.insert_column(new_column, values);

        new_column
    }

    /// Overwrite a single element of a constraint row.
    pub fn set_element(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.nr_rows());
        debug_assert!(j < self.nr_columns());

        self.data.set_value(i + 1, j, value);
    }

    /// Overwrite the relative cost of a column.
    pub fn set_relative_cost(&mut self, column: usize, value: f64) {
        debug_assert!(column < self.nr_columns());

        self.data.set_value(0, column, value);
    }

    /// Overwrite the right hand side of a constraint row.
    pub fn set_constraint_value(&mut self, row: usize, value: f64) {
        debug_assert!(row < self.nr_rows());

        self.data.set_value(row + 1, self.rhs_index(), value);
    }

    /// Relative cost of a column, the value in the cost row.
    ///
    /// Basis columns always have relative cost zero.
    pub fn relative_cost(&self, j: usize) -> f64 {
        debug_assert!(j < self.nr_columns());

        self.data.get_value(0, j)
    }

    /// All relative costs, excluding the objective function value.
    pub fn relative_costs(&self) -> Vec<f64> {
        self.data.row(0).take(self.nr_columns()).copied().collect()
    }

    /// Right hand side value of constraint row `i`.
    pub fn constraint_value(&self, i: usize) -> f64 {
        debug_assert!(i < self.nr_rows());

        self.data.get_value(i + 1, self.rhs_index())
    }

    /// All constraint values.
    pub fn constraint_values(&self) -> Vec<f64> {
        (0..self.nr_rows()).map(|i| self.constraint_value(i)).collect()
    }

    /// Single element in constraint row `i` and column `j`.
    pub fn generate_element(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.nr_rows());
        debug_assert!(j < self.nr_columns());

        self.data.get_value(i + 1, j)
    }

    /// The constraint part of column `j`.
    pub fn generate_column(&self, j: usize) -> Vec<f64> {
        debug_assert!(j < self.nr_columns());

        (0..self.nr_rows()).map(|i| self.generate_element(i, j)).collect()
    }

    /// The coefficients of constraint row `i`, excluding the right hand side.
    pub fn generate_row(&self, i: usize) -> &[f64] {
        debug_assert!(i < self.nr_rows());

        &self.data.row_slice(i + 1)[..self.nr_columns()]
    }

    /// Get the cost of the current solution.
    ///
    /// This is the value of the maximization that the tableau represents.
    pub fn objective_function_value(&self) -> f64 {
        self.data.get_value(0, self.rhs_index())
    }

    /// Whether a column is in the basis.
    pub fn is_in_basis(&self, column: usize) -> bool {
        debug_assert!(column < self.nr_columns());

        self.basis_columns.contains(&column)
    }

    /// For each constraint row, the column that is basic in it.
    pub fn basis_indices(&self) -> &[usize] {
        &self.basis_indices
    }

    /// Constraint row in which a column is basic, if it is basic.
    pub fn basis_row(&self, column: usize) -> Option<usize> {
        self.basis_indices.iter().position(|&j| j == column)
    }

    /// All columns that are not in the basis, in increasing order.
    pub fn non_basic_columns(&self) -> Vec<usize> {
        (0..self.nr_columns()).filter(|&j| !self.is_in_basis(j)).collect()
    }

    /// Get the current basic solution.
    ///
    /// # Return value
    ///
    /// A value for each column; zero for the non basic columns.
    pub fn current_bfs(&self) -> Vec<f64> {
        let mut values = repeat_n(0f64, self.nr_columns()).collect::<Vec<_>>();
        for (i, &column) in self.basis_indices.iter().enumerate() {
            values[column] = self.constraint_value(i);
        }

        values
    }

    /// Whether all constraint values are nonnegative, up to `epsilon`.
    pub fn is_primal_feasible(&self, epsilon: f64) -> bool {
        (0..self.nr_rows()).all(|i| !is_negative(self.constraint_value(i), epsilon))
    }

    /// Whether all relative costs are nonnegative, up to `epsilon`.
    pub fn is_dual_feasible(&self, epsilon: f64) -> bool {
        (0..self.nr_columns()).all(|j| !is_negative(self.relative_cost(j), epsilon))
    }

    /// Whether the current basic solution is both primal and dual feasible.
    pub fn is_optimal(&self, epsilon: f64) -> bool {
        self.is_primal_feasible(epsilon) && self.is_dual_feasible(epsilon)
    }

    /// The underlying matrix, including cost row and right hand side column.
    pub fn matrix(&self) -> &DenseMatrix {
        &self.data
    }

    /// Number of constraint rows in the tableau.
    pub fn nr_rows(&self) -> usize {
        self.data.nr_rows() - 1
    }

    /// Number of variables (columns, excluding the right hand side) in the tableau.
    pub fn nr_columns(&self) -> usize {
        self.data.nr_columns() - 1
    }

    /// Index of the right hand side column in the underlying matrix.
    fn rhs_index(&self) -> usize {
        self.data.nr_columns() - 1
    }
}

/// Check whether the tableau currently has a valid basic solution.
///
/// All basis columns should be unit vectors (with a zero relative cost) and all constraint values
/// should be nonnegative.
///
/// # Arguments
///
/// * `tableau`: Tableau to check.
/// * `epsilon`: Tolerance for all comparisons.
pub fn is_in_basic_feasible_solution_state(tableau: &Tableau, epsilon: f64) -> bool {
    has_unit_basis(tableau, epsilon) && tableau.is_primal_feasible(epsilon)
}

/// Whether each basis column is a unit vector with its one in the right row.
pub fn has_unit_basis(tableau: &Tableau, epsilon: f64) -> bool {
    tableau.basis_indices().iter().enumerate().all(|(i, &column)| {
        is_zero(tableau.relative_cost(column), epsilon)
            && (0..tableau.nr_rows()).all(|k| {
                let expected = if k == i { 1f64 } else { 0f64 };
                is_zero(tableau.generate_element(k, column) - expected, epsilon)
            })
    })
}

impl Display for Tableau {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "basis: [{}]", self.basis_indices.iter().join(", "))?;
        write!(f, "{}", self.data)
    }
}
