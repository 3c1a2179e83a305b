//! # Basis tracking
//!
//! The tableau keeps track of its basis while pivoting. This module re-derives the basis from the
//! tableau values, and relates it to the original (canonical) tableau through the inverse of the
//! basis matrix `B`.
//!
//! With `A` and `b` the constraint data of the original tableau and `c` its (canonical) cost,
//! every later tableau of the same problem has constraint rows `B^-1 [A | b]` and relative costs
//! `c_B B^-1 A - c`.
use itertools::Itertools;
use log::trace;

use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_algebra::matrix::{DenseMatrix, inner_product};
use crate::data::number_types::float::numerical_precision::is_zero;
use crate::error::{Error, Result};

/// Find, for every constraint row, a column that is a unit vector with its one in that row.
///
/// The relative cost of the column needs to be zero as well. Of multiple candidates, the one with
/// the lowest index is taken.
///
/// # Arguments
///
/// * `tableau`: Tableau to scan; the basis that it tracks itself is ignored.
/// * `epsilon`: Tolerance on the ones and zeros.
///
/// # Return value
///
/// One column per row, or the first row without a unit column as `Error::BasisNotFound`.
pub fn find_basis(tableau: &Tableau, epsilon: f64) -> Result<Vec<usize>> {
    (0..tableau.nr_rows())
        .map(|i| {
            (0..tableau.nr_columns())
                .find(|&j| {
                    is_zero(tableau.relative_cost(j), epsilon)
                        && (0..tableau.nr_rows()).all(|k| {
                            let expected = if k == i { 1f64 } else { 0f64 };
                            is_zero(tableau.generate_element(k, j) - expected, epsilon)
                        })
                })
                .ok_or(Error::BasisNotFound(i))
        })
        .collect()
}

/// The `m x m` matrix of the original constraint rows, restricted to the given columns.
///
/// # Arguments
///
/// * `original`: Original tableau.
/// * `columns`: Basis columns, one for each row; may include columns that were appended to the
/// original tableau later, which is why the original tableau needs to be kept in sync.
pub fn basis_submatrix(original: &Tableau, columns: &[usize]) -> DenseMatrix {
    debug_assert_eq!(columns.len(), original.nr_rows());

    let rows = (0..original.nr_rows()).map(|i| i + 1).collect::<Vec<_>>();
    original.matrix().submatrix(&rows, columns)
}

/// A basis together with the inverse of its basis matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Basis {
    /// For each row, the basic column.
    columns: Vec<usize>,
    /// Inverse of the basis matrix, rows corresponding to `columns`.
    inverse: DenseMatrix,
}

impl Basis {
    /// Invert the basis matrix of a set of columns.
    ///
    /// # Arguments
    ///
    /// * `original`: Original tableau, providing the columns.
    /// * `columns`: For each row, the basic column.
    /// * `epsilon`: Pivots smaller than this in absolute value indicate a singular matrix.
    ///
    /// # Return value
    ///
    /// The basis, or `Error::SingularBasis`.
    pub fn new(original: &Tableau, columns: Vec<usize>, epsilon: f64) -> Result<Self> {
        let inverse = basis_submatrix(original, &columns).invert(epsilon)?;
        trace!("basis [{}] with inverse\n{}", columns.iter().join(", "), inverse);

        Ok(Self { columns, inverse })
    }

    /// The basis of the current tableau of a problem.
    ///
    /// # Arguments
    ///
    /// * `tableau`: Current tableau, of which the basis is re-derived from its values.
    /// * `original`: Original tableau of the same problem.
    /// * `unit_epsilon`: Tolerance used to recognize unit columns.
    /// * `epsilon`: Tolerance used while inverting.
    pub fn from_tableau(
        tableau: &Tableau,
        original: &Tableau,
        unit_epsilon: f64,
        epsilon: f64,
    ) -> Result<Self> {
        debug_assert_eq!(tableau.nr_rows(), original.nr_rows());

        let columns = find_basis(tableau, unit_epsilon)?;
        Self::new(original, columns, epsilon)
    }

    /// The identity basis of the slack columns of a freshly built tableau.
    pub fn identity(columns: Vec<usize>) -> Self {
        let inverse = DenseMatrix::identity(columns.len());

        Self { columns, inverse }
    }

    /// Replace the basic column of a row, updating the inverse.
    ///
    /// # Arguments
    ///
    /// * `row`: Row of which the basic column leaves.
    /// * `column`: Entering column.
    /// * `column_values`: `B^-1 a` for the entering column `a`, with a nonzero value at `row`.
    pub fn change(&mut self, row: usize, column: usize, column_values: &[f64]) {
        debug_assert!(row < self.columns.len());
        debug_assert_eq!(column_values.len(), self.columns.len());
        debug_assert_ne!(column_values[row], 0f64);

        self.inverse.multiply_row(row, 1f64 / column_values[row]);
        for (i, &value) in column_values.iter().enumerate() {
            if i != row && value != 0f64 {
                self.inverse.mul_add_rows(row, i, -value);
            }
        }
        self.columns[row] = column;
    }

    /// For each row, the basic column.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Inverse of the basis matrix.
    pub fn inverse(&self) -> &DenseMatrix {
        &self.inverse
    }

    /// Columns that are not basic, in increasing order.
    pub fn non_basic_columns(&self, nr_columns: usize) -> Vec<usize> {
        (0..nr_columns).filter(|j| !self.columns.contains(j)).collect()
    }

    /// The cost `c_B` of each basic column.
    pub fn basic_costs(&self, cost: &[f64]) -> Vec<f64> {
        self.columns.iter().map(|&j| cost[j]).collect()
    }

    /// Shadow prices, or dual values, `c_B B^-1`.
    ///
    /// # Arguments
    ///
    /// * `cost`: Cost of every column, in the maximization that the tableau represents.
    pub fn shadow_prices(&self, cost: &[f64]) -> Vec<f64> {
        self.inverse.left_multiply_vector(&self.basic_costs(cost))
    }

    /// Multiply a column of the original constraint data with the basis inverse, `B^-1 a`.
    pub fn transform(&self, column: &[f64]) -> Vec<f64> {
        self.inverse.multiply_vector(column)
    }

    /// Relative cost `y a - c` of a column `a` with cost `c`, given shadow prices `y`.
    pub fn relative_cost(shadow_prices: &[f64], column: &[f64], cost: f64) -> f64 {
        inner_product(shadow_prices, column) - cost
    }
}

/// The tableau belonging to a basis.
///
/// Constraint rows are `B^-1 [A | b]`, the cost row is `[c_B B^-1 A - c | c_B B^-1 b]`. Basic
/// columns are set to exact unit vectors.
///
/// # Arguments
///
/// * `original`: Original tableau, providing `A` and `b`.
/// * `basis`: Basis of which the inverse is up to date with the original tableau.
/// * `cost`: Cost `c` of each column, in the maximization that the tableau represents.
pub fn tableau_from_basis(original: &Tableau, basis: &Basis, cost: &[f64]) -> Tableau {
    debug_assert_eq!(cost.len(), original.nr_columns());
    debug_assert_eq!(basis.columns().len(), original.nr_rows());

    let constraint_rows = (1..=original.nr_rows())
        .map(|i| original.matrix().row_slice(i).to_vec())
        .collect::<Vec<_>>();
    let transformed = basis.inverse().multiply(&DenseMatrix::from_data(constraint_rows));

    let prices = basis.shadow_prices(cost);
    let mut cost_row = (0..original.nr_columns())
        .map(|j| Basis::relative_cost(&prices, &original.generate_column(j), cost[j]))
        .collect::<Vec<_>>();
    cost_row.push(inner_product(&prices, &original.constraint_values()));

    let mut data = Vec::with_capacity(original.nr_rows() + 1);
    data.push(cost_row);
    for i in 0..original.nr_rows() {
        data.push(transformed.row_slice(i).to_vec());
    }
    for (k, &column) in basis.columns().iter().enumerate() {
        data[0][column] = 0f64;
        for (i, row) in data.iter_mut().skip(1).enumerate() {
            row[column] = if i == k { 1f64 } else { 0f64 };
        }
    }

    Tableau::new(DenseMatrix::from_data(data), basis.columns().to_vec())
}
