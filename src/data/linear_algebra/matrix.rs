//! # Matrix implementations
//!
//! A dense, row major matrix of `f64` values. Only the operations that the tableau, the basis
//! inverse and the sensitivity analysis need are provided.
use std::fmt::{Display, Formatter};
use std::fmt;
use std::slice::Iter;

use itertools::repeat_n;

use crate::error::{Error, Result};

/// Uses a `Vec<Vec<f64>>` as underlying data structure.
///
/// Rows and columns can be appended; all rows always have the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    data: Vec<Vec<f64>>,
    nr_rows: usize,
    nr_columns: usize,
}

impl DenseMatrix {
    /// Create a `DenseMatrix` from the provided data.
    ///
    /// # Arguments
    ///
    /// * `data`: Rows of the matrix, all of the same length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Self {
        let (nr_rows, nr_columns) = get_data_dimensions(&data);
        debug_assert!(data.iter().all(|row| row.len() == nr_columns));

        DenseMatrix { data, nr_rows, nr_columns }
    }

    /// Create a dense square identity matrix of size `len`.
    pub fn identity(len: usize) -> Self {
        let data = (0..len)
            .map(|i| {
                let mut row = repeat_n(0f64, len).collect::<Vec<_>>();
                row[i] = 1f64;
                row
            })
            .collect();

        DenseMatrix { data, nr_rows: len, nr_columns: len }
    }

    /// Create a dense matrix of zero's of dimension `rows` x `columns`.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        let data = (0..rows)
            .map(|_| repeat_n(0f64, columns).collect())
            .collect();

        DenseMatrix { data, nr_rows: rows, nr_columns: columns }
    }

    /// Get all values in column `j` of this matrix.
    pub fn column(&self, j: usize) -> Vec<f64> {
        debug_assert!(j < self.nr_columns);

        self.data.iter().map(|row| row[j]).collect()
    }

    /// Get all values in row `i` of this matrix.
    pub fn row(&self, i: usize) -> Iter<'_, f64> {
        debug_assert!(i < self.nr_rows);

        self.data[i].iter()
    }

    /// Row `i` as a slice.
    pub fn row_slice(&self, i: usize) -> &[f64] {
        debug_assert!(i < self.nr_rows);

        &self.data[i]
    }

    /// Add a multiple of row `read_row` to row `write_row`.
    pub fn mul_add_rows(&mut self, read_row: usize, write_row: usize, factor: f64) {
        debug_assert!(read_row < self.nr_rows);
        debug_assert!(write_row < self.nr_rows);
        debug_assert_ne!(read_row, write_row);

        for j in 0..self.nr_columns {
            let value = self.data[read_row][j];
            self.data[write_row][j] += factor * value;
        }
    }

    /// Multiply row `i` with a factor `factor`.
    pub fn multiply_row(&mut self, i: usize, factor: f64) {
        debug_assert!(i < self.nr_rows);

        for value in self.data[i].iter_mut() {
            *value *= factor;
        }
    }

    /// Exchange two rows.
    pub fn swap_rows(&mut self, i: usize, k: usize) {
        debug_assert!(i < self.nr_rows);
        debug_assert!(k < self.nr_rows);

        self.data.swap(i, k);
    }

    /// Get the value at coordinate (`i`, `j`).
    pub fn get_value(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.nr_rows);
        debug_assert!(j < self.nr_columns);

        self.data[i][j]
    }

    /// Set the value at coordinate (`i`, `j`) to `value`.
    pub fn set_value(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.nr_rows);
        debug_assert!(j < self.nr_columns);

        self.data[i][j] = value;
    }

    /// Append a row at the bottom of the matrix.
    pub fn push_row(&mut self, row: Vec<f64>) {
        debug_assert!(self.nr_rows == 0 || row.len() == self.nr_columns);

        if self.nr_rows == 0 {
            self.nr_columns = row.len();
        }
        self.data.push(row);
        self.nr_rows += 1;
    }

    /// Insert a column such that it gets index `j`.
    ///
    /// # Arguments
    ///
    /// * `j`: Index of the new column, at most `self.nr_columns()`.
    /// * `values`: One value for each row.
    pub fn insert_column(&mut self, j: usize, values: Vec<f64>) {
        debug_assert!(j <= self.nr_columns);
        debug_assert_eq!(values.len(), self.nr_rows);

        for (row, value) in self.data.iter_mut().zip(values) {
            row.insert(j, value);
        }
        self.nr_columns += 1;
    }

    /// Square or rectangular submatrix of the given rows and columns, in the given order.
    pub fn submatrix(&self, rows: &[usize], columns: &[usize]) -> DenseMatrix {
        debug_assert!(rows.iter().all(|&i| i < self.nr_rows));
        debug_assert!(columns.iter().all(|&j| j < self.nr_columns));

        let data = rows.iter()
            .map(|&i| columns.iter().map(|&j| self.data[i][j]).collect())
            .collect();

        DenseMatrix { data, nr_rows: rows.len(), nr_columns: columns.len() }
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &DenseMatrix) -> DenseMatrix {
        debug_assert_eq!(self.nr_columns, other.nr_rows);

        let data = self.data.iter()
            .map(|row| {
                (0..other.nr_columns)
                    .map(|j| row.iter().enumerate().map(|(k, v)| v * other.data[k][j]).sum())
                    .collect()
            })
            .collect();

        DenseMatrix { data, nr_rows: self.nr_rows, nr_columns: other.nr_columns }
    }

    /// Matrix vector product `self * vector`.
    pub fn multiply_vector(&self, vector: &[f64]) -> Vec<f64> {
        debug_assert_eq!(vector.len(), self.nr_columns);

        self.data.iter()
            .map(|row| inner_product(row, vector))
            .collect()
    }

    /// Vector matrix product `vector^T * self`.
    pub fn left_multiply_vector(&self, vector: &[f64]) -> Vec<f64> {
        debug_assert_eq!(vector.len(), self.nr_rows);

        (0..self.nr_columns)
            .map(|j| vector.iter().zip(&self.data).map(|(v, row)| v * row[j]).sum())
            .collect()
    }

    /// Invert a square matrix using Gauss-Jordan elimination.
    ///
    /// In each step, the row with the largest absolute value in the pivot column is swapped onto
    /// the diagonal before eliminating.
    ///
    /// # Arguments
    ///
    /// * `epsilon`: Pivot values with an absolute value below this are considered zero.
    ///
    /// # Return value
    ///
    /// The inverse, or `Error::SingularBasis` if a pivot is (numerically) zero.
    pub fn invert(&self, epsilon: f64) -> Result<DenseMatrix> {
        debug_assert_eq!(self.nr_rows, self.nr_columns);

        let size = self.nr_rows;
        let mut work = self.clone();
        let mut inverse = DenseMatrix::identity(size);

        for k in 0..size {
            let (pivot_row, pivot_magnitude) = (k..size)
                .map(|i| (i, work.data[i][k].abs()))
                .fold((k, -1f64), |best, candidate| if candidate.1 > best.1 { candidate } else { best });
            if pivot_magnitude < epsilon {
                return Err(Error::SingularBasis);
            }
            if pivot_row != k {
                work.swap_rows(pivot_row, k);
                inverse.swap_rows(pivot_row, k);
            }

            let factor = 1f64 / work.data[k][k];
            work.multiply_row(k, factor);
            inverse.multiply_row(k, factor);

            for i in (0..size).filter(|&i| i != k) {
                let factor = work.data[i][k];
                if factor != 0f64 {
                    work.mul_add_rows(k, i, -factor);
                    inverse.mul_add_rows(k, i, -factor);
                }
            }
        }

        Ok(inverse)
    }

    /// Whether all values are within `epsilon` of the corresponding value of `other`.
    pub fn approximately_equals(&self, other: &DenseMatrix, epsilon: f64) -> bool {
        self.nr_rows == other.nr_rows
            && self.nr_columns == other.nr_columns
            && self.data.iter().flatten()
                .zip(other.data.iter().flatten())
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Get the number of rows in this matrix.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Get the number of columns in this matrix.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }
}

/// Inner product of two slices of equal length.
pub fn inner_product(left: &[f64], right: &[f64]) -> f64 {
    debug_assert_eq!(left.len(), right.len());

    left.iter().zip(right).map(|(a, b)| a * b).sum()
}

impl Display for DenseMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            for value in row {
                write!(f, "{:>10.3}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Returns the dimensions of a `Vec<Vec<f64>>` as a tuple.
fn get_data_dimensions(data: &Vec<Vec<f64>>) -> (usize, usize) {
    let nr_rows = data.len();
    let nr_columns = data.first().map_or(0, Vec::len);

    (nr_rows, nr_columns)
}
