//! # Canonical form
//!
//! A linear program in `CanonicalForm` only has `<=` rows with a slack column each and
//! nonnegative variables, and describes a maximization. It is derived from a `Model`:
//!
//! * `>=` rows are negated;
//! * `=` rows become a `<=` row and a negated `>=` row;
//! * nonpositive variables are negated, free variables are split in a positive and negative part;
//! * binary variables get an extra `x <= 1` row;
//! * a minimization is turned into a maximization by negating the cost.
//!
//! The columns are ordered in groups:
//!
//! ```text
//! | normal | negative parts of free variables | slacks | rhs |
//! ```
//!
//! The rows first hold the (one or two) rows of each model constraint, followed by the binary
//! variable bounds. The right hand side is not necessarily nonnegative; the dual simplex method
//! takes care of that.
use std::iter::once;

use cumsum::cumsum_array_owned;
use enum_map::{Enum, enum_map, EnumMap};
use itertools::repeat_n;
use log::debug;

use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_algebra::matrix::DenseMatrix;
use crate::data::linear_program::elements::{ConstraintType, Objective, SignRestriction, VariableType};
use crate::data::linear_program::model::Model;
use crate::data::number_types::float::numerical_precision::is_integral;

/// Tolerance for deciding whether model data is integer.
const DATA_INTEGRALITY_TOLERANCE: f64 = 1e-9;

/// The initial tableau of a model, together with the information needed to translate back.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalForm {
    objective: Objective,
    tableau: Tableau,

    /// Indices that separate the different groups of columns.
    column_group_end: EnumMap<ColumnType, usize>,
    /// For each model variable, where it lives in the tableau.
    variable_columns: Vec<VariableColumns>,
    /// For each tableau row, where it came from.
    row_origins: Vec<RowOrigin>,
    /// Number of model constraints, including those added later.
    nr_constraints: usize,
    /// For each column, whether it can only take integer values in an integer solution.
    integer_columns: Vec<bool>,
    /// Model variables that need an integer value.
    integer_variables: Vec<usize>,
}

/// Indexing within the different column types (see module description).
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColumnType {
    /// One column for each model variable.
    ///
    /// Contains the variable itself, its negation or its positive part.
    Normal,
    /// The negative part `x-` of a free variable `x = x+ - x-`.
    NegativePart,
    /// One slack (or surplus, for negated rows) for each row.
    Slack,
}

/// How a model variable is represented by the columns of the tableau.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VariableColumns {
    /// `x = x'` with `x' >= 0`.
    Positive(usize),
    /// `x = -x'` with `x' >= 0`.
    Negated(usize),
    /// `x = x+ - x-` with `x+, x- >= 0`.
    Split {
        /// Column of `x+`.
        positive: usize,
        /// Column of `x-`.
        negative: usize,
    },
}

/// Where a row of the canonical tableau comes from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RowOrigin {
    /// A model constraint, possibly one of the two halves of an equality.
    Constraint {
        /// Index of the constraint in the model.
        index: usize,
        /// `Less` if the row was taken as-is, `Greater` if it was negated.
        constraint_type: ConstraintType,
    },
    /// The `x <= 1` bound of a binary variable.
    BinaryBound {
        /// Index of the variable in the model.
        variable: usize,
    },
}

impl RowOrigin {
    /// Factor with which the model data was multiplied to get this row.
    pub fn sign(self) -> f64 {
        match self {
            RowOrigin::Constraint { constraint_type: ConstraintType::Greater, .. } => -1f64,
            _ => 1f64,
        }
    }
}

impl CanonicalForm {
    /// Build the initial tableau of a model.
    ///
    /// The slack columns form the initial basis.
    ///
    /// # Arguments
    ///
    /// * `model`: Model to convert; it was validated on creation.
    pub fn new(model: &Model) -> Self {
        let nr_variables = model.nr_variables();
        let nr_free = model.sign_restrictions().iter()
            .filter(|&&restriction| restriction == SignRestriction::Free)
            .count();

        let row_origins = Self::derive_row_origins(model);
        let cumulative = cumsum_array_owned([nr_variables, nr_free, row_origins.len()]);
        let column_group_end = enum_map! {
            ColumnType::Normal       => cumulative[0],
            ColumnType::NegativePart => cumulative[1],
            ColumnType::Slack        => cumulative[2],
        };

        let mut next_negative_part = column_group_end[ColumnType::Normal];
        let variable_columns = model.sign_restrictions().iter()
            .enumerate()
            .map(|(j, restriction)| match restriction {
                SignRestriction::NonNegative | SignRestriction::Integer | SignRestriction::Binary => {
                    VariableColumns::Positive(j)
                },
                SignRestriction::NonPositive => VariableColumns::Negated(j),
                SignRestriction::Free => {
                    let negative = next_negative_part;
                    next_negative_part += 1;
                    VariableColumns::Split { positive: j, negative }
                },
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(next_negative_part, column_group_end[ColumnType::NegativePart]);

        let nr_structural_columns = column_group_end[ColumnType::NegativePart];
        let nr_rows = row_origins.len();
        let slack_column = |i: usize| nr_structural_columns + i;

        let sigma = model.objective().sign();
        let cost_row = map_coefficients(&variable_columns, nr_structural_columns, model.cost())
            .into_iter()
            .map(|c| -sigma * c)
            .chain(repeat_n(0f64, nr_rows + 1))
            .collect::<Vec<_>>();
        let mut data = Vec::with_capacity(nr_rows + 1);
        data.push(cost_row);

        for (i, origin) in row_origins.iter().enumerate() {
            let (coefficients, rhs) = match *origin {
                RowOrigin::Constraint { index, .. } => (model.constraint(index).to_vec(), model.rhs()[index]),
                RowOrigin::BinaryBound { variable } => {
                    let mut coefficients = repeat_n(0f64, nr_variables).collect::<Vec<_>>();
                    coefficients[variable] = 1f64;
                    (coefficients, 1f64)
                },
            };
            let sign = origin.sign();
            let mut row = map_coefficients(&variable_columns, nr_structural_columns, &coefficients)
                .into_iter()
                .map(|a| sign * a)
                .chain(repeat_n(0f64, nr_rows + 1))
                .collect::<Vec<_>>();
            row[slack_column(i)] = 1f64;
            row[nr_structural_columns + nr_rows] = sign * rhs;
            data.push(row);
        }

        let basis_indices = (0..nr_rows).map(slack_column).collect();
        let tableau = Tableau::new(DenseMatrix::from_data(data), basis_indices);
        debug_assert_eq!(tableau.nr_columns(), column_group_end[ColumnType::Slack]);
        let integer_variables = model.integer_variables();
        let integer_columns = derive_integer_columns(&tableau, &variable_columns, &integer_variables);

        debug!(
            "canonical form with {} rows and {} columns ({} free variables)",
            nr_rows, tableau.nr_columns(), nr_free,
        );

        Self {
            objective: model.objective(),
            tableau,
            column_group_end,
            variable_columns,
            row_origins,
            nr_constraints: model.nr_constraints(),
            integer_columns,
            integer_variables,
        }
    }

    /// One or two rows per constraint, then a row for each binary variable.
    fn derive_row_origins(model: &Model) -> Vec<RowOrigin> {
        let constraint_rows = model.constraint_types().iter()
            .enumerate()
            .flat_map(|(index, &constraint_type)| {
                let types = match constraint_type {
                    ConstraintType::Less => vec![ConstraintType::Less],
                    ConstraintType::Greater => vec![ConstraintType::Greater],
                    ConstraintType::Equal => vec![ConstraintType::Less, ConstraintType::Greater],
                };
                types.into_iter().map(move |constraint_type| RowOrigin::Constraint { index, constraint_type })
            });
        let bound_rows = model.sign_restrictions().iter()
            .enumerate()
            .filter(|&(_, &restriction)| restriction == SignRestriction::Binary)
            .map(|(variable, _)| RowOrigin::BinaryBound { variable });

        constraint_rows.chain(bound_rows).collect()
    }

    /// Map coefficients of the model variables to the structural columns of the tableau.
    ///
    /// # Arguments
    ///
    /// * `coefficients`: One value per model variable.
    ///
    /// # Return value
    ///
    /// One value per column of the initial tableau, zero for the slack columns.
    pub fn canonical_coefficients(&self, coefficients: &[f64]) -> Vec<f64> {
        debug_assert_eq!(coefficients.len(), self.nr_variables());

        map_coefficients(&self.variable_columns, self.nr_columns(), coefficients)
    }

    /// Map values of the tableau columns back to values of the model variables.
    ///
    /// # Arguments
    ///
    /// * `column_values`: A value for each column of the initial tableau.
    pub fn original_values(&self, column_values: &[f64]) -> Vec<f64> {
        debug_assert!(column_values.len() >= self.nr_columns());

        self.variable_columns.iter()
            .map(|columns| match *columns {
                VariableColumns::Positive(j) => column_values[j],
                VariableColumns::Negated(j) => -column_values[j],
                VariableColumns::Split { positive, negative } => {
                    column_values[positive] - column_values[negative]
                },
            })
            .collect()
    }

    /// Cost of each column in the maximization that the tableau represents.
    ///
    /// This is the negation of the initial cost row: `sign * c` for structural columns, zero for
    /// slacks.
    pub fn canonical_cost(&self) -> Vec<f64> {
        self.tableau.relative_costs().into_iter().map(|value| -value).collect()
    }

    /// The model value of the objective, given the value in the tableau.
    pub fn objective_value(&self, tableau_value: f64) -> f64 {
        self.objective.sign() * tableau_value
    }

    /// Rows that a model constraint was mapped to.
    ///
    /// # Return value
    ///
    /// Row indices with the factor that the model data was multiplied with.
    pub fn constraint_rows(&self, constraint: usize) -> Vec<(usize, f64)> {
        self.row_origins.iter()
            .enumerate()
            .filter(|(_, origin)| matches!(origin, RowOrigin::Constraint { index, .. } if *index == constraint))
            .map(|(i, origin)| (i, origin.sign()))
            .collect()
    }

    /// Column of the slack of row `i`.
    pub fn slack_column(&self, i: usize) -> usize {
        debug_assert!(i < self.nr_rows());

        self.tableau.basis_indices()[i]
    }

    /// Change the objective function coefficient of a model variable.
    pub fn set_cost(&mut self, variable: usize, cost: f64) {
        debug_assert!(variable < self.nr_variables());

        let sigma = self.objective.sign();
        for (column, factor) in self.columns_of(variable) {
            self.tableau.set_relative_cost(column, -sigma * factor * cost);
        }
    }

    /// Change the right hand side of a model constraint.
    pub fn set_rhs(&mut self, constraint: usize, rhs: f64) {
        debug_assert!(constraint < self.nr_constraints);

        for (row, sign) in self.constraint_rows(constraint) {
            self.tableau.set_constraint_value(row, sign * rhs);
        }
    }

    /// Change a single coefficient of a model constraint.
    pub fn set_coefficient(&mut self, constraint: usize, variable: usize, value: f64) {
        debug_assert!(constraint < self.nr_constraints);
        debug_assert!(variable < self.nr_variables());

        for (row, sign) in self.constraint_rows(constraint) {
            for (column, factor) in self.columns_of(variable) {
                self.tableau.set_element(row, column, sign * factor * value);
            }
        }
    }

    /// Add a nonnegative continuous variable, with a column placed after all existing columns.
    ///
    /// # Arguments
    ///
    /// * `cost`: Objective function coefficient.
    /// * `coefficients`: Coefficient in each model constraint.
    ///
    /// # Return value
    ///
    /// The column of the new variable, in the canonical form.
    pub fn add_variable(&mut self, cost: f64, coefficients: &[f64]) -> usize {
        debug_assert_eq!(coefficients.len(), self.nr_constraints);

        let values = once(-self.objective.sign() * cost)
            .chain(self.row_origins.iter().map(|origin| match *origin {
                RowOrigin::Constraint { index, .. } => origin.sign() * coefficients[index],
                RowOrigin::BinaryBound { .. } => 0f64,
            }))
            .collect();
        let column = self.tableau.add_column(values);
        self.variable_columns.push(VariableColumns::Positive(column));
        self.integer_columns.push(false);

        column
    }

    /// Add a model constraint as one or two rows, each with a new slack column.
    ///
    /// # Arguments
    ///
    /// * `coefficients`: One coefficient per model variable.
    /// * `constraint_type`: Type of the constraint.
    /// * `rhs`: Right hand side.
    ///
    /// # Return value
    ///
    /// Index of the new constraint.
    pub fn add_constraint(&mut self, coefficients: &[f64], constraint_type: ConstraintType, rhs: f64) -> usize {
        debug_assert_eq!(coefficients.len(), self.nr_variables());

        let index = self.nr_constraints;
        let row = self.canonical_coefficients(coefficients);
        let types = match constraint_type {
            ConstraintType::Equal => vec![ConstraintType::Less, ConstraintType::Greater],
            other => vec![other],
        };
        for constraint_type in types {
            self.tableau.add_constraint(&row, constraint_type, rhs);
            self.row_origins.push(RowOrigin::Constraint { index, constraint_type });
            self.integer_columns.push(false);
        }
        self.nr_constraints += 1;

        index
    }

    /// Columns of a model variable, with the factor that maps the variable onto the column.
    fn columns_of(&self, variable: usize) -> Vec<(usize, f64)> {
        match self.variable_columns[variable] {
            VariableColumns::Positive(j) => vec![(j, 1f64)],
            VariableColumns::Negated(j) => vec![(j, -1f64)],
            VariableColumns::Split { positive, negative } => vec![(positive, 1f64), (negative, -1f64)],
        }
    }

    /// Initial tableau.
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// Direction of optimization of the model.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Where each model variable lives in the tableau.
    pub fn variable_columns(&self) -> &[VariableColumns] {
        &self.variable_columns
    }

    /// Where each row came from.
    pub fn row_origins(&self) -> &[RowOrigin] {
        &self.row_origins
    }

    /// Integrality of each column of the initial tableau.
    pub fn integer_columns(&self) -> &[bool] {
        &self.integer_columns
    }

    /// Integrality of each column of the initial tableau, as if every model variable needs an
    /// integer value.
    pub fn pure_integer_columns(&self) -> Vec<bool> {
        let all_variables = (0..self.nr_variables()).collect::<Vec<_>>();
        derive_integer_columns(&self.tableau, &self.variable_columns, &all_variables)
    }

    /// Model variables that need an integer value.
    pub fn integer_variables(&self) -> &[usize] {
        &self.integer_variables
    }

    /// Whether a model variable needs an integer value.
    pub fn variable_type(&self, variable: usize) -> VariableType {
        if self.integer_variables.contains(&variable) {
            VariableType::Integer
        } else {
            VariableType::Continuous
        }
    }

    /// Whether every model variable needs an integer value.
    pub fn is_pure_integer(&self) -> bool {
        self.integer_variables.len() == self.nr_variables()
    }

    /// Number of model variables.
    pub fn nr_variables(&self) -> usize {
        self.variable_columns.len()
    }

    /// Number of model constraints.
    pub fn nr_constraints(&self) -> usize {
        self.nr_constraints
    }

    /// Number of columns that represented model variables when the canonical form was built.
    pub fn nr_structural_columns(&self) -> usize {
        self.column_group_end[ColumnType::NegativePart]
    }

    /// Number of rows of the initial tableau.
    pub fn nr_rows(&self) -> usize {
        self.row_origins.len()
    }

    /// Number of columns of the initial tableau, excluding the right hand side.
    pub fn nr_columns(&self) -> usize {
        self.tableau.nr_columns()
    }
}

/// Map coefficients of the model variables to the first `nr_columns` columns.
fn map_coefficients(
    variable_columns: &[VariableColumns],
    nr_columns: usize,
    coefficients: &[f64],
) -> Vec<f64> {
    let mut result = repeat_n(0f64, nr_columns).collect::<Vec<_>>();
    for (&value, columns) in coefficients.iter().zip(variable_columns) {
        match *columns {
            VariableColumns::Positive(j) => result[j] = value,
            VariableColumns::Negated(j) => result[j] = -value,
            VariableColumns::Split { positive, negative } => {
                result[positive] = value;
                result[negative] = -value;
            },
        }
    }

    result
}

/// Which columns are integer in any integer solution.
///
/// Structural columns of integer variables are. The slack of a row is when all data of its row is
/// integer and only integer columns have a nonzero coefficient. The slack of row `i` is the basic
/// column of row `i` in the initial tableau.
fn derive_integer_columns(
    tableau: &Tableau,
    variable_columns: &[VariableColumns],
    integer_variables: &[usize],
) -> Vec<bool> {
    let mut integer_columns = repeat_n(false, tableau.nr_columns()).collect::<Vec<_>>();
    for &variable in integer_variables {
        if let VariableColumns::Positive(j) = variable_columns[variable] {
            integer_columns[j] = true;
        }
    }

    for (i, &slack) in tableau.basis_indices().iter().enumerate() {
        let integer_row = is_integral(tableau.constraint_value(i), DATA_INTEGRALITY_TOLERANCE)
            && tableau.generate_row(i).iter().enumerate()
                .filter(|&(j, &value)| j != slack && value != 0f64)
                .all(|(j, &value)| integer_columns[j] && is_integral(value, DATA_INTEGRALITY_TOLERANCE));
        integer_columns[slack] = integer_row;
    }

    integer_columns
}
