//! # Pivot rules
//!
//! Strategies for moving from basis to basis in the primal simplex method.
use crate::algorithm::simplex::tableau::Tableau;
use crate::algorithm::utilities::first_minimum;
use crate::data::number_types::float::numerical_precision::is_negative;

/// Anything that can tell the relative cost of its columns.
///
/// Implemented by the full tableau and by the revised simplex method, which computes the relative
/// costs from the basis inverse.
pub trait RelativeCosts {
    /// Number of columns that could enter the basis.
    fn nr_columns(&self) -> usize;
    /// Whether a column is currently basic.
    fn is_in_basis(&self, column: usize) -> bool;
    /// Relative cost of a column; negative means that bringing it into the basis is profitable.
    fn relative_cost(&self, column: usize) -> f64;
}

impl RelativeCosts for Tableau {
    fn nr_columns(&self) -> usize {
        Tableau::nr_columns(self)
    }

    fn is_in_basis(&self, column: usize) -> bool {
        Tableau::is_in_basis(self, column)
    }

    fn relative_cost(&self, column: usize) -> f64 {
        Tableau::relative_cost(self, column)
    }
}

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected for a primal pivot, a row needs to be found. This decision is
/// made independent of the strategy.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal Simplex method.
    ///
    /// # Arguments
    ///
    /// * `costs`: Source of the relative costs.
    /// * `epsilon`: Relative costs above `-epsilon` are not considered negative.
    ///
    /// # Return value
    ///
    /// The column to bring into the basis with its relative cost, or `None` if the current
    /// solution is optimal.
    fn select_primal_pivot_column<RC: RelativeCosts>(
        &mut self,
        costs: &RC,
        epsilon: f64,
    ) -> Option<(usize, f64)>;
}

/// Simply pivot on the first column, which has a negative relative cost.
pub struct FirstProfitable;
impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column<RC: RelativeCosts>(
        &mut self,
        costs: &RC,
        epsilon: f64,
    ) -> Option<(usize, f64)> {
        (0..costs.nr_columns())
            .filter(|&column| !costs.is_in_basis(column))
            .map(|column| (column, costs.relative_cost(column)))
            .find(|&(_, cost)| is_negative(cost, epsilon))
    }
}

/// Simply pivot on the column, which has the most negative relative cost.
///
/// Ties are broken by taking the lowest column index.
pub struct SteepestDescentAlongVariable;
impl PivotRule for SteepestDescentAlongVariable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column<RC: RelativeCosts>(
        &mut self,
        costs: &RC,
        epsilon: f64,
    ) -> Option<(usize, f64)> {
        let candidates = (0..costs.nr_columns())
            .filter(|&column| !costs.is_in_basis(column))
            .map(|column| (column, costs.relative_cost(column)))
            .filter(|&(_, cost)| is_negative(cost, epsilon));

        first_minimum(candidates, epsilon)
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, PivotRule, SteepestDescentAlongVariable};
    use crate::tests::{problem_1, problem_3};

    #[test]
    fn find_profitable_column() {
        let tableau = problem_1::initial_tableau();
        let mut rule = <FirstProfitable as PivotRule>::new();
        assert_eq!(rule.select_primal_pivot_column(&tableau, 1e-9), Some((0, -3f64)));

        let tableau = problem_1::optimal_tableau();
        assert_eq!(rule.select_primal_pivot_column(&tableau, 1e-9), None);
    }

    #[test]
    fn most_negative_column() {
        let tableau = problem_3::initial_tableau();
        let mut first = <FirstProfitable as PivotRule>::new();
        assert_eq!(first.select_primal_pivot_column(&tableau, 1e-9), Some((0, -7f64)));
        let mut steepest = <SteepestDescentAlongVariable as PivotRule>::new();
        assert_eq!(steepest.select_primal_pivot_column(&tableau, 1e-9), Some((1, -9f64)));

        let tableau = problem_1::optimal_tableau();
        assert_eq!(steepest.select_primal_pivot_column(&tableau, 1e-9), None);
    }
}
