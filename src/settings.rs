//! # Solver settings
//!
//! All numerical tolerances and effort limits of the engine live here, so that no algorithm
//! decides on its own what "zero" or "integral" means.

/// Tolerances used for all "is this zero" and "is this an integer" decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Used when checking whether a column is a unit vector.
    pub unit: f64,
    /// Zero, sign and integrality decisions of the general algorithms.
    pub general: f64,
    /// Integrality decisions of the 0/1 knapsack search.
    pub knapsack: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            unit: 1e-9,
            general: 1e-6,
            knapsack: 1e-3,
        }
    }
}

/// Settings shared by all algorithms of a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSettings {
    /// Numerical tolerances.
    pub tolerances: Tolerances,
    /// Maximum number of pivots of a single simplex run.
    pub max_pivots: usize,
    /// Number of consecutive primal pivots without objective improvement after which the
    /// smallest index rule of Bland takes over, which can't cycle.
    pub max_degenerate_pivots: usize,
    /// Maximum number of nodes processed by the branch and bound search (`None` = unlimited).
    pub max_nodes: Option<usize>,
    /// Maximum number of cutting plane rounds.
    pub max_cuts: usize,
    /// Maximum number of nodes processed by the knapsack search.
    pub max_knapsack_iterations: usize,
    /// Whether to keep a copy of the tableau after every pivot, cut and node.
    pub record_iterations: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            max_pivots: 10_000,
            max_degenerate_pivots: 10,
            max_nodes: Some(100_000),
            max_cuts: 500,
            max_knapsack_iterations: 30,
            record_iterations: true,
        }
    }
}
