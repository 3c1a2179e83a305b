//! # Branch and bound for 0/1 knapsack problems
//!
//! A knapsack problem has a single `<=` constraint with nonnegative weights, only binary variables
//! and nonnegative values to maximize. Its linear relaxation doesn't need the simplex method: the
//! greedy solution that takes the variables in order of decreasing value per unit of weight, taking
//! the first one that doesn't fit anymore fractionally, is optimal.
//!
//! The search fixes variables to zero or one, and processes the nodes in first in, first out
//! order.
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::fmt;

use log::{debug, info, warn};

use crate::algorithm::OptimizationResult;
use crate::algorithm::session::SolverSession;
use crate::data::linear_program::elements::{ConstraintType, Objective, SignRestriction};
use crate::data::linear_program::model::Model;
use crate::data::number_types::float::numerical_precision::{is_negative, is_positive};
use crate::error::{Error, Result};

/// Position of a variable in the ranking by value per unit of weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedVariable {
    /// Index of the model variable.
    pub variable: usize,
    /// Value per unit of weight; infinite for weightless variables.
    pub ratio: f64,
    /// Position in the ranking, starting at `1`.
    pub rank: usize,
}

/// Line of the relaxation of a node: a variable with the amount that is taken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnapsackRow {
    /// Index of the model variable.
    pub variable: usize,
    /// Amount taken, in `[0, 1]`.
    pub amount: f64,
    /// Capacity left after taking this variable.
    pub remainder: f64,
}

/// The relaxation of a processed node.
#[derive(Clone, Debug, PartialEq)]
pub struct KnapsackIteration {
    /// Sequence number of the node, the root is `0`.
    pub node: usize,
    /// The variables that were fixed in this node, with their value.
    pub fixed: Vec<(usize, bool)>,
    /// Fixed variables first, then the free ones in rank order until the knapsack is full.
    pub rows: Vec<KnapsackRow>,
    /// Value of the relaxation, `None` if the fixed variables don't fit.
    pub objective_value: Option<f64>,
}

/// The best selection.
#[derive(Clone, Debug, PartialEq)]
pub struct KnapsackSolution {
    /// Total value of the selection.
    pub objective_value: f64,
    /// `0` or `1` for each model variable.
    pub variable_values: Vec<f64>,
}

/// Outcome of the knapsack search.
#[derive(Clone, Debug, PartialEq)]
pub struct KnapsackReport {
    /// Best selection, or `Infeasible` if the capacity is negative.
    pub result: OptimizationResult<KnapsackSolution>,
    /// All variables in order of rank.
    pub ranking: Vec<RankedVariable>,
    /// One entry per processed node.
    pub iterations: Vec<KnapsackIteration>,
    /// Whether the search was stopped by the iteration limit before the tree was fully explored.
    pub limit_reached: bool,
}

/// Relaxation of a node.
enum Relaxation {
    /// The fixed variables don't fit.
    Infeasible,
    /// All variables have value zero or one.
    Integral(f64),
    /// A variable is taken partially.
    Fractional {
        objective_value: f64,
        variable: usize,
    },
}

/// Solve a 0/1 knapsack problem by branch and bound.
///
/// # Arguments
///
/// * `model`: A maximization with a single `<=` constraint, nonnegative data and only binary
/// variables.
/// * `session`: Provides the knapsack tolerance and iteration limit.
///
/// # Return value
///
/// The report of the search, or `Error::MalformedModel` if the model is not a knapsack problem.
pub fn knapsack(model: &Model, session: &mut SolverSession) -> Result<KnapsackReport> {
    validate(model)?;

    let epsilon = session.tolerances().knapsack;
    let max_iterations = session.settings().max_knapsack_iterations;
    let values = model.cost();
    let weights = model.constraint(0);
    let capacity = model.rhs()[0];

    let ranking = rank(values, weights);
    debug!("knapsack ranking: {:?}", ranking);

    let mut queue = VecDeque::new();
    queue.push_back(vec![None; model.nr_variables()]);
    let mut iterations = Vec::new();
    let mut incumbent: Option<KnapsackSolution> = None;
    let mut limit_reached = false;

    while let Some(fixed) = queue.pop_front() {
        if iterations.len() >= max_iterations {
            warn!("knapsack search stopped after {} iterations", iterations.len());
            limit_reached = true;
            break;
        }

        let node = iterations.len();
        let (rows, relaxation) = relax(&ranking, &fixed, values, weights, capacity, epsilon);
        iterations.push(KnapsackIteration {
            node,
            fixed: fixed.iter()
                .enumerate()
                .filter_map(|(j, value)| value.map(|value| (j, value)))
                .collect(),
            objective_value: match relaxation {
                Relaxation::Infeasible => None,
                Relaxation::Integral(value) | Relaxation::Fractional { objective_value: value, .. } => Some(value),
            },
            rows: rows.clone(),
        });

        match relaxation {
            Relaxation::Infeasible => debug!("knapsack node {} is infeasible", node),
            Relaxation::Integral(objective_value) => {
                let is_improvement = incumbent.as_ref()
                    .map_or(true, |best| is_positive(objective_value - best.objective_value, epsilon));
                if is_improvement {
                    info!("knapsack node {} has selection with value {}", node, objective_value);
                    let mut variable_values = vec![0f64; model.nr_variables()];
                    for row in &rows {
                        variable_values[row.variable] = row.amount.round();
                    }
                    incumbent = Some(KnapsackSolution { objective_value, variable_values });
                }
            },
            Relaxation::Fractional { objective_value, variable } => {
                let is_dominated = incumbent.as_ref()
                    .is_some_and(|best| !is_positive(objective_value - best.objective_value, epsilon));
                if is_dominated {
                    debug!("knapsack node {} with bound {} is dominated", node, objective_value);
                } else {
                    debug!("knapsack node {} branches on variable {}", node, variable);
                    for value in [false, true] {
                        let mut child = fixed.clone();
                        child[variable] = Some(value);
                        queue.push_back(child);
                    }
                }
            },
        }
    }

    let result = match incumbent {
        Some(solution) => OptimizationResult::FiniteOptimum(solution),
        None => OptimizationResult::Infeasible,
    };

    Ok(KnapsackReport { result, ranking, iterations, limit_reached })
}

fn validate(model: &Model) -> Result<()> {
    let reason = if model.objective() != Objective::Maximize {
        Some("a knapsack problem is a maximization")
    } else if model.nr_constraints() != 1 || model.constraint_types()[0] != ConstraintType::Less {
        Some("a knapsack problem has a single <= constraint")
    } else if model.sign_restrictions().iter().any(|&restriction| restriction != SignRestriction::Binary) {
        Some("all variables of a knapsack problem are binary")
    } else if model.cost().iter().chain(model.constraint(0)).any(|&value| value < 0f64) {
        Some("a knapsack problem has nonnegative values and weights")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::MalformedModel(reason.to_string())),
        None => Ok(()),
    }
}

/// Rank the variables by decreasing value per unit of weight, lowest index first on ties.
fn rank(values: &[f64], weights: &[f64]) -> Vec<RankedVariable> {
    let mut ratios = values.iter()
        .zip(weights)
        .map(|(&value, &weight)| if weight == 0f64 { f64::INFINITY } else { value / weight })
        .enumerate()
        .collect::<Vec<_>>();
    // Stable, so ties keep the order of the model.
    ratios.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    ratios.into_iter()
        .enumerate()
        .map(|(position, (variable, ratio))| RankedVariable { variable, ratio, rank: position + 1 })
        .collect()
}

/// Greedy relaxation of a node.
///
/// # Return value
///
/// The rows describing the relaxation, and its classification.
fn relax(
    ranking: &[RankedVariable],
    fixed: &[Option<bool>],
    values: &[f64],
    weights: &[f64],
    capacity: f64,
    epsilon: f64,
) -> (Vec<KnapsackRow>, Relaxation) {
    let mut rows = Vec::new();
    let mut remainder = capacity;
    let mut objective_value = 0f64;

    for (j, value) in fixed.iter().enumerate() {
        if let Some(taken) = value {
            let amount = if *taken { 1f64 } else { 0f64 };
            remainder -= amount * weights[j];
            objective_value += amount * values[j];
            rows.push(KnapsackRow { variable: j, amount, remainder });
        }
    }
    if is_negative(remainder, epsilon) {
        return (rows, Relaxation::Infeasible);
    }

    for &RankedVariable { variable, .. } in ranking.iter().filter(|ranked| fixed[ranked.variable].is_none()) {
        let weight = weights[variable];
        if weight <= remainder + epsilon {
            remainder -= weight;
            objective_value += values[variable];
            rows.push(KnapsackRow { variable, amount: 1f64, remainder });
        } else {
            let amount = remainder / weight;
            objective_value += amount * values[variable];
            rows.push(KnapsackRow { variable, amount, remainder: 0f64 });

            return if is_positive(amount, epsilon) {
                (rows, Relaxation::Fractional { objective_value, variable })
            } else {
                (rows, Relaxation::Integral(objective_value))
            };
        }
    }

    (rows, Relaxation::Integral(objective_value))
}

impl Display for KnapsackIteration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "node {}", self.node)?;
        writeln!(f, "{:>10} {:>10} {:>10}", "variable", "in/out", "remainder")?;
        for row in &self.rows {
            writeln!(f, "{:>10} {:>10.3} {:>10.3}", format!("x{}", row.variable + 1), row.amount, row.remainder)?;
        }
        match self.objective_value {
            Some(value) => writeln!(f, "bound {:.3}", value),
            None => writeln!(f, "infeasible"),
        }
    }
}
