//! # Branch and bound
//!
//! Breadth first search over a tree of linear relaxations. Each node owns a copy of its parent's
//! tableau with one extra row, `x <= floor(v)` or `x >= ceil(v)`, that cuts off the fractional
//! value `v` of an integer variable `x`.
//!
//! The extra rows are appended to an optimal tableau, so the dual simplex method is usually able
//! to restore feasibility in a few pivots.
use std::collections::VecDeque;

use itertools::repeat_n;
use log::{debug, info, warn};

use crate::algorithm::integer::first_fractional_variable;
use crate::algorithm::OptimizationResult;
use crate::algorithm::session::{IterationKind, NodeOutcome, SolverSession};
use crate::algorithm::simplex::{solution_from_tableau, solve};
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::BoundDirection;
use crate::data::linear_program::solution::Solution;
use crate::data::number_types::float::numerical_precision::snap_to_integer;
use crate::error::Result;

/// Outcome of a branch and bound search.
///
/// The tableaus of all processed nodes are recorded in the session.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegerReport {
    /// Best integer solution, `Infeasible` if there is none and `Unbounded` if the relaxation of
    /// the root is unbounded.
    pub result: OptimizationResult<Solution>,
    /// Number of nodes of which the relaxation was solved.
    pub nr_nodes: usize,
    /// Whether the search was stopped by the node limit before the tree was fully explored.
    pub limit_reached: bool,
}

/// A node in the search tree.
struct Node {
    /// Sequence number, the root is `0`.
    id: usize,
    /// Number of branching rows on top of the root tableau.
    depth: usize,
    /// Owned copy of the parent's tableau, including this node's branching row.
    tableau: Tableau,
}

/// Find the best integer solution of a model.
///
/// # Arguments
///
/// * `canonical`: Canonical form of the model. When none of its variables are marked as integer,
/// all of them are considered integer.
/// * `session`: Tolerances, node limit and audit trail.
///
/// # Return value
///
/// The best integer solution found, with statistics about the search.
pub fn branch_and_bound(
    canonical: &CanonicalForm,
    session: &mut SolverSession,
) -> Result<IntegerReport> {
    let epsilon = session.tolerances().general;
    let objective = canonical.objective();
    let integer_variables = if canonical.integer_variables().is_empty() {
        (0..canonical.nr_variables()).collect()
    } else {
        canonical.integer_variables().to_vec()
    };

    let mut queue = VecDeque::new();
    queue.push_back(Node { id: 0, depth: 0, tableau: canonical.tableau().clone() });
    session.record(IterationKind::Initial, canonical.tableau());

    let mut incumbent: Option<Solution> = None;
    let mut nr_nodes = 0;
    let mut next_id = 1;
    let mut limit_reached = false;

    while let Some(Node { id, depth, mut tableau }) = queue.pop_front() {
        if session.settings().max_nodes.is_some_and(|max_nodes| nr_nodes >= max_nodes) {
            warn!("branch and bound stopped after {} nodes with {} nodes left", nr_nodes, queue.len() + 1);
            limit_reached = true;
            break;
        }
        nr_nodes += 1;

        let values = match solve(&mut tableau, session)? {
            OptimizationResult::FiniteOptimum(values) => values,
            OptimizationResult::Infeasible => {
                debug!("node {} is infeasible", id);
                session.record(IterationKind::Node { id, depth, outcome: NodeOutcome::Infeasible }, &tableau);
                continue;
            },
            OptimizationResult::Unbounded => {
                session.record(IterationKind::Node { id, depth, outcome: NodeOutcome::Unbounded }, &tableau);
                if id == 0 {
                    info!("relaxation of the root is unbounded");
                    return Ok(IntegerReport { result: OptimizationResult::Unbounded, nr_nodes, limit_reached });
                }
                continue;
            },
        };

        let objective_value = canonical.objective_value(tableau.objective_function_value());
        if let Some(best) = &incumbent {
            if !objective.is_better(objective_value, best.objective_value(), epsilon) {
                debug!("node {} with objective {} is dominated", id, objective_value);
                session.record(IterationKind::Node { id, depth, outcome: NodeOutcome::Dominated }, &tableau);
                continue;
            }
        }

        match first_fractional_variable(canonical, &tableau, &integer_variables, epsilon) {
            None => {
                info!("node {} has an integer solution with objective {}", id, objective_value);
                let outcome = NodeOutcome::Integral { objective_value };
                session.record(IterationKind::Node { id, depth, outcome }, &tableau);

                let solution = solution_from_tableau(canonical, tableau, &values);
                let solution = snap_integer_values(solution, &integer_variables, epsilon);
                incumbent = Some(solution);
            },
            Some((variable, value)) => {
                debug!("node {} branches on variable {} with value {}", id, variable, value);
                let outcome = NodeOutcome::Branched { variable, value };
                session.record(IterationKind::Node { id, depth, outcome }, &tableau);

                for direction in [BoundDirection::Upper, BoundDirection::Lower] {
                    let bound = match direction {
                        BoundDirection::Upper => value.floor(),
                        BoundDirection::Lower => value.ceil(),
                    };
                    let mut child = tableau.clone();
                    child.add_constraint(&branching_row(canonical, variable), direction.constraint_type(), bound);
                    queue.push_back(Node { id: next_id, depth: depth + 1, tableau: child });
                    next_id += 1;
                }
            },
        }
    }

    let result = match incumbent {
        Some(solution) => {
            info!(
                "branch and bound finished after {} nodes with objective {}",
                nr_nodes, solution.objective_value(),
            );
            OptimizationResult::FiniteOptimum(solution)
        },
        None => {
            info!("branch and bound finished after {} nodes without an integer solution", nr_nodes);
            OptimizationResult::Infeasible
        },
    };

    Ok(IntegerReport { result, nr_nodes, limit_reached })
}

/// Round the values of the integer variables, which are integral up to `epsilon`.
fn snap_integer_values(solution: Solution, integer_variables: &[usize], epsilon: f64) -> Solution {
    let values = solution.variable_values().iter()
        .enumerate()
        .map(|(j, &value)| if integer_variables.contains(&j) { snap_to_integer(value, epsilon) } else { value })
        .collect();

    Solution::new(solution.objective_value(), values, solution.into_tableau())
}

/// Coefficients of a single model variable, in terms of the structural columns.
fn branching_row(canonical: &CanonicalForm, variable: usize) -> Vec<f64> {
    let mut unit = repeat_n(0f64, canonical.nr_variables()).collect::<Vec<_>>();
    unit[variable] = 1f64;

    canonical.canonical_coefficients(&unit)
}
