//! # Algorithms
//!
//! The simplex methods in `simplex` solve linear relaxations. The methods in `integer` build upon
//! them to find integer solutions, and `sensitivity` analyzes an optimal tableau.
use std::fmt::{Display, Formatter};
use std::fmt;

use crate::algorithm::integer::branch_and_bound::branch_and_bound;
use crate::algorithm::session::SolverSession;
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;
use crate::error::Result;

pub mod integer;
pub mod sensitivity;
pub mod session;
pub mod simplex;
pub mod utilities;

/// A problem formulation of which a relaxation can be solved.
pub trait SolveRelaxation {
    /// Solve the relaxed version of this problem.
    ///
    /// In the case of linear programming, that means that integer constraints are ignored.
    ///
    /// # Return value
    ///
    /// Whether the problem is feasible, and if so, a solution if the problem is bounded.
    fn solve_relaxation(&self, session: &mut SolverSession) -> Result<OptimizationResult<Solution>>;
}

/// A linear program is either infeasible, unbounded or has a finite optimum.
///
/// This is determined as the result of an algorithm.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum OptimizationResult<T> {
    Infeasible,
    FiniteOptimum(T),
    Unbounded,
}

impl<T> OptimizationResult<T> {
    /// Transform the value of a finite optimum.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> OptimizationResult<U> {
        match self {
            OptimizationResult::Infeasible => OptimizationResult::Infeasible,
            OptimizationResult::FiniteOptimum(value) => OptimizationResult::FiniteOptimum(f(value)),
            OptimizationResult::Unbounded => OptimizationResult::Unbounded,
        }
    }

    /// The value of a finite optimum, if there is one.
    pub fn finite_optimum(self) -> Option<T> {
        match self {
            OptimizationResult::FiniteOptimum(value) => Some(value),
            OptimizationResult::Infeasible | OptimizationResult::Unbounded => None,
        }
    }

    /// Status without the value.
    pub fn status(&self) -> Status {
        match self {
            OptimizationResult::Infeasible => Status::Infeasible,
            OptimizationResult::FiniteOptimum(_) => Status::Optimal,
            OptimizationResult::Unbounded => Status::Unbounded,
        }
    }
}

/// Final status of a solve, as reported to the user.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Optimal => "optimal",
            Status::Infeasible => "infeasible",
            Status::Unbounded => "unbounded",
        })
    }
}

/// Solve a model, respecting its integer variables.
///
/// Models without integer or binary variables are solved as a linear program. Otherwise, branch
/// and bound is used; the search stops early when the node limit of the session is reached, in
/// which case the best solution found so far is returned.
pub fn solve(model: &Model, session: &mut SolverSession) -> Result<OptimizationResult<Solution>> {
    if model.integer_variables().is_empty() {
        model.solve_relaxation(session)
    } else {
        let report = branch_and_bound(&CanonicalForm::new(model), session)?;
        Ok(report.result)
    }
}
