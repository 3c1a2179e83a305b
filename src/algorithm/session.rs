//! # Solver sessions
//!
//! All state of a solve that is not the tableau itself: the settings, a pivot counter and the
//! audit trail of intermediate tableaus. The caller owns the session and passes it to every
//! algorithm, so that nothing is shared between solves.
use std::fmt::{Display, Formatter};
use std::fmt;

use crate::algorithm::simplex::tableau::Tableau;
use crate::settings::{SolverSettings, Tolerances};

/// State of a single solve.
#[derive(Clone, Debug, Default)]
pub struct SolverSession {
    settings: SolverSettings,
    iterations: Vec<Iteration>,
    nr_pivots: usize,
}

/// A step of an algorithm, recorded together with the tableau right after it.
#[derive(Clone, Debug, PartialEq)]
pub struct Iteration {
    /// What happened.
    pub kind: IterationKind,
    /// Tableau after the step.
    pub tableau: Tableau,
}

/// The steps that are recorded in the audit trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IterationKind {
    /// The tableau that a simplex run started from.
    Initial,
    /// A pivot of the primal simplex method, on a constraint row and column.
    PrimalPivot {
        /// Constraint row.
        row: usize,
        /// Column that entered the basis.
        column: usize,
    },
    /// A pivot of the dual simplex method, on a constraint row and column.
    DualPivot {
        /// Constraint row that left.
        row: usize,
        /// Column that entered the basis.
        column: usize,
    },
    /// A Gomory cut was appended, derived from the given constraint row.
    Cut {
        /// Constraint row the cut was read from.
        source_row: usize,
    },
    /// A branch and bound node was processed.
    Node {
        /// Sequence number of the node, the root being `0`.
        id: usize,
        /// Number of branching rows that were added to the root tableau.
        depth: usize,
        /// What happened to the node.
        outcome: NodeOutcome,
    },
}

/// How a branch and bound node was resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeOutcome {
    /// The relaxation has no solution.
    Infeasible,
    /// The relaxation is unbounded.
    Unbounded,
    /// The relaxation is not better than the best integer solution found so far.
    Dominated,
    /// The relaxation has an integer solution.
    Integral {
        /// Value of the model objective.
        objective_value: f64,
    },
    /// Two children were created for a variable with a fractional value.
    Branched {
        /// Model variable that was branched on.
        variable: usize,
        /// Its fractional value.
        value: f64,
    },
}

impl SolverSession {
    /// Create a new session.
    pub fn new(settings: SolverSettings) -> Self {
        Self {
            settings,
            iterations: Vec::new(),
            nr_pivots: 0,
        }
    }

    /// Record a step, if the settings ask for it.
    ///
    /// # Arguments
    ///
    /// * `kind`: What happened.
    /// * `tableau`: State after the step; it is only cloned when recording.
    pub fn record(&mut self, kind: IterationKind, tableau: &Tableau) {
        if self.settings.record_iterations {
            self.iterations.push(Iteration { kind, tableau: tableau.clone() });
        }
    }

    /// Count a pivot, of any kind.
    pub fn count_pivot(&mut self) {
        self.nr_pivots += 1;
    }

    /// Settings of this solve.
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Tolerances of this solve.
    pub fn tolerances(&self) -> &Tolerances {
        &self.settings.tolerances
    }

    /// All recorded steps, in order.
    pub fn iterations(&self) -> &[Iteration] {
        &self.iterations
    }

    /// Remove the recorded steps from the session.
    pub fn take_iterations(&mut self) -> Vec<Iteration> {
        std::mem::take(&mut self.iterations)
    }

    /// Total number of pivots of all simplex runs in this session.
    pub fn nr_pivots(&self) -> usize {
        self.nr_pivots
    }
}

impl Display for IterationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IterationKind::Initial => write!(f, "initial tableau"),
            IterationKind::PrimalPivot { row, column } => {
                write!(f, "primal pivot on row {}, column {}", row, column)
            },
            IterationKind::DualPivot { row, column } => {
                write!(f, "dual pivot on row {}, column {}", row, column)
            },
            IterationKind::Cut { source_row } => write!(f, "cut from row {}", source_row),
            IterationKind::Node { id, depth, outcome } => {
                write!(f, "node {} at depth {}: {:?}", id, depth, outcome)
            },
        }
    }
}

impl Display for Iteration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        write!(f, "{}", self.tableau)
    }
}
