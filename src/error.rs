//! # Error reporting
//!
//! Expected outcomes of an optimization (infeasibility, unboundedness) are not errors; they are
//! variants of `OptimizationResult`. The variants below describe inputs that can't be solved and
//! operations that can't be carried out.
use thiserror::Error;

/// Everything that can go wrong while building, solving or analyzing a linear program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A vector in the model doesn't have the length that the rest of the model implies.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Which part of the model has the wrong length.
        what: String,
        /// Length implied by the rest of the model.
        expected: usize,
        /// Length that was provided.
        found: usize,
    },
    /// The model is syntactically complete but can't be turned into a tableau.
    #[error("malformed model: {0}")]
    MalformedModel(String),
    /// The basis matrix could not be inverted.
    #[error("basis matrix is singular")]
    SingularBasis,
    /// No column forms a unit vector in the given (zero indexed) constraint row.
    #[error("no basic column found for constraint row {0}")]
    BasisNotFound(usize),
    /// The tableau is not in an optimal state, while the operation needs one.
    #[error("tableau is not optimal")]
    NotOptimal,
    /// The maximum number of pivots was reached before the simplex method terminated.
    #[error("pivot limit of {0} reached")]
    PivotLimit(usize),
    /// The maximum number of cutting plane rounds was reached.
    #[error("cut limit of {0} reached")]
    CutLimit(usize),
    /// A variable index is out of range.
    #[error("variable index {index} out of range for {len} variables")]
    VariableIndex {
        /// Requested index.
        index: usize,
        /// Number of variables.
        len: usize,
    },
    /// A constraint index is out of range.
    #[error("constraint index {index} out of range for {len} constraints")]
    ConstraintIndex {
        /// Requested index.
        index: usize,
        /// Number of constraints.
        len: usize,
    },
    /// The operation needs a basic variable.
    #[error("variable {0} is not basic")]
    NotBasic(usize),
    /// The operation needs a non-basic variable.
    #[error("variable {0} is basic")]
    NotNonBasic(usize),
}

/// Result type of all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
