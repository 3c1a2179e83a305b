//! # Building blocks to describe linear programs.
use std::fmt::{Display, Formatter};
use std::fmt;

/// A `Constraint` is a type of (in)equality.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConstraintType {
    Equal,
    Greater,
    Less,
}

impl Display for ConstraintType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintType::Equal => "=",
            ConstraintType::Greater => ">=",
            ConstraintType::Less => "<=",
        })
    }
}

/// Direction of a bound.
///
/// Is used more generally in the case where the three variants of the `ConstraintType` don't suit
/// the needs, such as the two children of a branching step.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoundDirection {
    /// In the case of a variable, x >= b.
    Lower,
    /// In the case of a variable, x <= b.
    Upper,
}

impl BoundDirection {
    /// The (inequality) constraint type that expresses a bound in this direction.
    #[must_use]
    pub fn constraint_type(self) -> ConstraintType {
        match self {
            BoundDirection::Lower => ConstraintType::Greater,
            BoundDirection::Upper => ConstraintType::Less,
        }
    }
}

/// A variable is either continuous or integer.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VariableType {
    Continuous,
    Integer,
}

/// Sign restriction of a variable, as given in the last line of a model file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SignRestriction {
    /// `x >= 0`, token `+`.
    NonNegative,
    /// `x <= 0`, token `-`.
    NonPositive,
    /// Unrestricted in sign, token `urs`.
    Free,
    /// `x >= 0` and integer, token `int`.
    Integer,
    /// `x` in `{0, 1}`, token `bin`.
    Binary,
}

impl SignRestriction {
    /// Whether the variable needs an integer value.
    pub fn variable_type(self) -> VariableType {
        match self {
            SignRestriction::Integer | SignRestriction::Binary => VariableType::Integer,
            SignRestriction::NonNegative | SignRestriction::NonPositive | SignRestriction::Free => {
                VariableType::Continuous
            },
        }
    }
}

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    /// Factor that turns this objective into a maximization.
    ///
    /// The tableau always maximizes `sign * cost`.
    pub fn sign(self) -> f64 {
        match self {
            Objective::Maximize => 1f64,
            Objective::Minimize => -1f64,
        }
    }

    /// Whether `candidate` is a strictly better objective value than `incumbent`.
    pub fn is_better(self, candidate: f64, incumbent: f64, epsilon: f64) -> bool {
        self.sign() * (candidate - incumbent) > epsilon
    }
}
