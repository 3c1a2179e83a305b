//! # Ranges of a perturbation
//!
//! Every range query results in a set of linear inequalities in a single unknown `Δ`, the change
//! of the model value under consideration. The optimal basis stays optimal (and feasible) as long
//! as all of them hold.
use std::fmt::{Display, Formatter};
use std::fmt;

use crate::data::number_types::float::numerical_precision::{is_negative, is_positive};

/// The inequality `constant + coefficient * Δ >= 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DeltaInequality {
    /// Value of the left hand side at `Δ = 0`.
    pub constant: f64,
    /// Rate of change of the left hand side.
    pub coefficient: f64,
}

impl DeltaInequality {
    /// Create a new inequality.
    pub fn new(constant: f64, coefficient: f64) -> Self {
        Self { constant, coefficient }
    }

    /// Whether a value of `Δ` satisfies the inequality, up to `epsilon`.
    pub fn holds_for(&self, delta: f64, epsilon: f64) -> bool {
        !is_negative(self.constant + self.coefficient * delta, epsilon)
    }

    /// The values of `Δ` that satisfy this inequality.
    ///
    /// A coefficient that is zero (up to `epsilon`) doesn't restrict `Δ`; the inequality then
    /// holds at the optimum already.
    pub fn range(&self, epsilon: f64) -> Range {
        let bound = -self.constant / self.coefficient;
        if is_positive(self.coefficient, epsilon) {
            Range { lower: Some(bound), upper: None }
        } else if is_negative(self.coefficient, epsilon) {
            Range { lower: None, upper: Some(bound) }
        } else {
            Range::unrestricted()
        }
    }
}

impl Display for DeltaInequality {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.coefficient < 0f64 { "-" } else { "+" };
        write!(f, "{} {} {}Δ ≥ 0", self.constant, sign, self.coefficient.abs())
    }
}

/// An interval of `Δ` values, `None` bounds are infinite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Range {
    /// Smallest allowed value, if there is one.
    pub lower: Option<f64>,
    /// Largest allowed value, if there is one.
    pub upper: Option<f64>,
}

impl Range {
    /// The whole real line.
    pub fn unrestricted() -> Self {
        Self { lower: None, upper: None }
    }

    /// The values that are in both ranges.
    pub fn intersection(self, other: Self) -> Self {
        let lower = match (self.lower, other.lower) {
            (Some(left), Some(right)) => Some(left.max(right)),
            (left, right) => left.or(right),
        };
        let upper = match (self.upper, other.upper) {
            (Some(left), Some(right)) => Some(left.min(right)),
            (left, right) => left.or(right),
        };

        Self { lower, upper }
    }

    /// The values that satisfy all inequalities.
    pub fn from_inequalities(inequalities: &[DeltaInequality], epsilon: f64) -> Self {
        inequalities.iter()
            .map(|inequality| inequality.range(epsilon))
            .fold(Self::unrestricted(), Self::intersection)
    }

    /// Whether a value lies in the range.
    pub fn contains(&self, delta: f64, epsilon: f64) -> bool {
        self.lower.map_or(true, |lower| delta >= lower - epsilon)
            && self.upper.map_or(true, |upper| delta <= upper + epsilon)
    }

    /// The range shifted by the current value, giving the range of the model value itself.
    pub fn shifted(self, current: f64) -> Self {
        Self {
            lower: self.lower.map(|lower| current + lower),
            upper: self.upper.map(|upper| current + upper),
        }
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.lower {
            Some(lower) => write!(f, "[{}, ", lower)?,
            None => f.write_str("(-∞, ")?,
        }
        match self.upper {
            Some(upper) => write!(f, "{}]", upper),
            None => f.write_str("∞)"),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::sensitivity::range::{DeltaInequality, Range};

    #[test]
    fn single_inequality() {
        let upper = DeltaInequality::new(2.5f64, -1f64);
        assert_eq!(upper.to_string(), "2.5 - 1Δ ≥ 0");
        assert_eq!(upper.range(1e-9), Range { lower: None, upper: Some(2.5f64) });
        assert!(upper.holds_for(2.5f64, 1e-9));
        assert!(!upper.holds_for(3f64, 1e-9));

        let lower = DeltaInequality::new(4f64, 2f64);
        assert_eq!(lower.to_string(), "4 + 2Δ ≥ 0");
        assert_eq!(lower.range(1e-9), Range { lower: Some(-2f64), upper: None });

        assert_eq!(DeltaInequality::new(1f64, 0f64).range(1e-9), Range::unrestricted());
    }

    #[test]
    fn intersection() {
        let inequalities = [
            DeltaInequality::new(4f64, 1f64),
            DeltaInequality::new(2f64, -1f64),
            DeltaInequality::new(6f64, 1f64),
        ];
        let range = Range::from_inequalities(&inequalities, 1e-9);
        assert_eq!(range, Range { lower: Some(-4f64), upper: Some(2f64) });
        assert_eq!(range.to_string(), "[-4, 2]");
        assert_eq!(range.shifted(4f64), Range { lower: Some(0f64), upper: Some(6f64) });
        assert!(range.contains(0f64, 1e-9));
        assert!(!range.contains(2.5f64, 1e-9));

        assert_eq!(Range::unrestricted().to_string(), "(-∞, ∞)");
    }
}
