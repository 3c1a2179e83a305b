//! # Utilities
//!
//! Helper functions for algorithms.

/// Find the first index with a minimal value.
///
/// A later value only replaces the current minimum if it is smaller by more than `epsilon`, such
/// that (near) ties are always broken in favor of the lowest index.
///
/// # Arguments
///
/// * `candidates`: (index, value) tuples, in the order in which they should be preferred.
/// * `epsilon`: Values that differ less than this are considered equal.
///
/// # Return value
///
/// The index and value of the minimum, or `None` if there were no candidates.
pub(crate) fn first_minimum<I>(candidates: I, epsilon: f64) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    candidates.into_iter().fold(None, |minimum, (index, value)| match minimum {
        Some((_, minimum_value)) if value >= minimum_value - epsilon => minimum,
        _ => Some((index, value)),
    })
}
