//! Helper methods for the accuracy of floating point calculations.
use num_traits::Float;

/// Whether a value is zero, up to `epsilon`.
pub fn is_zero<F: Float>(value: F, epsilon: F) -> bool {
    value.abs() <= epsilon
}

/// Whether a value is smaller than zero by more than `epsilon`.
pub fn is_negative<F: Float>(value: F, epsilon: F) -> bool {
    value < -epsilon
}

/// Whether a value is larger than zero by more than `epsilon`.
pub fn is_positive<F: Float>(value: F, epsilon: F) -> bool {
    value > epsilon
}

/// Whether a value is an integer, up to `epsilon`.
pub fn is_integral<F: Float>(value: F, epsilon: F) -> bool {
    debug_assert!(epsilon >= F::zero());

    (value - value.round()).abs() <= epsilon
}

/// Fractional part `value - floor(value)` in `[0, 1)`.
///
/// Values within `epsilon` of an integer have fractional part zero, so that a value like
/// `2.9999999997` doesn't produce a fraction that is almost one.
pub fn fractional_part<F: Float>(value: F, epsilon: F) -> F {
    if is_integral(value, epsilon) {
        F::zero()
    } else {
        value - value.floor()
    }
}

/// Replace values close to an integer by that integer.
///
/// Used on reported solution values only, never on the tableau itself.
pub fn snap_to_integer<F: Float>(value: F, epsilon: F) -> F {
    if is_integral(value, epsilon) {
        value.round()
    } else {
        value
    }
}
