//! # Floating point numbers
//!
//! Correctness guarantees are impossible to give due to (accumulating) rounding errors, so every
//! comparison against zero or against an integer goes through a tolerance.
pub mod numerical_precision;
