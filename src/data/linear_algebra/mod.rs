//! # Linear algebra primitives
//!
//! Dense matrices, as the tableau is stored densely.
pub mod matrix;
