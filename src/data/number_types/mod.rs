//! # Number types
//!
//! The engine computes with `f64`. This module collects the helpers that decide, up to a
//! tolerance, what counts as zero, as negative and as integral.
pub mod float;
