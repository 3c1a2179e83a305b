//! # Representing linear programs
//!
//! A linear program is provided by the user as a `Model`, which may contain any type of
//! constraint and sign restriction. The `CanonicalForm` rewrites it into an initial tableau on
//! which the simplex algorithms operate, and remembers how to translate back.
pub mod canonical_form;
pub mod elements;
pub mod model;
pub mod solution;
