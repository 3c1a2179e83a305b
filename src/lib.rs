//! # A tableau based linear program solver
//!
//! Linear programs are solved using the Simplex Method as described in the book Combinatorial
//! Optimization by Christos H. Papadimitriou and Kenneth Steiglitz. Integer variables are handled
//! with branch and bound or Gomory's fractional cutting planes, and an optimal tableau can be
//! analyzed for its sensitivity to changes in the data.
//!
//! A `Model` is converted to a `CanonicalForm`, of which the tableau is solved within a
//! `SolverSession` that holds the settings and records the intermediate tableaus.
#![warn(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod algorithm;
pub mod data;
pub mod error;
pub mod settings;

#[cfg(test)]
mod tests;
