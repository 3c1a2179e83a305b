//! # Problems shared by the tests of several modules.
//!
//! Convention for function names:
//!
//! * `fn model()`
//! * `fn integer_model()` and `fn model_with_integer_variables()`, the same data with integer
//! variables
//! * `fn initial_tableau()`, the tableau of the canonical form
//! * `fn optimal_tableau()`
//!
//! Each problem also has a `conversion_pipeline` test going from the model to the solution.
pub mod problem_2;
pub mod problem_5;
