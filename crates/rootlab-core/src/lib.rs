//! # Rootlab Core
//!
//! Iterative root-finding for scalar functions, with a full per-step trace of
//! every run.
//!
//! This crate provides:
//!
//! - **Solvers**: Bisection, Newton-Raphson, secant and fixed-point iteration
//! - **Acceleration**: The Aitken Δ² transform and a fixed-point solver
//!   re-seeded from it
//! - **Traces**: Typed per-iteration records for tables and error analysis
//! - **Facade**: [`RootFinder`](finder::RootFinder), one entry point for every
//!   method
//!
//! ## Design Philosophy
//!
//! - **Explicit outcomes**: Non-convergence is data on the result, bad input
//!   is an error
//! - **Numerical Stability**: Guarded denominators and finiteness checks on
//!   every evaluation
//! - **Generic**: Any `Fn(f64) -> f64` is a function; fallible functions
//!   implement [`Evaluator`](evaluator::Evaluator)
//!
//! ## Example
//!
//! ```rust
//! use rootlab_core::prelude::*;
//!
//! let f = |x: f64| x * x - 4.0;
//! let result = bisection(&f, 1.0, 3.0, &SolverConfig::default()).unwrap();
//!
//! assert!(result.converged());
//! assert!((result.root() - 2.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::single_match_else)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::derivable_impls)]

pub mod convergence;
pub mod error;
pub mod evaluator;
pub mod finder;
pub mod solvers;
pub mod trace;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::convergence::ConvergenceCheck;
    pub use crate::error::{RootError, RootResult};
    pub use crate::evaluator::{
        EvaluationError, Evaluator, Fallible, FixedPointMap, NumericDerivative,
    };
    pub use crate::finder::{RootFinder, Start};
    pub use crate::solvers::{
        aitken_fixed_point, bisection, fixed_point, newton_raphson, newton_raphson_numerical,
        secant, AcceleratedFixedPointSolver, AitkenTransform, BisectionSolver, FixedPointSolver,
        Method, NewtonRaphsonSolver, SecantSolver, SolverConfig, SolverResult, Termination,
    };
    pub use crate::trace::{AccelerationTag, IterationStep, IterationTrace, Sequence};
}

pub use error::{RootError, RootResult};
