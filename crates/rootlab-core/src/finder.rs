//! Method-agnostic entry point.
//!
//! [`RootFinder`] holds one [`SolverConfig`] and dispatches a problem to the
//! solver selected by [`Method`]. Whatever the method, the caller gets back the
//! same [`SolverResult`] shape or a [`RootError`].

use log::debug;

use crate::error::{RootError, RootResult};
use crate::evaluator::{Evaluator, FixedPointMap};
use crate::solvers::{
    AcceleratedFixedPointSolver, BisectionSolver, FixedPointSolver, Method, NewtonRaphsonSolver,
    SecantSolver, SolverConfig, SolverResult,
};

/// Half-distance between the two secant starting points derived from a
/// single guess.
pub const SECANT_GUESS_OFFSET: f64 = 0.1;

/// Where a solver starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Start {
    /// An interval: the bracket for bisection, the two starting points for
    /// the secant method.
    Interval(f64, f64),
    /// A single starting guess.
    Guess(f64),
}

/// Facade dispatching to the individual solvers.
///
/// The meaning of the optional `auxiliary` capability depends on the method:
///
/// | Method | `function` | `auxiliary` | `start` |
/// |--------|------------|-------------|---------|
/// | Bisection | `f` | unused | `Interval` |
/// | Newton | `f` | `f'`, numeric derivative if absent | `Guess` |
/// | Secant | `f` | unused | `Interval` or `Guess` (± 0.1) |
/// | FixedPoint, Aitken | `f` | map `g`, `g(x) = x + f(x)` if absent | `Guess` |
///
/// ```rust
/// use rootlab_core::finder::{RootFinder, Start};
/// use rootlab_core::solvers::{Method, SolverConfig};
///
/// let finder = RootFinder::new(SolverConfig::new(1e-8, 100));
/// let f = |x: f64| x.cos() - x;
/// let g = |x: f64| x.cos();
///
/// let result = finder
///     .solve(Method::Aitken, &f, Some(&g), Start::Guess(0.5))
///     .unwrap();
/// assert!(result.converged());
/// assert!((result.root() - 0.739_085_13).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RootFinder {
    config: SolverConfig,
}

impl RootFinder {
    /// Creates a facade with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration shared by every dispatched solver.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves with the method named by `name` (see [`Method::from_str`](std::str::FromStr)).
    pub fn solve_named(
        &self,
        name: &str,
        function: &dyn Evaluator,
        auxiliary: Option<&dyn Evaluator>,
        start: Start,
    ) -> RootResult<SolverResult> {
        let method: Method = name.parse()?;
        self.solve(method, function, auxiliary, start)
    }

    /// Solves with the given method.
    pub fn solve(
        &self,
        method: Method,
        function: &dyn Evaluator,
        auxiliary: Option<&dyn Evaluator>,
        start: Start,
    ) -> RootResult<SolverResult> {
        debug!("dispatching {} from {start:?}", method.name());
        match method {
            Method::Bisection => {
                let Start::Interval(a, b) = start else {
                    return Err(mismatch(method, "an interval"));
                };
                BisectionSolver::new(self.config).solve(function, a, b)
            }
            Method::Newton => {
                let Start::Guess(x0) = start else {
                    return Err(mismatch(method, "a starting guess"));
                };
                let solver = NewtonRaphsonSolver::new(self.config);
                match auxiliary {
                    Some(derivative) => solver.solve(function, derivative, x0),
                    None => solver.solve_numerical(function, x0),
                }
            }
            Method::Secant => {
                let (x0, x1) = match start {
                    Start::Interval(x0, x1) => (x0, x1),
                    Start::Guess(x) => (x - SECANT_GUESS_OFFSET, x + SECANT_GUESS_OFFSET),
                };
                SecantSolver::new(self.config).solve(function, x0, x1)
            }
            Method::FixedPoint | Method::Aitken => {
                let Start::Guess(x0) = start else {
                    return Err(mismatch(method, "a starting guess"));
                };
                let derived;
                let map: &dyn Evaluator = match auxiliary {
                    Some(map) => map,
                    None => {
                        derived = FixedPointMap::simple(function);
                        &derived
                    }
                };
                if method == Method::Aitken {
                    AcceleratedFixedPointSolver::new(self.config).solve(map, x0)
                } else {
                    FixedPointSolver::new(self.config).solve(map, x0)
                }
            }
        }
    }
}

fn mismatch(method: Method, expected: &str) -> RootError {
    RootError::invalid_input(format!("{} requires {expected}", method.name()))
}
