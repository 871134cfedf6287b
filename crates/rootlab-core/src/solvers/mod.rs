//! Root-finding algorithms.
//!
//! This module provides the iterative solvers of the toolkit:
//!
//! - [`bisection`]: Bracket halving, guaranteed to converge on a sign change
//! - [`newton_raphson`]: Quadratic convergence when a derivative is available
//! - [`secant`]: Derivative-free two-point method
//! - [`fixed_point`]: Plain iteration of a self-map `x = g(x)`
//! - [`aitken_fixed_point`]: Fixed-point iteration re-seeded from Aitken Δ² values
//!
//! plus the pure [`AitkenTransform`] sequence accelerator.
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Fixed point | Linear at best | Needs a contraction | Self-map |
//! | Accelerated fixed point | Fast | Needs a contraction | Self-map |
//!
//! Every solver returns a [`SolverResult`] that owns the full
//! [`IterationTrace`]. Callers must inspect [`SolverResult::converged`]: an
//! exhausted iteration budget or a singular derivative is reported on the
//! result rather than as an error.
//!
//! # Example
//!
//! ```rust
//! use rootlab_core::solvers::{newton_raphson, SolverConfig};
//!
//! let f = |x: f64| x * x - 4.0;
//! let df = |x: f64| 2.0 * x;
//!
//! let result = newton_raphson(&f, &df, 3.0, &SolverConfig::default()).unwrap();
//! assert!(result.converged());
//! assert!((result.root() - 2.0).abs() < 1e-6);
//! assert_eq!(result.iterations(), result.trace().len());
//! ```

mod accelerated;
mod aitken;
mod bisection;
mod fixed_point;
mod newton;
mod secant;

pub use accelerated::{aitken_fixed_point, AcceleratedFixedPointSolver, AcceleratedRun};
pub use aitken::{AcceleratedValue, AitkenTransform};
pub use bisection::{bisection, BisectionSolver};
pub use fixed_point::{fixed_point, FixedPointSolver};
pub use newton::{newton_raphson, newton_raphson_numerical, NewtonRaphsonSolver};
pub use secant::{secant, SecantSolver};

use std::fmt;
use std::str::FromStr;

use crate::convergence::ConvergenceCheck;
use crate::error::{RootError, RootResult};
use crate::trace::IterationTrace;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default magnitude below which a derivative is considered singular.
pub const DEFAULT_DERIVATIVE_EPSILON: f64 = 1e-10;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Derivative magnitude below which Newton-Raphson stops.
    pub derivative_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative_epsilon: DEFAULT_DERIVATIVE_EPSILON,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the singular-derivative threshold.
    #[must_use]
    pub fn with_derivative_epsilon(mut self, derivative_epsilon: f64) -> Self {
        self.derivative_epsilon = derivative_epsilon;
        self
    }

    /// Checks that the configuration can drive a solver.
    pub fn validate(&self) -> RootResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(RootError::invalid_config(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(RootError::invalid_config(
                "max_iterations must be at least 1",
            ));
        }
        if !self.derivative_epsilon.is_finite() || self.derivative_epsilon < 0.0 {
            return Err(RootError::invalid_config(format!(
                "derivative_epsilon must be finite and non-negative, got {}",
                self.derivative_epsilon
            )));
        }
        Ok(())
    }

    /// Convergence predicate for this tolerance.
    #[must_use]
    pub fn check(&self) -> ConvergenceCheck {
        ConvergenceCheck::new(self.tolerance)
    }
}

/// Root-finding method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Bracket halving.
    Bisection,
    /// Newton-Raphson.
    Newton,
    /// Secant.
    Secant,
    /// Plain fixed-point iteration.
    FixedPoint,
    /// Fixed-point iteration with fused Aitken Δ² acceleration.
    Aitken,
}

impl Method {
    /// All methods, in display order.
    pub const ALL: [Method; 5] = [
        Method::Bisection,
        Method::Newton,
        Method::Secant,
        Method::FixedPoint,
        Method::Aitken,
    ];

    /// Short identifier accepted by [`Method::from_str`].
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Bisection => "bisection",
            Self::Newton => "newton",
            Self::Secant => "secant",
            Self::FixedPoint => "fixed-point",
            Self::Aitken => "aitken",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bisection => "Bisection",
            Self::Newton => "Newton-Raphson",
            Self::Secant => "Secant",
            Self::FixedPoint => "Fixed point",
            Self::Aitken => "Aitken-accelerated fixed point",
        }
    }

    /// Returns true if the method needs a bracket rather than a starting guess.
    #[must_use]
    pub fn is_bracketing(self) -> bool {
        matches!(self, Self::Bisection)
    }

    /// Returns true if the method iterates a self-map `g`.
    #[must_use]
    pub fn is_fixed_point(self) -> bool {
        matches!(self, Self::FixedPoint | Self::Aitken)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = RootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bisection" | "bisect" => Ok(Self::Bisection),
            "newton" | "newton-raphson" => Ok(Self::Newton),
            "secant" => Ok(Self::Secant),
            "fixed-point" | "fixedpoint" => Ok(Self::FixedPoint),
            "aitken" | "accelerated-fixed-point" => Ok(Self::Aitken),
            _ => Err(RootError::UnknownMethod {
                name: s.to_string(),
            }),
        }
    }
}

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// The error metric fell below the tolerance.
    Converged,
    /// The iteration budget ran out.
    MaxIterations,
    /// The derivative (or secant slope) collapsed at `x`.
    SingularDerivative {
        /// Point at which the derivative vanished.
        x: f64,
        /// The near-zero derivative value.
        derivative: f64,
    },
}

/// Outcome of a root-finding run.
///
/// `iterations()` always equals `trace().len()`, and `final_error()` is `Some`
/// once at least one step ran.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    root: f64,
    converged: bool,
    iterations: usize,
    final_error: Option<f64>,
    method: Method,
    termination: Termination,
    trace: IterationTrace,
}

impl SolverResult {
    pub(crate) fn new(
        method: Method,
        root: f64,
        termination: Termination,
        trace: IterationTrace,
    ) -> Self {
        Self {
            root,
            converged: termination == Termination::Converged,
            iterations: trace.len(),
            final_error: trace.last().map(|step| step.error()),
            method,
            termination,
            trace,
        }
    }

    /// The best root estimate.
    #[must_use]
    pub fn root(&self) -> f64 {
        self.root
    }

    /// Whether the tolerance was met.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Number of completed iterations.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Error metric of the last step.
    #[must_use]
    pub fn final_error(&self) -> Option<f64> {
        self.final_error
    }

    /// The method that produced this result.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Why the solver stopped.
    #[must_use]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// The per-step log.
    #[must_use]
    pub fn trace(&self) -> &IterationTrace {
        &self.trace
    }

    /// Takes ownership of the per-step log.
    #[must_use]
    pub fn into_trace(self) -> IterationTrace {
        self.trace
    }

    /// Turns a non-converged result into the matching error.
    ///
    /// ```rust
    /// use rootlab_core::solvers::{fixed_point, SolverConfig};
    /// use rootlab_core::RootError;
    ///
    /// let g = |x: f64| 2.0 * x + 1.0;
    /// let config = SolverConfig::new(1e-8, 10);
    /// let err = fixed_point(&g, 1.0, &config).unwrap().ensure_converged().unwrap_err();
    /// assert!(matches!(err, RootError::ConvergenceFailed { iterations: 10, .. }));
    /// ```
    pub fn ensure_converged(self) -> RootResult<Self> {
        match self.termination {
            Termination::Converged => Ok(self),
            Termination::MaxIterations => Err(RootError::convergence_failed(
                self.iterations,
                self.final_error.unwrap_or(f64::NAN),
            )),
            Termination::SingularDerivative { x, derivative } => {
                Err(RootError::SingularDerivative { x, derivative })
            }
        }
    }
}
