//! Bisection root-finding algorithm.

use log::{debug, warn};

use crate::error::{RootError, RootResult};
use crate::evaluator::Evaluator;
use crate::solvers::{Method, SolverConfig, SolverResult, Termination};
use crate::trace::{BisectionStep, IterationStep, IterationTrace};

/// Bracket-halving solver.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
/// After `k` steps the midpoint is within `(b - a) / 2^k` of a root.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver {
    config: SolverConfig,
}

impl BisectionSolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds a root of `f` inside `[a, b]`.
    ///
    /// Requires `f(a) * f(b) < 0`; a bracket without a strict sign change
    /// fails with [`RootError::InvalidBracket`] before any step is taken.
    /// The endpoints may be given in either order.
    pub fn solve<E>(&self, f: &E, a: f64, b: f64) -> RootResult<SolverResult>
    where
        E: Evaluator + ?Sized,
    {
        self.config.validate()?;
        if !a.is_finite() || !b.is_finite() {
            return Err(RootError::invalid_input(format!(
                "bracket endpoints must be finite, got [{a}, {b}]"
            )));
        }

        let mut lo = a.min(b);
        let mut hi = a.max(b);

        let mut f_lo = f.evaluate_checked(lo)?;
        let f_hi = f.evaluate_checked(hi)?;

        // Check that root is bracketed
        if !opposite_signs(f_lo, f_hi) {
            return Err(RootError::InvalidBracket {
                a: lo,
                b: hi,
                fa: f_lo,
                fb: f_hi,
            });
        }

        let check = self.config.check();
        let mut trace = IterationTrace::with_capacity(self.config.max_iterations.min(64));
        let mut c = (lo + hi) / 2.0;

        for index in 1..=self.config.max_iterations {
            let fc = f.evaluate_checked(c)?;
            trace.push(IterationStep::Bisection(BisectionStep {
                index,
                a: lo,
                b: hi,
                c,
                fc,
            }));

            if check.is_converged(fc.abs()) {
                debug!("bisection: |f(c)| below tolerance after {index} iterations, c = {c}");
                return Ok(SolverResult::new(
                    Method::Bisection,
                    c,
                    Termination::Converged,
                    trace,
                ));
            }

            // Update bracket
            if opposite_signs(f_lo, fc) {
                hi = c;
            } else {
                lo = c;
                f_lo = fc;
            }
            c = (lo + hi) / 2.0;

            if check.is_converged((hi - lo).abs()) {
                debug!("bisection: bracket width below tolerance after {index} iterations, c = {c}");
                return Ok(SolverResult::new(
                    Method::Bisection,
                    c,
                    Termination::Converged,
                    trace,
                ));
            }
        }

        warn!(
            "bisection: no convergence in {} iterations, bracket [{lo}, {hi}]",
            self.config.max_iterations
        );
        Ok(SolverResult::new(
            Method::Bisection,
            c,
            Termination::MaxIterations,
            trace,
        ))
    }
}

/// Strict sign change; a zero on either side does not count.
fn opposite_signs(x: f64, y: f64) -> bool {
    (x < 0.0 && y > 0.0) || (x > 0.0 && y < 0.0)
}

/// Bisection root-finding algorithm.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use rootlab_core::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-10, 100)).unwrap();
/// assert!(result.converged());
/// assert!((result.root() - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<E>(f: &E, a: f64, b: f64, config: &SolverConfig) -> RootResult<SolverResult>
where
    E: Evaluator + ?Sized,
{
    BisectionSolver::new(*config).solve(f, a, b)
}
