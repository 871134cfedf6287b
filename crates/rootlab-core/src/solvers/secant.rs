//! Secant root-finding algorithm.

use log::{debug, warn};

use crate::convergence::NEAR_ZERO;
use crate::error::{RootError, RootResult};
use crate::evaluator::Evaluator;
use crate::solvers::{Method, SolverConfig, SolverResult, Termination};
use crate::trace::{IterationStep, IterationTrace, SecantStep};

/// Minimum separation of the two starting points.
const MIN_START_SEPARATION: f64 = 1e-12;

/// Derivative-free two-point solver.
///
/// Similar to Newton-Raphson but approximates the derivative using
/// finite differences from the previous iteration. Convergence rate is
/// superlinear (order ~1.618, the golden ratio).
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantSolver {
    config: SolverConfig,
}

impl SecantSolver {
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

    /// Iterates from the two distinct starting points `x0` and `x1`.
    ///
    /// Converges when the step or `|f(x_next)|` drops below the tolerance. A
    /// flat secant line stops the run with [`Termination::SingularDerivative`].
    pub fn solve<E>(&self, f: &E, x0: f64, x1: f64) -> RootResult<SolverResult>
    where
        E: Evaluator + ?Sized,
    {
        self.config.validate()?;
        if !x0.is_finite() || !x1.is_finite() {
            return Err(RootError::invalid_input(format!(
                "starting points must be finite, got {x0} and {x1}"
            )));
        }
        if (x1 - x0).abs() < MIN_START_SEPARATION {
            return Err(RootError::invalid_input(
                "secant starting points must be distinct",
            ));
        }

        let check = self.config.check();
        let mut trace = IterationTrace::with_capacity(self.config.max_iterations.min(32));

        let mut x_prev = x0;
        let mut x_curr = x1;
        let mut f_prev = f.evaluate_checked(x_prev)?;
        let mut f_curr = f.evaluate_checked(x_curr)?;

        for index in 1..=self.config.max_iterations {
            // Check for very small denominator (parallel secant line)
            let denom = f_curr - f_prev;
            if denom.abs() < NEAR_ZERO {
                let slope = denom / (x_curr - x_prev);
                warn!("secant: flat secant line at x = {x_curr}, stopping");
                return Ok(SolverResult::new(
                    Method::Secant,
                    x_curr,
                    Termination::SingularDerivative {
                        x: x_curr,
                        derivative: slope,
                    },
                    trace,
                ));
            }

            let x_next = x_curr - f_curr * (x_curr - x_prev) / denom;
            if !x_next.is_finite() {
                return Err(RootError::evaluation(
                    x_curr,
                    format!("secant step produced non-finite iterate {x_next}"),
                ));
            }

            let error = (x_next - x_curr).abs();
            trace.push(IterationStep::Secant(SecantStep {
                index,
                x_prev,
                x_curr,
                f_prev,
                f_curr,
                x_next,
                error,
            }));

            let f_next = f.evaluate_checked(x_next)?;
            if check.is_converged(error) || check.is_converged(f_next.abs()) {
                debug!("secant: converged after {index} iterations, root = {x_next}");
                return Ok(SolverResult::new(
                    Method::Secant,
                    x_next,
                    Termination::Converged,
                    trace,
                ));
            }

            x_prev = x_curr;
            f_prev = f_curr;
            x_curr = x_next;
            f_curr = f_next;
        }

        warn!(
            "secant: no convergence in {} iterations, last iterate {x_curr}",
            self.config.max_iterations
        );
        Ok(SolverResult::new(
            Method::Secant,
            x_curr,
            Termination::MaxIterations,
            trace,
        ))
    }
}

/// Secant root-finding algorithm.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (must differ from x0)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use rootlab_core::solvers::{secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(&f, 1.0, 2.0, &SolverConfig::new(1e-12, 50)).unwrap();
/// assert!((result.root() - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<E>(f: &E, x0: f64, x1: f64, config: &SolverConfig) -> RootResult<SolverResult>
where
    E: Evaluator + ?Sized,
{
    SecantSolver::new(*config).solve(f, x0, x1)
}
