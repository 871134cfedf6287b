//! Newton-Raphson root-finding algorithm.

use log::{debug, warn};

use crate::error::{RootError, RootResult};
use crate::evaluator::{Evaluator, NumericDerivative};
use crate::solvers::{Method, SolverConfig, SolverResult, Termination};
use crate::trace::{IterationStep, IterationTrace, NewtonStep};

/// Derivative-based local solver.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and stops when
/// `|x_{n+1} - x_n|` drops below the tolerance. Convergence is quadratic near
/// a simple root but not guaranteed from an arbitrary start.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonRaphsonSolver {
    config: SolverConfig,
}

impl NewtonRaphsonSolver {
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

    /// Iterates from `x0` using the derivative `df`.
    ///
    /// When `|f'(x_n)|` falls below `derivative_epsilon` the loop stops and the
    /// result carries [`Termination::SingularDerivative`] with the current
    /// estimate as root.
    pub fn solve<F, D>(&self, f: &F, df: &D, x0: f64) -> RootResult<SolverResult>
    where
        F: Evaluator + ?Sized,
        D: Evaluator + ?Sized,
    {
        self.config.validate()?;
        if !x0.is_finite() {
            return Err(RootError::invalid_input(format!(
                "initial guess must be finite, got {x0}"
            )));
        }

        let check = self.config.check();
        let mut trace = IterationTrace::with_capacity(self.config.max_iterations.min(32));
        let mut x = x0;

        for index in 1..=self.config.max_iterations {
            let fx = f.evaluate_checked(x)?;
            let dfx = df.evaluate_checked(x)?;

            // Check for zero derivative
            if dfx.abs() < self.config.derivative_epsilon {
                warn!("newton: derivative {dfx:e} below epsilon at x = {x}, stopping");
                return Ok(SolverResult::new(
                    Method::Newton,
                    x,
                    Termination::SingularDerivative { x, derivative: dfx },
                    trace,
                ));
            }

            let x_next = x - fx / dfx;
            if !x_next.is_finite() {
                return Err(RootError::evaluation(
                    x,
                    format!("Newton step produced non-finite iterate {x_next}"),
                ));
            }

            let error = (x_next - x).abs();
            trace.push(IterationStep::Newton(NewtonStep {
                index,
                x,
                fx,
                dfx,
                x_next,
                error,
            }));

            if check.is_converged(error) {
                debug!("newton: converged after {index} iterations, root = {x_next}");
                return Ok(SolverResult::new(
                    Method::Newton,
                    x_next,
                    Termination::Converged,
                    trace,
                ));
            }

            x = x_next;
        }

        warn!(
            "newton: no convergence in {} iterations, last iterate {x}",
            self.config.max_iterations
        );
        Ok(SolverResult::new(
            Method::Newton,
            x,
            Termination::MaxIterations,
            trace,
        ))
    }

    /// Iterates from `x0` with a central-difference derivative of `f`.
    pub fn solve_numerical<F>(&self, f: &F, x0: f64) -> RootResult<SolverResult>
    where
        F: Evaluator + ?Sized,
    {
        let df = NumericDerivative::new(f);
        self.solve(f, &df, x0)
    }
}

/// Newton-Raphson root-finding algorithm.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use rootlab_core::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(&f, &df, 1.5, &SolverConfig::new(1e-12, 50)).unwrap();
/// assert!((result.root() - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, D>(
    f: &F,
    df: &D,
    initial_guess: f64,
    config: &SolverConfig,
) -> RootResult<SolverResult>
where
    F: Evaluator + ?Sized,
    D: Evaluator + ?Sized,
{
    NewtonRaphsonSolver::new(*config).solve(f, df, initial_guess)
}

/// Newton-Raphson with numerical derivative estimation.
///
/// Uses central differences to estimate the derivative when
/// an analytical derivative is not available.
pub fn newton_raphson_numerical<F>(
    f: &F,
    initial_guess: f64,
    config: &SolverConfig,
) -> RootResult<SolverResult>
where
    F: Evaluator + ?Sized,
{
    NewtonRaphsonSolver::new(*config).solve_numerical(f, initial_guess)
}
