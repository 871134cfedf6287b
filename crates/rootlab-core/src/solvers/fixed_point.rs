//! Plain fixed-point iteration.

use log::{debug, warn};

use crate::error::{RootError, RootResult};
use crate::evaluator::Evaluator;
use crate::solvers::{Method, SolverConfig, SolverResult, Termination};
use crate::trace::{FixedPointStep, IterationStep, IterationTrace};

/// Step growth factor that triggers a divergence warning.
const DIVERGENCE_WARNING_FACTOR: f64 = 10.0;

/// Solver for `x = g(x)` by direct iteration.
///
/// Converges linearly when `g` is a contraction near the fixed point. There is
/// no divergence safeguard besides `max_iterations`; see
/// [`AcceleratedFixedPointSolver`](super::AcceleratedFixedPointSolver) for the
/// accelerated variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPointSolver {
    config: SolverConfig,
}

impl FixedPointSolver {
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

    /// Iterates `x_{n+1} = g(x_n)` from `x0` until `|x_{n+1} - x_n| < tolerance`.
    pub fn solve<G>(&self, g: &G, x0: f64) -> RootResult<SolverResult>
    where
        G: Evaluator + ?Sized,
    {
        self.config.validate()?;
        if !x0.is_finite() {
            return Err(RootError::invalid_input(format!(
                "initial guess must be finite, got {x0}"
            )));
        }

        let check = self.config.check();
        let mut trace = IterationTrace::with_capacity(self.config.max_iterations.min(64));
        let mut x = x0;
        let mut previous_error = f64::INFINITY;

        for index in 1..=self.config.max_iterations {
            let gx = g.evaluate_checked(x)?;
            let error = (gx - x).abs();

            if error > previous_error * DIVERGENCE_WARNING_FACTOR {
                warn!("fixed point: step grew from {previous_error:e} to {error:e} at iteration {index}, possible divergence");
            }

            trace.push(IterationStep::FixedPoint(FixedPointStep {
                index,
                x,
                gx,
                error,
            }));

            if check.is_converged(error) {
                debug!("fixed point: converged after {index} iterations, x = {gx}");
                return Ok(SolverResult::new(
                    Method::FixedPoint,
                    gx,
                    Termination::Converged,
                    trace,
                ));
            }

            x = gx;
            previous_error = error;
        }

        warn!(
            "fixed point: no convergence in {} iterations, last iterate {x}",
            self.config.max_iterations
        );
        Ok(SolverResult::new(
            Method::FixedPoint,
            x,
            Termination::MaxIterations,
            trace,
        ))
    }
}

/// Fixed-point iteration.
///
/// # Example
///
/// ```rust
/// use rootlab_core::solvers::{fixed_point, SolverConfig};
///
/// let result = fixed_point(&f64::cos, 0.5, &SolverConfig::new(1e-8, 100)).unwrap();
/// assert!((result.root() - 0.739_085_133).abs() < 1e-8);
/// ```
pub fn fixed_point<G>(g: &G, x0: f64, config: &SolverConfig) -> RootResult<SolverResult>
where
    G: Evaluator + ?Sized,
{
    FixedPointSolver::new(*config).solve(g, x0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::FixedPointMap;
    use approx::assert_relative_eq;

    #[test]
    fn test_cosine() {
        let g = |x: f64| x.cos();

        let result = fixed_point(&g, 0.5, &SolverConfig::new(1e-8, 100)).unwrap();

        assert!(result.converged());
        assert_relative_eq!(result.root(), 0.739_085_133_215_160_6, epsilon = 1e-8);
        assert_eq!(result.method(), Method::FixedPoint);
    }

    #[test]
    fn test_trace_chains_iterates() {
        let g = |x: f64| x / 2.0 + 1.0;

        let result = fixed_point(&g, 0.0, &SolverConfig::new(1e-6, 100)).unwrap();

        assert_relative_eq!(result.root(), 2.0, epsilon = 1e-5);
        let steps: Vec<FixedPointStep> = result
            .trace()
            .iter()
            .map(|step| match step {
                IterationStep::FixedPoint(s) => *s,
                other => panic!("unexpected step {other:?}"),
            })
            .collect();
        assert_relative_eq!(steps[0].x, 0.0);
        assert_relative_eq!(steps[0].gx, 1.0);
        for pair in steps.windows(2) {
            assert_relative_eq!(pair[1].x, pair[0].gx);
        }
    }

    #[test]
    fn test_divergence_runs_to_budget() {
        let g = |x: f64| 3.0 * x - 1.0;

        let result = fixed_point(&g, 1.0, &SolverConfig::new(1e-8, 12)).unwrap();

        assert!(!result.converged());
        assert_eq!(result.iterations(), 12);
        assert_eq!(result.termination(), Termination::MaxIterations);
    }

    #[test]
    fn test_overflow_is_an_evaluation_error() {
        let g = |x: f64| x.exp();

        let err = fixed_point(&g, 1.0, &SolverConfig::new(1e-8, 100)).unwrap_err();

        assert!(matches!(err, RootError::FunctionEvaluation { .. }));
    }

    #[test]
    fn test_map_from_function() {
        // Root of f(x) = 2 - x via g(x) = x + 0.5 f(x).
        let f = |x: f64| 2.0 - x;
        let g = FixedPointMap::damped(&f, 0.5);

        let result = fixed_point(&g, 0.0, &SolverConfig::new(1e-10, 100)).unwrap();

        assert!(result.converged());
        assert_relative_eq!(result.root(), 2.0, epsilon = 1e-9);
    }
}
