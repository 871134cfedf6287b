//! Fixed-point iteration with fused Aitken Δ² acceleration.
//!
//! Applying [`AitkenTransform`] to a finished fixed-point sequence improves the
//! estimate but saves no evaluations of `g`. The solver here re-seeds the
//! iteration from every accelerated value instead, so each pair of fresh
//! `g`-evaluations is followed by a Δ² extrapolation of the current run
//! `[seed, g(seed), g(g(seed))]`.
//!
//! # Error policy
//!
//! The convergence metric deliberately mixes two conventions, matching the
//! behaviour the toolkit has always shown in its iteration tables:
//!
//! - first accelerated value: absolute error `|x_acc - x_current|`
//! - later values: percentage change against the *previous accelerated value*,
//!   `|(x_acc - x_acc_prev) / x_acc_prev| * 100`, or the absolute difference
//!   when `|x_acc_prev| <= 1e-14`
//!
//! The tolerance is compared against whichever figure applies.

use log::{debug, warn};

use crate::convergence::{percent_error, NEAR_ZERO};
use crate::error::{RootError, RootResult};
use crate::evaluator::Evaluator;
use crate::solvers::{AitkenTransform, Method, SolverConfig, SolverResult, Termination};
use crate::trace::{AccelerationTag, AitkenStep, IterationStep, IterationTrace, Sequence};

/// Fixed-point solver re-seeded from Aitken Δ² extrapolations.
///
/// # Example
///
/// ```rust
/// use rootlab_core::solvers::{aitken_fixed_point, fixed_point, SolverConfig};
///
/// let config = SolverConfig::new(1e-8, 100);
/// let plain = fixed_point(&f64::cos, 0.5, &config).unwrap();
/// let fast = aitken_fixed_point(&f64::cos, 0.5, &config).unwrap();
///
/// assert!(fast.converged());
/// assert!(fast.iterations() < plain.iterations());
/// assert!((fast.root() - plain.root()).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceleratedFixedPointSolver {
    config: SolverConfig,
}

/// A solve together with every value the accelerated solver produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceleratedRun {
    /// The normalised result.
    pub result: SolverResult,
    /// `x0` followed by every `g`-evaluation, in order.
    pub raw: Sequence,
    /// Every accelerated value, in order.
    pub accelerated: Sequence,
}

impl AcceleratedFixedPointSolver {
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

    /// Solves `x = g(x)` from `x0`.
    pub fn solve<G>(&self, g: &G, x0: f64) -> RootResult<SolverResult>
    where
        G: Evaluator + ?Sized,
    {
        self.solve_with_history(g, x0).map(|run| run.result)
    }

    /// Solves `x = g(x)` from `x0`, also returning the raw and accelerated
    /// histories.
    pub fn solve_with_history<G>(&self, g: &G, x0: f64) -> RootResult<AcceleratedRun>
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
        let mut trace = IterationTrace::with_capacity(self.config.max_iterations.min(32));
        let mut raw = Sequence::new();
        let mut accelerated = Sequence::new();
        raw.push(x0);

        // Values of the current run: the seed and its g-iterates.
        let mut run: Vec<f64> = Vec::with_capacity(3);
        run.push(x0);
        let mut x_current = x0;

        for index in 1..=self.config.max_iterations {
            let x_new = g.evaluate_checked(x_current)?;
            raw.push(x_new);
            run.push(x_new);

            if run.len() < 3 {
                trace.push(IterationStep::Aitken(AitkenStep {
                    index,
                    x_prev: x_current,
                    gx_prev: x_new,
                    window: None,
                    x_accelerated: None,
                    abs_error: None,
                    rel_error: None,
                    method_used: AccelerationTag::Fallback,
                    error: (x_new - x_current).abs(),
                }));
                x_current = x_new;
                continue;
            }

            let window = [run[0], run[1], run[2]];
            let acc = AitkenTransform::window(window[0], window[1], window[2]);
            if acc.tag == AccelerationTag::Fallback {
                debug!("aitken: denominator collapse at iteration {index}, using raw iterate");
            }

            let abs_error = (acc.value - x_current).abs();
            let (error, rel_error) = match accelerated.as_slice().last() {
                None => (abs_error, None),
                Some(&previous) if previous.abs() > NEAR_ZERO => {
                    let rel = percent_error(previous, acc.value);
                    (rel, Some(rel))
                }
                Some(&previous) => ((acc.value - previous).abs(), None),
            };
            accelerated.push(acc.value);

            trace.push(IterationStep::Aitken(AitkenStep {
                index,
                x_prev: x_current,
                gx_prev: x_new,
                window: Some(window),
                x_accelerated: Some(acc.value),
                abs_error: Some(abs_error),
                rel_error,
                method_used: acc.tag,
                error,
            }));

            if check.is_converged(error) {
                debug!(
                    "aitken: converged after {index} iterations ({} accelerations), root = {}",
                    accelerated.len(),
                    acc.value
                );
                return Ok(AcceleratedRun {
                    result: SolverResult::new(
                        Method::Aitken,
                        acc.value,
                        Termination::Converged,
                        trace,
                    ),
                    raw,
                    accelerated,
                });
            }

            // Re-seed from the accelerated value.
            x_current = acc.value;
            run.clear();
            run.push(x_current);
        }

        warn!(
            "aitken: no convergence in {} iterations, last estimate {x_current}",
            self.config.max_iterations
        );
        Ok(AcceleratedRun {
            result: SolverResult::new(
                Method::Aitken,
                x_current,
                Termination::MaxIterations,
                trace,
            ),
            raw,
            accelerated,
        })
    }
}

/// Fixed-point iteration with fused Aitken acceleration.
pub fn aitken_fixed_point<G>(g: &G, x0: f64, config: &SolverConfig) -> RootResult<SolverResult>
where
    G: Evaluator + ?Sized,
{
    AcceleratedFixedPointSolver::new(*config).solve(g, x0)
}
