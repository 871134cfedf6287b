//! Function capabilities consumed by the solvers.
//!
//! The solvers never see formulas or callables of a particular shape; they see
//! an [`Evaluator`], a single `evaluate(x)` operation that may fail. Plain
//! closures and function pointers `Fn(f64) -> f64` are evaluators out of the
//! box. Closures that can fail are wrapped in [`Fallible`].
//!
//! ```rust
//! use rootlab_core::evaluator::{EvaluationError, Evaluator, Fallible};
//!
//! let square = |x: f64| x * x;
//! assert_eq!(square.evaluate(3.0).unwrap(), 9.0);
//!
//! let sqrt = Fallible(|x: f64| {
//!     if x < 0.0 {
//!         Err(EvaluationError::new("square root of a negative number"))
//!     } else {
//!         Ok(x.sqrt())
//!     }
//! });
//! assert!(sqrt.evaluate(-1.0).is_err());
//! ```

use thiserror::Error;

use crate::error::{RootError, RootResult};

/// Default step for central-difference derivatives.
pub const DEFAULT_DERIVATIVE_STEP: f64 = 1e-8;

/// Default relaxation factor for [`FixedPointMap::damped`].
pub const DEFAULT_DAMPING: f64 = 0.1;

/// Failure reported by an injected function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct EvaluationError {
    reason: String,
}

impl EvaluationError {
    /// Creates an evaluation error with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the reason given by the function.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A real function of one real variable.
pub trait Evaluator {
    /// Evaluates the function at `x`.
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError>;

    /// Evaluates the function at `x`, rejecting failures and non-finite values.
    ///
    /// Solvers call this for every evaluation so that a NaN or an infinity
    /// never reaches the arithmetic of the next step.
    fn evaluate_checked(&self, x: f64) -> RootResult<f64> {
        match self.evaluate(x) {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(value) => Err(RootError::evaluation(
                x,
                format!("function returned non-finite value {value}"),
            )),
            Err(err) => Err(RootError::evaluation(x, err.reason)),
        }
    }
}

impl<F> Evaluator for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        Ok(self(x))
    }
}

/// Adapter for closures that report their own domain errors.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F> Evaluator for Fallible<F>
where
    F: Fn(f64) -> Result<f64, EvaluationError>,
{
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        (self.0)(x)
    }
}

/// Central-difference derivative of another evaluator.
///
/// `f'(x) ≈ (f(x + h) - f(x - h)) / 2h`
#[derive(Debug)]
pub struct NumericDerivative<'a, E: ?Sized> {
    function: &'a E,
    step: f64,
}

impl<'a, E: Evaluator + ?Sized> NumericDerivative<'a, E> {
    /// Creates a numeric derivative with the default step.
    #[must_use]
    pub fn new(function: &'a E) -> Self {
        Self::with_step(function, DEFAULT_DERIVATIVE_STEP)
    }

    /// Creates a numeric derivative with a custom step.
    #[must_use]
    pub fn with_step(function: &'a E, step: f64) -> Self {
        Self { function, step }
    }

    /// Returns the difference step.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl<E: Evaluator + ?Sized> Evaluator for NumericDerivative<'_, E> {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        let h = self.step;
        let forward = self.function.evaluate(x + h)?;
        let backward = self.function.evaluate(x - h)?;
        Ok((forward - backward) / (2.0 * h))
    }
}

/// Rewrites `f(x) = 0` as the fixed-point problem `x = x + α·f(x)`.
#[derive(Debug)]
pub struct FixedPointMap<'a, E: ?Sized> {
    function: &'a E,
    alpha: f64,
}

impl<'a, E: Evaluator + ?Sized> FixedPointMap<'a, E> {
    /// `g(x) = x + f(x)`.
    #[must_use]
    pub fn simple(function: &'a E) -> Self {
        Self {
            function,
            alpha: 1.0,
        }
    }

    /// `g(x) = x + α·f(x)`.
    #[must_use]
    pub fn damped(function: &'a E, alpha: f64) -> Self {
        Self { function, alpha }
    }

    /// Returns the relaxation factor.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl<E: Evaluator + ?Sized> Evaluator for FixedPointMap<'_, E> {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        Ok(x + self.alpha * self.function.evaluate(x)?)
    }
}
