//! Error types for root-finding operations.

use thiserror::Error;

/// A specialized Result type for root-finding operations.
pub type RootResult<T> = Result<T, RootError>;

/// Errors that can occur while locating a root.
///
/// Only [`RootError::InvalidBracket`], [`RootError::FunctionEvaluation`] and the
/// input/configuration variants abort a solve. A singular derivative and an
/// exhausted iteration budget are reported on the returned
/// [`SolverResult`](crate::solvers::SolverResult) and only become errors through
/// [`SolverResult::ensure_converged`](crate::solvers::SolverResult::ensure_converged).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootError {
    /// The bracket endpoints do not straddle a sign change.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} do not change sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// The derivative magnitude fell below the configured epsilon.
    #[error("Singular derivative at x = {x}: f'(x) = {derivative:.2e}")]
    SingularDerivative {
        /// Point at which the derivative vanished.
        x: f64,
        /// The near-zero derivative value.
        derivative: f64,
    },

    /// The iteration budget ran out before the tolerance was met.
    #[error("Convergence failed after {iterations} iterations (error: {error:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: usize,
        /// Error metric of the last step.
        error: f64,
    },

    /// The injected function failed or produced a non-finite value.
    #[error("Function evaluation failed at x = {x}: {reason}")]
    FunctionEvaluation {
        /// The argument that triggered the failure.
        x: f64,
        /// Description of the failure.
        reason: String,
    },

    /// Solver configuration is unusable.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// No solver is registered under the requested name.
    #[error("Unknown method: {name}")]
    UnknownMethod {
        /// The name that failed to resolve.
        name: String,
    },
}

impl RootError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: usize, error: f64) -> Self {
        Self::ConvergenceFailed { iterations, error }
    }

    /// Creates a function evaluation error.
    #[must_use]
    pub fn evaluation(x: f64, reason: impl Into<String>) -> Self {
        Self::FunctionEvaluation {
            x,
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true if the error aborted the solve before any result existed.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::SingularDerivative { .. } | Self::ConvergenceFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RootError::convergence_failed(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));

        let err = RootError::evaluation(-1.0, "sqrt of negative");
        assert!(err.to_string().contains("x = -1"));
        assert!(err.to_string().contains("sqrt of negative"));
    }

    #[test]
    fn test_fatality() {
        assert!(!RootError::convergence_failed(10, 0.5).is_fatal());
        assert!(!RootError::SingularDerivative {
            x: 0.0,
            derivative: 0.0
        }
        .is_fatal());
        assert!(RootError::invalid_input("bad start").is_fatal());
    }
}
