//! CLI command implementations.

pub mod accelerate;
pub mod catalogue;
pub mod compare;
pub mod functions;
pub mod solve;

// Re-export submodules for convenience
pub use accelerate::AccelerateArgs;
pub use compare::CompareArgs;
pub use solve::SolveArgs;

use rootlab_core::convergence::convergence_order;
use rootlab_core::solvers::{Method, SolverResult, Termination};
use rootlab_core::RootError;

/// Parses a method name for clap.
pub fn parse_method(s: &str) -> Result<Method, String> {
    s.parse().map_err(|e: RootError| e.to_string())
}

/// Describes why a run stopped.
pub fn describe_termination(termination: Termination) -> String {
    match termination {
        Termination::Converged => "converged".to_string(),
        Termination::MaxIterations => "iteration budget exhausted".to_string(),
        Termination::SingularDerivative { x, derivative } => {
            format!("singular derivative f'({x}) = {derivative:e}")
        }
    }
}

/// Empirical convergence order from the distances of each estimate to the
/// final root.
pub fn estimated_order(result: &SolverResult) -> Option<f64> {
    let estimates = result.trace().estimates();
    let (_, earlier) = estimates.split_last()?;
    let distances: Vec<f64> = earlier
        .iter()
        .map(|x| (x - result.root()).abs())
        .collect();
    convergence_order(&distances)
}
