//! CLI error types.

use thiserror::Error;

use rootlab_core::solvers::Method;
use rootlab_core::RootError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Name not present in the function catalogue.
    #[error("Unknown function: {0}. Run `rootlab functions` for the list.")]
    UnknownFunction(String),

    /// Missing required argument.
    #[error("Missing required argument for {method}: {argument}")]
    MissingArgument {
        /// The selected method.
        method: Method,
        /// The flag that was expected.
        argument: &'static str,
    },

    /// Solver error.
    #[error(transparent)]
    Solver(#[from] RootError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
