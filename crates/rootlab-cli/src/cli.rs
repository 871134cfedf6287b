//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use rootlab_core::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

use crate::commands::{AccelerateArgs, CompareArgs, SolveArgs};

/// Rootlab - Iterative root-finding with full iteration traces
#[derive(Parser)]
#[command(name = "rootlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Convergence tolerance
    #[arg(long, global = true, env = "ROOTLAB_TOLERANCE", default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Iteration budget
    #[arg(long, global = true, env = "ROOTLAB_MAX_ITERATIONS", default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Solver configuration assembled from the global flags.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }

    /// Default log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "rootlab_core=debug,rootlab=debug,warn",
            _ => "trace",
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in functions
    Functions,

    /// Find a root of a built-in function with one method
    Solve(SolveArgs),

    /// Compare plain and Aitken-accelerated fixed-point iteration
    Compare(CompareArgs),

    /// Apply the Aitken transform to a sequence of values
    Accelerate(AccelerateArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
