//! Rootlab CLI - Command-line interface for iterative root-finding.
//!
//! # Usage
//!
//! ```bash
//! # List the built-in functions
//! rootlab functions
//!
//! # Newton-Raphson on cos(x) - x
//! rootlab solve cosine --method newton --x0 0.5
//!
//! # Bisection with an explicit bracket
//! rootlab solve quadratic --method bisection --a 1 --b 3
//!
//! # Plain vs accelerated fixed point
//! rootlab compare cosine --tolerance 1e-8
//!
//! # Aitken transform of a sequence
//! rootlab accelerate 1 1.5 1.75 1.875
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the verbosity flag
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    let config = cli.solver_config();

    // Execute command
    match cli.command {
        Commands::Functions => commands::functions::execute(format)?,
        Commands::Solve(args) => commands::solve::execute(args, config, format, cli.quiet)?,
        Commands::Compare(args) => commands::compare::execute(args, config, format)?,
        Commands::Accelerate(args) => commands::accelerate::execute(args, format, cli.quiet)?,
    }

    Ok(())
}
