//! Accelerate command implementation.
//!
//! Applies the Aitken Δ² transform to a user-supplied sequence.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rootlab_core::solvers::AitkenTransform;

use crate::cli::OutputFormat;
use crate::output::{format_value, print_header, print_output, print_warning};

/// Arguments for the accelerate command.
#[derive(Args, Debug)]
pub struct AccelerateArgs {
    /// Sequence values in order
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

/// One accelerated window.
#[derive(Debug, Serialize, Tabled)]
pub struct AcceleratedRow {
    #[tabled(rename = "n")]
    pub n: usize,
    #[tabled(rename = "Window")]
    pub window: String,
    #[tabled(rename = "Accelerated")]
    pub value: f64,
    #[tabled(rename = "Branch")]
    pub branch: String,
}

/// Builds one row per window of three consecutive values.
pub fn accelerate_rows(values: &[f64]) -> Vec<AcceleratedRow> {
    AitkenTransform::accelerate_tagged(values)
        .into_iter()
        .zip(values.windows(3))
        .enumerate()
        .map(|(n, (acc, window))| AcceleratedRow {
            n,
            window: window
                .iter()
                .map(|v| format_value(*v))
                .collect::<Vec<_>>()
                .join(", "),
            value: acc.value,
            branch: acc.tag.to_string(),
        })
        .collect()
}

/// Execute the accelerate command.
pub fn execute(args: AccelerateArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    if args.values.len() < 3 {
        if !quiet {
            print_warning("fewer than 3 values, returning the sequence unchanged");
        }
        for value in AitkenTransform::accelerate(&args.values) {
            println!("{value}");
        }
        return Ok(());
    }

    let rows = accelerate_rows(&args.values);

    match format {
        OutputFormat::Table => {
            print_header("Aitken Δ² Acceleration");
            print_output(&rows, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => {
            if let Some(last) = rows.last() {
                println!("{}", last.value);
            }
        }
    }

    Ok(())
}
