//! Compare command implementation.
//!
//! Runs plain and Aitken-accelerated fixed-point iteration from the same start
//! and reports the iteration counts side by side.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rootlab_core::evaluator::Evaluator;
use rootlab_core::finder::{RootFinder, Start};
use rootlab_core::solvers::{Method, SolverConfig, SolverResult};

use crate::cli::OutputFormat;
use crate::commands::catalogue::{self, CatalogueEntry};
use crate::commands::{describe_termination, estimated_order};
use crate::error::CliResult;
use crate::output::{
    format_error, format_optional, format_value, print_header, print_output, print_single, KeyValue,
};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Catalogue function (see `rootlab functions`)
    pub function: String,

    /// Starting guess. Defaults to the catalogue guess.
    #[arg(long, allow_negative_numbers = true)]
    pub x0: Option<f64>,
}

/// One method's outcome.
#[derive(Debug, Serialize, Tabled)]
pub struct ComparisonRow {
    #[tabled(rename = "Method")]
    pub method: &'static str,
    #[tabled(rename = "Root")]
    pub root: String,
    #[tabled(rename = "Iterations")]
    pub iterations: usize,
    #[tabled(rename = "Converged")]
    pub converged: bool,
    #[tabled(rename = "Final Error")]
    pub final_error: String,
    #[tabled(rename = "Order")]
    pub order: String,
    #[tabled(rename = "Termination")]
    pub termination: String,
}

impl From<&SolverResult> for ComparisonRow {
    fn from(result: &SolverResult) -> Self {
        Self {
            method: result.method().name(),
            root: format_value(result.root()),
            iterations: result.iterations(),
            converged: result.converged(),
            final_error: format_optional(result.final_error(), format_error),
            order: format_optional(estimated_order(result), |p| format!("{p:.2}")),
            termination: describe_termination(result.termination()),
        }
    }
}

/// Machine-readable comparison.
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub function: &'static str,
    pub x0: f64,
    pub runs: Vec<ComparisonRow>,
    pub speedup: Option<f64>,
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, config: SolverConfig, format: OutputFormat) -> Result<()> {
    let entry = catalogue::find(&args.function)?;
    let x0 = args.x0.unwrap_or(entry.guess);
    let (plain, accelerated) = run(entry, x0, config)?;

    let speedup = (plain.converged() && accelerated.converged() && accelerated.iterations() > 0)
        .then(|| plain.iterations() as f64 / accelerated.iterations() as f64);
    let rows = vec![ComparisonRow::from(&plain), ComparisonRow::from(&accelerated)];

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "Fixed point vs Aitken on {} from x0 = {x0}",
                entry.expression
            ));
            print_output(&rows, format)?;
            if let Some(speedup) = speedup {
                print_output(&[KeyValue::from_float("Speedup", speedup, 2)], format)?;
            }
        }
        OutputFormat::Json => print_single(&ComparisonReport {
            function: entry.name,
            x0,
            runs: rows,
            speedup,
        })?,
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => {
            println!("{} {}", plain.iterations(), accelerated.iterations());
        }
    }

    Ok(())
}

/// Runs both fixed-point variants on the entry's map.
fn run(
    entry: &CatalogueEntry,
    x0: f64,
    config: SolverConfig,
) -> CliResult<(SolverResult, SolverResult)> {
    let finder = RootFinder::new(config);
    let f = entry.function();
    let g = entry.map();
    let map = g.as_ref().map(|g| g as &dyn Evaluator);

    let plain = finder.solve(Method::FixedPoint, &f, map, Start::Guess(x0))?;
    let accelerated = finder.solve(Method::Aitken, &f, map, Start::Guess(x0))?;
    Ok((plain, accelerated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceleration_wins_on_cosine() {
        let entry = catalogue::find("cosine").unwrap();

        let (plain, accelerated) = run(entry, 0.5, SolverConfig::new(1e-8, 100)).unwrap();

        assert_eq!(plain.iterations(), 45);
        assert_eq!(accelerated.iterations(), 8);
        assert!((plain.root() - accelerated.root()).abs() < 1e-7);
    }

    #[test]
    fn test_rows_report_order() {
        let entry = catalogue::find("cosine").unwrap();
        let (plain, _) = run(entry, 0.5, SolverConfig::new(1e-8, 100)).unwrap();

        let row = ComparisonRow::from(&plain);

        assert_eq!(row.method, "Fixed point");
        assert!(!row.order.is_empty());
    }
}
