//! Solve command implementation.
//!
//! Runs one method on a catalogue function and prints the summary and the
//! iteration trace.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use rootlab_core::evaluator::Evaluator;
use rootlab_core::finder::{RootFinder, Start};
use rootlab_core::solvers::{Method, SolverConfig, SolverResult};
use rootlab_core::trace::IterationStep;

use crate::cli::OutputFormat;
use crate::commands::catalogue::{self, CatalogueEntry};
use crate::commands::{describe_termination, parse_method};
use crate::error::{CliError, CliResult};
use crate::output::{
    format_error, format_optional, format_value, print_header, print_output, print_single,
    print_warning, KeyValue,
};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Catalogue function (see `rootlab functions`)
    pub function: String,

    /// Method: bisection, newton, secant, fixed-point or aitken
    #[arg(short, long, default_value = "newton", value_parser = parse_method)]
    pub method: Method,

    /// Left end of the bracket. Defaults to the catalogue bracket.
    #[arg(long, allow_negative_numbers = true)]
    pub a: Option<f64>,

    /// Right end of the bracket. Defaults to the catalogue bracket.
    #[arg(long, allow_negative_numbers = true)]
    pub b: Option<f64>,

    /// Starting guess. Defaults to the catalogue guess.
    #[arg(long, allow_negative_numbers = true)]
    pub x0: Option<f64>,

    /// Second starting point for the secant method
    #[arg(long, allow_negative_numbers = true)]
    pub x1: Option<f64>,

    /// Use a central-difference derivative for Newton-Raphson
    #[arg(long)]
    pub numeric_derivative: bool,

    /// Print only the summary
    #[arg(long)]
    pub no_trace: bool,
}

/// One row of the iteration table.
#[derive(Debug, Serialize, Tabled)]
pub struct TraceRow {
    #[tabled(rename = "Iter")]
    pub iteration: usize,
    #[tabled(rename = "x")]
    pub x: String,
    #[tabled(rename = "Estimate")]
    pub estimate: String,
    #[tabled(rename = "Error")]
    pub error: String,
    #[tabled(rename = "Detail")]
    pub detail: String,
}

impl From<&IterationStep> for TraceRow {
    fn from(step: &IterationStep) -> Self {
        let (x, detail) = match step {
            IterationStep::Bisection(s) => (
                s.c,
                format!(
                    "[{}, {}] f(c)={}",
                    format_value(s.a),
                    format_value(s.b),
                    format_error(s.fc)
                ),
            ),
            IterationStep::Newton(s) => (
                s.x,
                format!("f={} f'={}", format_error(s.fx), format_error(s.dfx)),
            ),
            IterationStep::Secant(s) => (
                s.x_curr,
                format!(
                    "x_prev={} f={}",
                    format_value(s.x_prev),
                    format_error(s.f_curr)
                ),
            ),
            IterationStep::FixedPoint(s) => (s.x, format!("g(x)={}", format_value(s.gx))),
            IterationStep::Aitken(s) => {
                let detail = match s.x_accelerated {
                    Some(_) => format!(
                        "{} abs={} rel={}%",
                        s.method_used,
                        format_optional(s.abs_error, format_error),
                        format_optional(s.rel_error, format_error),
                    ),
                    None => format!("warm-up g(x)={}", format_value(s.gx_prev)),
                };
                (s.x_prev, detail)
            }
        };

        Self {
            iteration: step.index(),
            x: format_value(x),
            estimate: format_value(step.estimate()),
            error: format_error(step.error()),
            detail,
        }
    }
}

/// Machine-readable solve report.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub function: &'static str,
    pub method: String,
    pub root: f64,
    pub converged: bool,
    pub iterations: usize,
    pub final_error: Option<f64>,
    pub termination: String,
    pub trace: Vec<TraceRow>,
}

/// Execute the solve command.
pub fn execute(
    args: SolveArgs,
    config: SolverConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let entry = catalogue::find(&args.function)?;
    let result = run(entry, &args, config)?;

    info!(
        function = entry.name,
        method = args.method.key(),
        iterations = result.iterations(),
        converged = result.converged(),
        "solve finished"
    );
    if !result.converged() && !quiet {
        print_warning(&format!(
            "{} did not converge: {}",
            args.method,
            describe_termination(result.termination())
        ));
    }

    let rows: Vec<TraceRow> = result.trace().iter().map(TraceRow::from).collect();

    match format {
        OutputFormat::Table => {
            print_header(&format!("{} on {} = 0", args.method, entry.expression));
            print_output(&summary(entry, &result), format)?;
            if !args.no_trace {
                print_header("Iterations");
                print_output(&rows, format)?;
            }
        }
        OutputFormat::Json => {
            print_single(&SolveReport {
                function: entry.name,
                method: args.method.key().to_string(),
                root: result.root(),
                converged: result.converged(),
                iterations: result.iterations(),
                final_error: result.final_error(),
                termination: describe_termination(result.termination()),
                trace: if args.no_trace { Vec::new() } else { rows },
            })?;
        }
        OutputFormat::Csv => {
            if args.no_trace {
                print_output(&summary(entry, &result), format)?;
            } else {
                print_output(&rows, format)?;
            }
        }
        OutputFormat::Minimal => {
            println!("{}", result.root());
        }
    }

    Ok(())
}

/// Dispatches the catalogue entry to the selected method.
fn run(
    entry: &CatalogueEntry,
    args: &SolveArgs,
    config: SolverConfig,
) -> CliResult<SolverResult> {
    let finder = RootFinder::new(config);
    let f = entry.function();
    let df = entry.derivative();
    let g = entry.map();

    let auxiliary: Option<&dyn Evaluator> = match args.method {
        Method::Newton if !args.numeric_derivative => Some(&df),
        Method::FixedPoint | Method::Aitken => g.as_ref().map(|g| g as &dyn Evaluator),
        _ => None,
    };

    let start = start_for(entry, args)?;
    Ok(finder.solve(args.method, &f, auxiliary, start)?)
}

/// Picks the start for the method, falling back to the catalogue defaults.
fn start_for(entry: &CatalogueEntry, args: &SolveArgs) -> CliResult<Start> {
    let x0 = args.x0.unwrap_or(entry.guess);
    match args.method {
        Method::Bisection => {
            let (a, b) = match (args.a, args.b) {
                (Some(a), Some(b)) => (a, b),
                (None, None) => entry.bracket,
                (Some(_), None) => {
                    return Err(CliError::MissingArgument {
                        method: args.method,
                        argument: "--b",
                    })
                }
                (None, Some(_)) => {
                    return Err(CliError::MissingArgument {
                        method: args.method,
                        argument: "--a",
                    })
                }
            };
            Ok(Start::Interval(a, b))
        }
        Method::Secant => Ok(match args.x1 {
            Some(x1) => Start::Interval(x0, x1),
            None => Start::Guess(x0),
        }),
        Method::Newton | Method::FixedPoint | Method::Aitken => Ok(Start::Guess(x0)),
    }
}

fn summary(entry: &CatalogueEntry, result: &SolverResult) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Function", format!("{} ({})", entry.name, entry.expression)),
        KeyValue::new("Method", result.method().name()),
        KeyValue::from_float("Root", result.root(), 12),
        KeyValue::new("Converged", result.converged().to_string()),
        KeyValue::new("Iterations", result.iterations().to_string()),
    ];
    if let Some(error) = result.final_error() {
        rows.push(KeyValue::from_scientific("Final Error", error));
    }
    if let Ok(residual) = entry.function().evaluate(result.root()) {
        rows.push(KeyValue::from_scientific("f(root)", residual));
    }
    rows.push(KeyValue::new(
        "Termination",
        describe_termination(result.termination()),
    ));
    rows
}
