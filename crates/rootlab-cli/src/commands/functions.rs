//! Functions command implementation.
//!
//! Lists the built-in catalogue.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::catalogue::{CatalogueEntry, CATALOGUE};
use crate::output::{print_header, print_output};

/// One catalogue row.
#[derive(Debug, Serialize, Tabled)]
pub struct FunctionRow {
    #[tabled(rename = "Name")]
    pub name: &'static str,
    #[tabled(rename = "f(x)")]
    pub expression: &'static str,
    #[tabled(rename = "f'(x)")]
    pub derivative: &'static str,
    #[tabled(rename = "g(x)")]
    pub map: String,
    #[tabled(rename = "Bracket")]
    pub bracket: String,
    #[tabled(rename = "Guess")]
    pub guess: f64,
}

impl From<&CatalogueEntry> for FunctionRow {
    fn from(entry: &CatalogueEntry) -> Self {
        Self {
            name: entry.name,
            expression: entry.expression,
            derivative: entry.derivative_expression,
            map: entry
                .map_expression
                .map_or_else(|| format!("x + ({})", entry.expression), str::to_string),
            bracket: format!("[{}, {}]", entry.bracket.0, entry.bracket.1),
            guess: entry.guess,
        }
    }
}

/// Execute the functions command.
pub fn execute(format: OutputFormat) -> Result<()> {
    let rows: Vec<FunctionRow> = CATALOGUE.iter().map(FunctionRow::from).collect();

    match format {
        OutputFormat::Table => {
            print_header("Built-in Functions");
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.name);
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, format)?,
    }

    Ok(())
}
