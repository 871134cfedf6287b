//! Built-in test functions.
//!
//! Each entry carries `f`, its derivative, an optional fixed-point map `g` and
//! a default bracket and starting guess.

use rootlab_core::evaluator::{EvaluationError, Fallible};

use crate::error::{CliError, CliResult};

/// A real function that may reject its argument.
pub type RealFn = fn(f64) -> Result<f64, EvaluationError>;

/// One catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct CatalogueEntry {
    /// Lookup name.
    pub name: &'static str,
    /// `f(x)` as displayed.
    pub expression: &'static str,
    /// `f'(x)` as displayed.
    pub derivative_expression: &'static str,
    /// `g(x)` as displayed, if the entry has a tuned map.
    pub map_expression: Option<&'static str>,
    /// Default bracket.
    pub bracket: (f64, f64),
    /// Default starting guess.
    pub guess: f64,
    f: RealFn,
    df: RealFn,
    g: Option<RealFn>,
}

impl CatalogueEntry {
    /// The function whose root is sought.
    pub fn function(&self) -> Fallible<RealFn> {
        Fallible(self.f)
    }

    /// Its analytic derivative.
    pub fn derivative(&self) -> Fallible<RealFn> {
        Fallible(self.df)
    }

    /// The tuned fixed-point map, if any.
    pub fn map(&self) -> Option<Fallible<RealFn>> {
        self.g.map(Fallible)
    }
}

fn positive_log(x: f64) -> Result<f64, EvaluationError> {
    if x > 0.0 {
        Ok(x.ln())
    } else {
        Err(EvaluationError::new(format!(
            "ln(x) is undefined for x = {x}"
        )))
    }
}

/// All built-in functions.
pub const CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry {
        name: "quadratic",
        expression: "x^2 - 4",
        derivative_expression: "2x",
        map_expression: None,
        bracket: (1.0, 3.0),
        guess: 3.0,
        f: |x| Ok(x * x - 4.0),
        df: |x| Ok(2.0 * x),
        g: None,
    },
    CatalogueEntry {
        name: "sqrt2",
        expression: "x^2 - 2",
        derivative_expression: "2x",
        map_expression: Some("(x + 2/x) / 2"),
        bracket: (1.0, 2.0),
        guess: 1.0,
        f: |x| Ok(x * x - 2.0),
        df: |x| Ok(2.0 * x),
        g: Some(|x| Ok(0.5 * (x + 2.0 / x))),
    },
    CatalogueEntry {
        name: "cosine",
        expression: "cos(x) - x",
        derivative_expression: "-sin(x) - 1",
        map_expression: Some("cos(x)"),
        bracket: (0.0, 1.0),
        guess: 0.5,
        f: |x| Ok(x.cos() - x),
        df: |x| Ok(-x.sin() - 1.0),
        g: Some(|x| Ok(x.cos())),
    },
    CatalogueEntry {
        name: "cubic",
        expression: "x^3 - x - 2",
        derivative_expression: "3x^2 - 1",
        map_expression: Some("cbrt(x + 2)"),
        bracket: (1.0, 2.0),
        guess: 1.5,
        f: |x| Ok(x * x * x - x - 2.0),
        df: |x| Ok(3.0 * x * x - 1.0),
        g: Some(|x| Ok((x + 2.0).cbrt())),
    },
    CatalogueEntry {
        name: "exponential",
        expression: "exp(-x) - x",
        derivative_expression: "-exp(-x) - 1",
        map_expression: Some("exp(-x)"),
        bracket: (0.0, 1.0),
        guess: 0.5,
        f: |x| Ok((-x).exp() - x),
        df: |x| Ok(-(-x).exp() - 1.0),
        g: Some(|x| Ok((-x).exp())),
    },
    CatalogueEntry {
        name: "log",
        expression: "ln(x) - 1",
        derivative_expression: "1/x",
        map_expression: Some("x + 1 - ln(x)"),
        bracket: (1.0, 4.0),
        guess: 2.0,
        f: |x| Ok(positive_log(x)? - 1.0),
        df: |x| Ok(1.0 / x),
        g: Some(|x| Ok(x + 1.0 - positive_log(x)?)),
    },
    CatalogueEntry {
        name: "cube",
        expression: "x^3",
        derivative_expression: "3x^2",
        map_expression: None,
        bracket: (-1.0, 2.0),
        guess: 0.0,
        f: |x| Ok(x * x * x),
        df: |x| Ok(3.0 * x * x),
        g: None,
    },
];

/// Looks up an entry by name, ignoring case.
pub fn find(name: &str) -> CliResult<&'static CatalogueEntry> {
    CATALOGUE
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| CliError::UnknownFunction(name.to_string()))
}
