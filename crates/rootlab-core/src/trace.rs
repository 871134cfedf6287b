//! Iteration provenance.
//!
//! Every solver appends one [`IterationStep`] per pass to an [`IterationTrace`].
//! The trace is append-only while the solver runs and read-only once it is
//! handed to the caller inside a [`SolverResult`](crate::solvers::SolverResult).

use std::fmt;
use std::ops::Index;
use std::slice;

use crate::solvers::Method;

/// Which value carried an accelerated fixed-point step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccelerationTag {
    /// The Aitken Δ² formula produced the value.
    Accelerated,
    /// The raw iterate was used: the Aitken denominator collapsed, the
    /// accelerated value was not finite, or too few values were available.
    Fallback,
}

impl AccelerationTag {
    /// Returns the tag as a lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accelerated => "accelerated",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for AccelerationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bisection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionStep {
    /// 1-based iteration number.
    pub index: usize,
    /// Left end of the bracket before narrowing.
    pub a: f64,
    /// Right end of the bracket before narrowing.
    pub b: f64,
    /// Midpoint.
    pub c: f64,
    /// f(c).
    pub fc: f64,
}

impl BisectionStep {
    /// Half-width of the bracket, an upper bound on `|c - root|`.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        (self.b - self.a).abs() / 2.0
    }
}

/// One Newton-Raphson pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonStep {
    /// 1-based iteration number.
    pub index: usize,
    /// Current iterate.
    pub x: f64,
    /// f(x).
    pub fx: f64,
    /// f'(x).
    pub dfx: f64,
    /// Next iterate.
    pub x_next: f64,
    /// `|x_next - x|`.
    pub error: f64,
}

/// One secant pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantStep {
    /// 1-based iteration number.
    pub index: usize,
    /// Older of the two points.
    pub x_prev: f64,
    /// Newer of the two points.
    pub x_curr: f64,
    /// f(x_prev).
    pub f_prev: f64,
    /// f(x_curr).
    pub f_curr: f64,
    /// Next iterate.
    pub x_next: f64,
    /// `|x_next - x_curr|`.
    pub error: f64,
}

/// One plain fixed-point pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointStep {
    /// 1-based iteration number.
    pub index: usize,
    /// Current iterate.
    pub x: f64,
    /// g(x).
    pub gx: f64,
    /// `|g(x) - x|`.
    pub error: f64,
}

/// One pass of the accelerated fixed-point solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AitkenStep {
    /// 1-based iteration number.
    pub index: usize,
    /// Iterate the map was applied to.
    pub x_prev: f64,
    /// g(x_prev).
    pub gx_prev: f64,
    /// The three values fed to the Δ² formula, when available.
    pub window: Option<[f64; 3]>,
    /// Value produced from the window.
    pub x_accelerated: Option<f64>,
    /// `|x_accelerated - x_prev|`.
    pub abs_error: Option<f64>,
    /// Percentage change against the previous accelerated value.
    pub rel_error: Option<f64>,
    /// Which value carried the step.
    pub method_used: AccelerationTag,
    /// The metric compared against the tolerance.
    ///
    /// For warm-up steps without a window this is `|g(x_prev) - x_prev|` and is
    /// informational only.
    pub error: f64,
}

/// A single diagnostic record, one shape per method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationStep {
    /// Bracket halving.
    Bisection(BisectionStep),
    /// Derivative step.
    Newton(NewtonStep),
    /// Two-point secant step.
    Secant(SecantStep),
    /// Plain self-map iterate.
    FixedPoint(FixedPointStep),
    /// Fused Aitken step.
    Aitken(AitkenStep),
}

impl IterationStep {
    /// 1-based iteration number.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Bisection(s) => s.index,
            Self::Newton(s) => s.index,
            Self::Secant(s) => s.index,
            Self::FixedPoint(s) => s.index,
            Self::Aitken(s) => s.index,
        }
    }

    /// The error metric the step reports.
    #[must_use]
    pub fn error(&self) -> f64 {
        match self {
            Self::Bisection(s) => s.half_width(),
            Self::Newton(s) => s.error,
            Self::Secant(s) => s.error,
            Self::FixedPoint(s) => s.error,
            Self::Aitken(s) => s.error,
        }
    }

    /// The estimate the step leaves behind.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        match self {
            Self::Bisection(s) => s.c,
            Self::Newton(s) => s.x_next,
            Self::Secant(s) => s.x_next,
            Self::FixedPoint(s) => s.gx,
            Self::Aitken(s) => s.x_accelerated.unwrap_or(s.gx_prev),
        }
    }

    /// The method that produced the step.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Bisection(_) => Method::Bisection,
            Self::Newton(_) => Method::Newton,
            Self::Secant(_) => Method::Secant,
            Self::FixedPoint(_) => Method::FixedPoint,
            Self::Aitken(_) => Method::Aitken,
        }
    }
}

/// Ordered, append-only log of the steps of one solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationTrace {
    steps: Vec<IterationStep>,
}

impl IterationTrace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity),
        }
    }

    /// Appends a step. Indices must arrive in increasing order.
    pub(crate) fn push(&mut self, step: IterationStep) {
        debug_assert!(
            self.steps.last().map_or(true, |last| last.index() < step.index()),
            "trace steps must be strictly ordered"
        );
        self.steps.push(step);
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no step was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps in order.
    #[must_use]
    pub fn steps(&self) -> &[IterationStep] {
        &self.steps
    }

    /// Step by 0-based position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&IterationStep> {
        self.steps.get(position)
    }

    /// Last step, if any.
    #[must_use]
    pub fn last(&self) -> Option<&IterationStep> {
        self.steps.last()
    }

    /// Iterates over the steps in order.
    pub fn iter(&self) -> slice::Iter<'_, IterationStep> {
        self.steps.iter()
    }

    /// Error metric of every step, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<f64> {
        self.steps.iter().map(IterationStep::error).collect()
    }

    /// Estimate left by every step, in order.
    #[must_use]
    pub fn estimates(&self) -> Vec<f64> {
        self.steps.iter().map(IterationStep::estimate).collect()
    }

    /// Raw fixed-point iterates `[x0, g(x0), g(g(x0)), ...]` of a plain
    /// fixed-point trace, ready for [`AitkenTransform`](crate::solvers::AitkenTransform).
    ///
    /// Steps of other methods are skipped.
    #[must_use]
    pub fn fixed_point_iterates(&self) -> Sequence {
        let mut sequence = Sequence::new();
        for step in &self.steps {
            if let IterationStep::FixedPoint(s) = step {
                if sequence.is_empty() {
                    sequence.push(s.x);
                }
                sequence.push(s.gx);
            }
        }
        sequence
    }
}

impl Index<usize> for IterationTrace {
    type Output = IterationStep;

    fn index(&self, position: usize) -> &Self::Output {
        &self.steps[position]
    }
}

impl<'a> IntoIterator for &'a IterationTrace {
    type Item = &'a IterationStep;
    type IntoIter = slice::Iter<'a, IterationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Append-only sequence of real values, such as raw fixed-point iterates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    values: Vec<f64>,
}

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sequence holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values in order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// The most recent `n` values, or `None` if fewer exist.
    #[must_use]
    pub fn last_n(&self, n: usize) -> Option<&[f64]> {
        self.values
            .len()
            .checked_sub(n)
            .map(|start| &self.values[start..])
    }
}

impl From<Vec<f64>> for Sequence {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl FromIterator<f64> for Sequence {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[f64]> for Sequence {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
