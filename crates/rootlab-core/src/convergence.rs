//! Convergence predicates and error analysis.

/// Magnitude below which a denominator is treated as zero.
pub const NEAR_ZERO: f64 = 1e-14;

/// Stateless predicate comparing an error metric against a tolerance.
///
/// A step is converged when its error is strictly below the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceCheck {
    tolerance: f64,
}

impl ConvergenceCheck {
    /// Creates a check for the given tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Returns the tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns true if `error < tolerance`.
    ///
    /// NaN never converges.
    #[must_use]
    pub fn is_converged(&self, error: f64) -> bool {
        error < self.tolerance
    }
}

/// Absolute error `|approximate - reference|`.
#[must_use]
pub fn absolute_error(reference: f64, approximate: f64) -> f64 {
    (approximate - reference).abs()
}

/// Relative error `|approximate - reference| / |reference|`.
///
/// Falls back to the absolute error when the reference is near zero.
#[must_use]
pub fn relative_error(reference: f64, approximate: f64) -> f64 {
    if reference.abs() <= NEAR_ZERO {
        absolute_error(reference, approximate)
    } else {
        absolute_error(reference, approximate) / reference.abs()
    }
}

/// Relative error expressed as a percentage, `|(current - previous) / previous| * 100`.
///
/// Falls back to the absolute difference when `previous` is near zero.
#[must_use]
pub fn percent_error(previous: f64, current: f64) -> f64 {
    if previous.abs() <= NEAR_ZERO {
        absolute_error(previous, current)
    } else {
        ((current - previous) / previous).abs() * 100.0
    }
}

/// Empirical order of convergence from successive errors.
///
/// Uses the last three strictly positive, strictly decreasing errors:
/// `p ≈ ln(e₂/e₁) / ln(e₁/e₀)`. Returns `None` when the tail of the sequence
/// does not support an estimate (fewer than three usable errors, or a
/// stagnating sequence).
///
/// ```rust
/// use rootlab_core::convergence::convergence_order;
///
/// // Quadratic: each error is the square of the previous one.
/// let errors = [1e-1, 1e-2, 1e-4, 1e-8];
/// let p = convergence_order(&errors).unwrap();
/// assert!((p - 2.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn convergence_order(errors: &[f64]) -> Option<f64> {
    let usable: Vec<f64> = errors
        .iter()
        .copied()
        .filter(|e| e.is_finite() && *e > 0.0)
        .collect();
    if usable.len() < 3 {
        return None;
    }

    let tail = &usable[usable.len() - 3..];
    let (e0, e1, e2) = (tail[0], tail[1], tail[2]);
    let denominator = (e1 / e0).ln();
    if denominator.abs() <= NEAR_ZERO {
        return None;
    }
    let order = (e2 / e1).ln() / denominator;
    order.is_finite().then_some(order)
}

/// Ratio `e_{n+1} / e_n^order` for each consecutive pair of errors.
///
/// For a method of the given order these ratios settle towards the asymptotic
/// error constant.
#[must_use]
pub fn error_constants(errors: &[f64], order: f64) -> Vec<f64> {
    errors
        .windows(2)
        .filter(|pair| pair[0] > 0.0)
        .map(|pair| pair[1] / pair[0].powf(order))
        .collect()
}
