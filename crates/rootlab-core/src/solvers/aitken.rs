//! Aitken Δ² sequence acceleration.

use crate::convergence::NEAR_ZERO;
use crate::trace::AccelerationTag;

/// One value produced by the Δ² formula, with the branch that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceleratedValue {
    /// The accelerated estimate.
    pub value: f64,
    /// Whether the formula or the fallback produced it.
    pub tag: AccelerationTag,
}

/// Stateless Aitken Δ² transform.
///
/// For every window `(x_n, x_{n+1}, x_{n+2})` with
/// `d = x_{n+2} - 2·x_{n+1} + x_n`:
///
/// - `|d| > 1e-14`: `x_n - (x_{n+1} - x_n)² / d`, tagged
///   [`AccelerationTag::Accelerated`]
/// - otherwise `x_{n+2}`, tagged [`AccelerationTag::Fallback`]
///
/// The fallback keeps catastrophic cancellation in `d` from amplifying
/// rounding noise. A non-finite accelerated value also falls back.
///
/// ```rust
/// use rootlab_core::solvers::AitkenTransform;
///
/// // Partial sums of a geometric series converging to 2.
/// let sums = [1.0, 1.5, 1.75, 1.875];
/// let accelerated = AitkenTransform::accelerate(&sums);
/// assert_eq!(accelerated.len(), 2);
/// assert!(accelerated.iter().all(|v| (v - 2.0).abs() < 1e-12));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AitkenTransform;

impl AitkenTransform {
    /// Accelerates a single window of three consecutive values.
    #[must_use]
    pub fn window(x0: f64, x1: f64, x2: f64) -> AcceleratedValue {
        let denominator = x2 - 2.0 * x1 + x0;
        if denominator.abs() > NEAR_ZERO {
            let delta = x1 - x0;
            let value = x0 - delta * delta / denominator;
            if value.is_finite() {
                return AcceleratedValue {
                    value,
                    tag: AccelerationTag::Accelerated,
                };
            }
        }
        AcceleratedValue {
            value: x2,
            tag: AccelerationTag::Fallback,
        }
    }

    /// Accelerates every window of `sequence`, keeping the branch tags.
    ///
    /// Returns `len - 2` values, or none when fewer than three values exist.
    #[must_use]
    pub fn accelerate_tagged(sequence: &[f64]) -> Vec<AcceleratedValue> {
        sequence
            .windows(3)
            .map(|w| Self::window(w[0], w[1], w[2]))
            .collect()
    }

    /// Accelerates every window of `sequence`.
    ///
    /// Returns `len - 2` values; a sequence shorter than three is returned
    /// unchanged.
    #[must_use]
    pub fn accelerate(sequence: &[f64]) -> Vec<f64> {
        if sequence.len() < 3 {
            return sequence.to_vec();
        }
        Self::accelerate_tagged(sequence)
            .into_iter()
            .map(|acc| acc.value)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_sequence_falls_back() {
        let tagged = AitkenTransform::accelerate_tagged(&[0.7, 0.7, 0.7]);

        assert_eq!(
            tagged,
            vec![AcceleratedValue {
                value: 0.7,
                tag: AccelerationTag::Fallback
            }]
        );
        assert_eq!(AitkenTransform::accelerate(&[0.7, 0.7, 0.7]), vec![0.7]);
    }

    #[test]
    fn test_linear_sequence_falls_back() {
        // Constant differences: the second difference is exactly zero.
        let tagged = AitkenTransform::accelerate_tagged(&[1.0, 2.0, 3.0, 4.0]);

        assert!(tagged.iter().all(|acc| acc.tag == AccelerationTag::Fallback));
        assert_eq!(
            tagged.iter().map(|acc| acc.value).collect::<Vec<_>>(),
            vec![3.0, 4.0]
        );
    }

    #[test]
    fn test_geometric_sequence_is_exact() {
        // x_n = 1 + 0.5^n: Aitken recovers the limit exactly.
        let seq: Vec<f64> = (0..6).map(|n| 1.0 + 0.5_f64.powi(n)).collect();

        let tagged = AitkenTransform::accelerate_tagged(&seq);

        assert_eq!(tagged.len(), 4);
        for acc in tagged {
            assert_eq!(acc.tag, AccelerationTag::Accelerated);
            assert_relative_eq!(acc.value, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_short_input_is_unchanged() {
        assert!(AitkenTransform::accelerate(&[]).is_empty());
        assert_eq!(AitkenTransform::accelerate(&[1.0]), vec![1.0]);
        assert_eq!(AitkenTransform::accelerate(&[1.0, 2.0]), vec![1.0, 2.0]);
        assert!(AitkenTransform::accelerate_tagged(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_tiny_denominator_falls_back() {
        let acc = AitkenTransform::window(1.0, 1.0 + 1e-15, 1.0 + 2e-15);
        assert_eq!(acc.tag, AccelerationTag::Fallback);
        assert_relative_eq!(acc.value, 1.0 + 2e-15);
    }

    #[test]
    fn test_window_formula() {
        let acc = AitkenTransform::window(0.5, 0.877_582_561_890_372_8, 0.639_012_494_165_259_2);
        assert_eq!(acc.tag, AccelerationTag::Accelerated);
        assert_relative_eq!(acc.value, 0.731_385_186_382_581_8, epsilon = 1e-12);
    }

    #[test]
    fn test_cosine_iterates_improve() {
        let mut seq = vec![0.5_f64];
        for _ in 0..10 {
            let last = *seq.last().unwrap();
            seq.push(last.cos());
        }
        let fixed = 0.739_085_133_215_160_6;

        let accelerated = AitkenTransform::accelerate(&seq);

        assert_eq!(accelerated.len(), seq.len() - 2);
        let raw_err = (seq[seq.len() - 1] - fixed).abs();
        let acc_err = (accelerated[accelerated.len() - 1] - fixed).abs();
        assert!(acc_err < raw_err);
    }
}
