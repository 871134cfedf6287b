//! Property-based tests for solver invariants.
//!
//! These tests verify properties that should hold for any input:
//! - Bisection brackets shrink by half every step and keep a sign change
//! - `iterations` and `final_error` always agree with the trace
//! - Aitken on a geometric sequence recovers its limit

use proptest::prelude::*;
use rootlab_core::prelude::*;

proptest! {
    #[test]
    fn bisection_error_bound(root in -50.0_f64..50.0, left in 0.1_f64..20.0, right in 0.1_f64..20.0) {
        let f = move |x: f64| x - root;
        let (a, b) = (root - left, root + right);
        let config = SolverConfig::new(1e-9, 200);

        let result = bisection(&f, a, b, &config).unwrap();

        prop_assert!(result.converged());
        prop_assert!((result.root() - root).abs() < 1e-8);
        for step in result.trace() {
            let IterationStep::Bisection(s) = step else {
                panic!("unexpected step {step:?}");
            };
            let k = (s.index - 1) as i32;
            let bound = (b - a) / 2.0_f64.powi(k);
            prop_assert!(s.b - s.a <= bound + 1e-12);
            prop_assert!(s.a <= root && root <= s.b);
            prop_assert!((s.c - root).abs() <= bound / 2.0 + 1e-12);
        }
    }

    #[test]
    fn result_matches_trace(target in 0.5_f64..100.0, x0 in 1.0_f64..20.0, max_iterations in 1_usize..30) {
        let f = move |x: f64| x * x - target;
        let df = |x: f64| 2.0 * x;
        let config = SolverConfig::new(1e-12, max_iterations);

        let result = newton_raphson(&f, &df, x0, &config).unwrap();

        prop_assert_eq!(result.iterations(), result.trace().len());
        prop_assert!(result.iterations() <= max_iterations);
        prop_assert_eq!(result.final_error(), result.trace().last().map(IterationStep::error));
        if result.converged() {
            prop_assert!(result.final_error().unwrap() < 1e-12);
        } else {
            prop_assert_eq!(result.iterations(), max_iterations);
        }
    }

    #[test]
    fn fixed_point_respects_budget(slope in 0.05_f64..0.95, offset in -10.0_f64..10.0, max_iterations in 1_usize..40) {
        let g = move |x: f64| slope * x + offset;
        let config = SolverConfig::new(1e-10, max_iterations);

        for result in [
            fixed_point(&g, 0.0, &config).unwrap(),
            aitken_fixed_point(&g, 0.0, &config).unwrap(),
        ] {
            prop_assert_eq!(result.iterations(), result.trace().len());
            prop_assert!(result.iterations() <= max_iterations);
            prop_assert_eq!(result.converged(), result.termination() == Termination::Converged);
        }
    }

    #[test]
    fn aitken_recovers_geometric_limit(limit in -10.0_f64..10.0, scale in 0.5_f64..5.0, ratio in 0.1_f64..0.9) {
        let sequence: Vec<f64> = (0..3).map(|n| limit + scale * ratio.powi(n)).collect();

        let accelerated = AitkenTransform::accelerate_tagged(&sequence);

        prop_assert_eq!(accelerated.len(), 1);
        prop_assert_eq!(accelerated[0].tag, AccelerationTag::Accelerated);
        prop_assert!((accelerated[0].value - limit).abs() < 1e-9);
    }
}
