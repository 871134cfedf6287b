//! End-to-end solver scenarios.
//!
//! Each scenario drives a solver through the public API and checks the root,
//! the termination reason and the shape of the trace.

use approx::assert_relative_eq;
use rootlab_core::convergence::convergence_order;
use rootlab_core::prelude::*;

const DOTTIE: f64 = 0.739_085_133_215_160_6;

// =============================================================================
// BISECTION
// =============================================================================

#[test]
fn bisection_finds_two_on_symmetric_bracket() {
    let f = |x: f64| x * x - 4.0;

    let result = bisection(&f, 1.0, 3.0, &SolverConfig::new(1e-6, 100)).unwrap();

    assert!(result.converged());
    assert_relative_eq!(result.root(), 2.0, epsilon = 1e-6);
    // The first midpoint is the root itself.
    assert_eq!(result.iterations(), 1);
}

#[test]
fn bisection_rejects_bracket_without_sign_change() {
    let f = |x: f64| x * x + 1.0;

    let err = bisection(&f, -1.0, 1.0, &SolverConfig::default()).unwrap_err();

    match err {
        RootError::InvalidBracket { fa, fb, .. } => {
            assert_relative_eq!(fa, 2.0);
            assert_relative_eq!(fb, 2.0);
        }
        other => panic!("expected InvalidBracket, got {other:?}"),
    }
}

#[test]
fn bisection_brackets_halve_every_step() {
    let f = |x: f64| x.powi(3) - x - 2.0;

    let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-10, 200)).unwrap();

    for step in result.trace() {
        let IterationStep::Bisection(s) = step else {
            panic!("unexpected step {step:?}");
        };
        let bound = 0.5_f64.powi(s.index as i32 - 1);
        assert!(s.b - s.a <= bound + 1e-15);
    }
    assert_relative_eq!(result.root(), 1.521_379_706_804_567_6, epsilon = 1e-9);
}

// =============================================================================
// NEWTON-RAPHSON
// =============================================================================

#[test]
fn newton_finds_two_from_three() {
    let f = |x: f64| x * x - 4.0;
    let df = |x: f64| 2.0 * x;

    let result = newton_raphson(&f, &df, 3.0, &SolverConfig::default()).unwrap();

    assert!(result.converged());
    assert!(result.iterations() <= 6);
    assert_relative_eq!(result.root(), 2.0, epsilon = 1e-9);
}

#[test]
fn newton_converges_quadratically() {
    let f = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;

    let result = newton_raphson(&f, &df, 1.0, &SolverConfig::new(1e-14, 50)).unwrap();

    assert!(result.converged());
    assert_relative_eq!(result.root(), std::f64::consts::SQRT_2, epsilon = 1e-14);

    // e_{n+1} / e_n^2 approaches 1 / (2 sqrt 2) for this function.
    let estimates = result.trace().estimates();
    let errors: Vec<f64> = estimates
        .iter()
        .map(|x| (x - std::f64::consts::SQRT_2).abs())
        .filter(|e| *e > 1e-12)
        .collect();
    let last = errors.len() - 1;
    let ratio = errors[last] / (errors[last - 1] * errors[last - 1]);
    assert!((ratio - 0.353_553).abs() < 0.05, "ratio = {ratio}");
}

#[test]
fn newton_stops_on_singular_derivative() {
    let f = |x: f64| x.powi(3);
    let df = |x: f64| 3.0 * x * x;

    let result = newton_raphson(&f, &df, 0.0, &SolverConfig::default()).unwrap();

    assert!(!result.converged());
    assert_eq!(result.iterations(), 0);
    assert!(result.trace().is_empty());
    assert_eq!(
        result.termination(),
        Termination::SingularDerivative {
            x: 0.0,
            derivative: 0.0
        }
    );
}

#[test]
fn newton_numerical_matches_analytic() {
    let f = |x: f64| x.exp() - 3.0;
    let df = |x: f64| x.exp();
    let config = SolverConfig::new(1e-10, 50);

    let analytic = newton_raphson(&f, &df, 1.0, &config).unwrap();
    let numeric = newton_raphson_numerical(&f, 1.0, &config).unwrap();

    assert_relative_eq!(analytic.root(), 3.0_f64.ln(), epsilon = 1e-10);
    assert_relative_eq!(numeric.root(), analytic.root(), epsilon = 1e-8);
}

// =============================================================================
// FIXED POINT AND ACCELERATION
// =============================================================================

#[test]
fn fixed_point_cosine() {
    let result = fixed_point(&f64::cos, 0.5, &SolverConfig::new(1e-8, 100)).unwrap();

    assert!(result.converged());
    assert_relative_eq!(result.root(), DOTTIE, epsilon = 1e-8);
    assert_eq!(result.iterations(), 45);
}

#[test]
fn acceleration_saves_iterations() {
    let config = SolverConfig::new(1e-8, 100);

    let plain = fixed_point(&f64::cos, 0.5, &config).unwrap();
    let fast = aitken_fixed_point(&f64::cos, 0.5, &config).unwrap();

    assert!(fast.converged());
    assert!(fast.iterations() * 4 < plain.iterations());
    assert_relative_eq!(fast.root(), DOTTIE, epsilon = 1e-10);
}

#[test]
fn aitken_improves_a_finished_sequence() {
    let result = fixed_point(&f64::cos, 0.5, &SolverConfig::new(1e-8, 100)).unwrap();
    let iterates = result.trace().fixed_point_iterates();

    let accelerated = AitkenTransform::accelerate(iterates.last_n(12).unwrap());

    assert_eq!(accelerated.len(), 10);
    let raw_err = (iterates.as_slice()[iterates.len() - 1] - DOTTIE).abs();
    let acc_err = (accelerated[accelerated.len() - 1] - DOTTIE).abs();
    assert!(acc_err < raw_err);
}

#[test]
fn aitken_on_constant_sequence_falls_back() {
    let tagged = AitkenTransform::accelerate_tagged(&[3.0, 3.0, 3.0]);

    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].tag, AccelerationTag::Fallback);
    assert_relative_eq!(tagged[0].value, 3.0);
}

// =============================================================================
// RESULT INVARIANTS
// =============================================================================

#[test]
fn iterations_always_match_trace() {
    let finder = RootFinder::new(SolverConfig::new(1e-9, 60));
    let f = |x: f64| x.cos() - x;
    let g = |x: f64| x.cos();

    let runs = [
        finder.solve(Method::Bisection, &f, None, Start::Interval(0.0, 1.0)),
        finder.solve(Method::Newton, &f, None, Start::Guess(1.0)),
        finder.solve(Method::Secant, &f, None, Start::Interval(0.0, 1.0)),
        finder.solve(Method::FixedPoint, &f, Some(&g), Start::Guess(0.5)),
        finder.solve(Method::Aitken, &f, Some(&g), Start::Guess(0.5)),
    ];

    for run in runs {
        let result = run.unwrap();
        assert_eq!(result.iterations(), result.trace().len());
        assert_eq!(
            result.final_error(),
            result.trace().last().map(IterationStep::error)
        );
        assert_relative_eq!(result.root(), DOTTIE, epsilon = 1e-7);
        for (position, step) in result.trace().iter().enumerate() {
            assert_eq!(step.index(), position + 1);
        }
    }
}

#[test]
fn evaluation_failures_surface_as_errors() {
    let f = Fallible(|x: f64| {
        if x > 0.0 {
            Ok(x.ln() - 1.0)
        } else {
            Err(EvaluationError::new("logarithm of a non-positive number"))
        }
    });

    let ok = newton_raphson_numerical(&f, 2.0, &SolverConfig::new(1e-10, 50)).unwrap();
    assert_relative_eq!(ok.root(), std::f64::consts::E, epsilon = 1e-8);

    let err = bisection(&f, -1.0, 5.0, &SolverConfig::default()).unwrap_err();
    assert!(matches!(err, RootError::FunctionEvaluation { .. }));
}

#[test]
fn secant_orders_between_linear_and_quadratic() {
    let f = |x: f64| x * x * x - 2.0 * x - 5.0;
    let root = 2.094_551_481_542_326_5;

    let result = secant(&f, 2.0, 3.0, &SolverConfig::new(1e-13, 50)).unwrap();
    let errors: Vec<f64> = result
        .trace()
        .estimates()
        .iter()
        .map(|x| (x - root).abs())
        .filter(|e| *e > 1e-11)
        .collect();

    assert_relative_eq!(result.root(), root, epsilon = 1e-12);
    let order = convergence_order(&errors).unwrap();
    assert!(order > 1.3 && order < 2.1, "order = {order}");
}
