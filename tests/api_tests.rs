//! Tests for the public trend-filtering API.
//!
//! These tests exercise the builder, the model, and the documented
//! solver contract through the public prelude only:
//! - Parameter validation and builder misuse
//! - Known fixed points (no regularization, already-linear signals)
//! - Documented edge cases (zero iteration cap, minimum length)
//! - Termination metadata and the observer hook
//!
//! ## Test Organization
//!
//! 1. **Builder and Validation** - invalid parameters, duplicates
//! 2. **Solver Contract** - fixed points, edge cases, determinism
//! 3. **Diagnostics** - observer, residuals, display

use l1tf_rs::prelude::*;

use approx::assert_abs_diff_eq;
use rand::prelude::*;
use rand_distr::Normal;

// ============================================================================
// Helper Functions
// ============================================================================

/// Seeded random walk: cumulative sum of standard normal steps.
fn random_walk(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let step = Normal::new(0.0, 1.0).unwrap();
    let mut level = 0.0;
    (0..n)
        .map(|_| {
            level += step.sample(&mut rng);
            level
        })
        .collect()
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()))
}

// ============================================================================
// Builder and Validation Tests
// ============================================================================

/// Test that the default configuration builds and fits.
#[test]
fn test_default_build_and_fit() {
    let y: Vec<f64> = vec![0.5, 1.0, 2.0, 2.5, 3.5];
    let result = L1tf::new().build().unwrap().fit(&y).unwrap();

    assert_eq!(result.y.len(), y.len(), "Trend length should match input");
    assert!(result.y.iter().all(|v| v.is_finite()));
}

/// Test that non-positive rho is rejected at build time.
#[test]
fn test_invalid_rho() {
    assert!(matches!(
        L1tf::<f64>::new().rho(-1.0).build(),
        Err(L1tfError::InvalidRho(r)) if r == -1.0
    ));
    assert!(matches!(
        L1tf::<f64>::new().rho(0.0).build(),
        Err(L1tfError::InvalidRho(_))
    ));
    assert!(matches!(
        L1tf::<f64>::new().rho(f64::NAN).build(),
        Err(L1tfError::InvalidRho(_))
    ));
}

/// Test that negative lambda is rejected but zero is accepted.
#[test]
fn test_invalid_lambda() {
    assert!(matches!(
        L1tf::<f64>::new().lambda(-0.5).build(),
        Err(L1tfError::InvalidLambda(_))
    ));
    assert!(L1tf::<f64>::new().lambda(0.0).build().is_ok());
}

/// Test that negative tolerance is rejected but zero is accepted.
#[test]
fn test_invalid_tolerance() {
    assert!(matches!(
        L1tf::<f64>::new().tolerance(-1e-8).build(),
        Err(L1tfError::InvalidTolerance(_))
    ));
    assert!(L1tf::<f64>::new().tolerance(0.0).build().is_ok());
}

/// Test that setting a parameter twice fails at build time.
#[test]
fn test_duplicate_parameter() {
    let res = L1tf::<f64>::new().rho(1.0).rho(2.0).build();

    assert!(
        matches!(res, Err(L1tfError::DuplicateParameter { parameter: "rho" })),
        "Duplicate rho should error"
    );
}

/// Test that too-short signals are rejected at fit time.
#[test]
fn test_signal_too_short() {
    let model = L1tf::new().build().unwrap();

    assert!(matches!(model.fit(&[]), Err(L1tfError::EmptyInput)));
    assert!(matches!(
        model.fit(&[1.0, 2.0]),
        Err(L1tfError::TooFewPoints { got: 2, min: 3 })
    ));
}

// ============================================================================
// Solver Contract Tests
// ============================================================================

/// Test that lambda = 0 recovers the input signal.
///
/// With no regularization the minimizer of the objective is the input
/// itself, so the iteration must settle on it.
#[test]
fn test_zero_lambda_recovers_input() {
    let y = vec![0.3, -1.2, 2.5, 4.0, 1.7, 0.9, 5.0, 3.3];

    let result = L1tf::new()
        .lambda(0.0)
        .iter_max(5000)
        .build()
        .unwrap()
        .fit(&y)
        .unwrap();

    assert!(result.converged, "Unregularized solve should converge");
    for (fitted, orig) in result.y.iter().zip(y.iter()) {
        assert_abs_diff_eq!(*fitted, *orig, epsilon = 1e-4);
    }
}

/// Test that an already-linear signal is a fixed point for any lambda.
///
/// The second difference of a linear ramp is identically zero, so no
/// thresholding occurs and the very first primal step is stationary.
#[test]
fn test_linear_signal_is_fixed_point() {
    let y = vec![1.0, 2.0, 3.0, 4.0, 5.0];

    for lambda in [0.0, 1.0, 10.0] {
        let result = L1tf::new()
            .lambda(lambda)
            .build()
            .unwrap()
            .fit(&y)
            .unwrap();

        assert!(result.converged, "lambda={lambda} should converge");
        assert_eq!(
            result.iterations_used, 1,
            "First step should already be stationary"
        );
        for (fitted, orig) in result.y.iter().zip(y.iter()) {
            assert_abs_diff_eq!(*fitted, *orig, epsilon = 1e-8);
        }
    }
}

/// Test the zero-iteration edge case.
///
/// A cap of zero performs no work and returns the input unchanged.
#[test]
fn test_zero_iterations_returns_input() {
    let y = vec![3.0, -1.0, 4.0, -1.0, 5.0];

    let result = L1tf::new()
        .iter_max(0)
        .build()
        .unwrap()
        .fit(&y)
        .unwrap();

    assert_eq!(result.y, y, "Zero-iteration output should equal the input");
    assert_eq!(result.iterations_used, 0);
    assert_eq!(result.max_delta, None);
    assert!(!result.converged);
}

/// Test smoothing of an isolated spike.
///
/// The trend must converge, change by less than the scaled tolerance on
/// the final step, and have strictly smaller amplitude than the spike.
#[test]
fn test_spike_is_smoothed() {
    let y = vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0];

    let result = L1tf::new()
        .rho(1.0)
        .lambda(1.0)
        .iter_max(1000)
        .tolerance(1e-8)
        .build()
        .unwrap()
        .fit(&y)
        .unwrap();

    assert!(result.converged, "Spike solve should converge");
    let delta = result.max_delta.unwrap();
    assert!(delta < 1e-8 * 10.0, "Final step change should be under the bound");
    assert!(
        max_abs(&result.y) < max_abs(&y),
        "Trend amplitude should shrink below the spike"
    );
}

/// Test the minimum valid signal length.
#[test]
fn test_minimum_signal_length() {
    let y: Vec<f64> = vec![1.0, 5.0, 2.0];
    let result = L1tf::new().build().unwrap().fit(&y).unwrap();

    assert_eq!(result.y.len(), 3);
    assert!(result.y.iter().all(|v| v.is_finite()));
}

/// Test that identical runs produce identical output.
///
/// The solver holds no hidden randomness, so results are bitwise
/// reproducible.
#[test]
fn test_determinism() {
    let y = random_walk(60, 42);
    let model = L1tf::new().lambda(2.0).build().unwrap();

    let first = model.fit(&y).unwrap();
    let second = model.fit(&y).unwrap();

    assert_eq!(first.y, second.y, "Repeated solves should match bitwise");
    assert_eq!(first.iterations_used, second.iterations_used);
    assert_eq!(first.max_delta, second.max_delta);
}

/// Test a seeded random walk end to end.
#[test]
fn test_random_walk_smoke() {
    let y = random_walk(120, 7);
    let result = L1tf::new().build().unwrap().fit(&y).unwrap();

    assert_eq!(result.y.len(), y.len());
    assert!(result.y.iter().all(|v| v.is_finite()));
    assert!(result.iterations_used >= 1);
}

/// Test the signed-max tolerance quirk on a negative-dominant signal.
///
/// With signed-max scaling and max(y) < 0 the stopping bound is
/// negative, so the iteration only terminates at the cap; magnitude-max
/// scaling converges normally on the same signal.
#[test]
fn test_tolerance_scaling_quirk() {
    let y = vec![-5.0, -4.0, -3.2, -2.0, -1.0];

    let signed = L1tf::new()
        .tolerance_scaling(SignedMax)
        .tolerance(1e-6)
        .iter_max(50)
        .build()
        .unwrap()
        .fit(&y)
        .unwrap();

    assert!(!signed.converged, "Signed-max bound is negative here");
    assert_eq!(signed.iterations_used, 50, "Should exhaust the cap");

    let magnitude = L1tf::new()
        .tolerance_scaling(MagnitudeMax)
        .tolerance(1e-6)
        .iter_max(5000)
        .build()
        .unwrap()
        .fit(&y)
        .unwrap();

    assert!(magnitude.converged, "Magnitude-max scaling should converge");
}

/// Test the f32 precision path.
#[test]
fn test_f32_smoke() {
    let y: Vec<f32> = vec![0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0];

    let result = L1tf::new()
        .lambda(0.5_f32)
        .tolerance(1e-4_f32)
        .build()
        .unwrap()
        .fit(&y)
        .unwrap();

    assert_eq!(result.y.len(), y.len());
    assert!(result.y.iter().all(|v| v.is_finite()));
}

// ============================================================================
// Diagnostics Tests
// ============================================================================

/// Test that the observer sees every iteration in order.
#[test]
fn test_observer_sees_each_iteration() {
    let y = vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0];
    let model = L1tf::new().iter_max(200).build().unwrap();

    let mut indices = Vec::new();
    let result = model
        .fit_observed(&y, |event| {
            assert_eq!(event.trend.len(), y.len());
            assert!(event.max_delta >= 0.0);
            indices.push(event.index);
        })
        .unwrap();

    assert_eq!(indices.len(), result.iterations_used);
    let expected: Vec<usize> = (0..result.iterations_used).collect();
    assert_eq!(indices, expected, "Indices should be consecutive from zero");
}

/// Test that residuals are returned on request and sum with the trend.
#[test]
fn test_residuals() {
    let y = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0];

    let result = L1tf::new()
        .return_residuals()
        .build()
        .unwrap()
        .fit(&y)
        .unwrap();

    assert!(result.has_residuals());
    let residuals = result.residuals.as_ref().unwrap();
    assert_eq!(residuals.len(), y.len());
    for ((&orig, &fitted), &resid) in y.iter().zip(result.y.iter()).zip(residuals.iter()) {
        assert_abs_diff_eq!(orig, fitted + resid, epsilon = 1e-12);
    }
}

/// Test that the result renders a human-readable summary.
#[test]
fn test_display() {
    let y = vec![0.0, 1.0, 2.0, 3.0, 2.0, 1.0];
    let result = L1tf::new()
        .return_residuals()
        .build()
        .unwrap()
        .fit(&y)
        .unwrap();

    let rendered = format!("{result}");
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("Trend:"));
    assert!(rendered.contains("Residual"));
}
