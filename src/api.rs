//! High-level API for L1 trend filtering.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for the trend
//! filter. It implements a fluent builder for configuring the solver
//! parameters and a model type that runs the solve.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called;
//!   the signal is validated at `.fit()`.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Configuration Flow**: `L1tfBuilder::new()` → chained setters →
//!   `.build()` → [`TrendModel`] → `.fit(&y)`.
//! * **Observation**: `.fit_observed(&y, observer)` additionally invokes a
//!   closure once per iteration, for live diagnostics.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt::Debug;

// Internal dependencies
use crate::engine::executor::AdmmExecutor;
use crate::engine::validator::Validator;
use crate::math::linalg::SolverLinalg;

// Publicly re-exported types
pub use crate::engine::executor::{IterationEvent, ToleranceScaling};
pub use crate::engine::output::TrendResult;
pub use crate::primitives::errors::L1tfError;

/// Default iteration cap.
pub const DEFAULT_ITER_MAX: usize = 1000;

/// Default relative convergence tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring the L1 trend filter.
///
/// All parameters have defaults (`rho = 1`, `lambda = 1`,
/// `iter_max = 1000`, `tolerance = 1e-8`, signed-max tolerance scaling),
/// so only deviations need to be specified.
///
/// ```rust
/// use l1tf_rs::prelude::*;
///
/// let y = vec![0.0, 0.1, 0.2, 0.35, 0.4, 0.5];
///
/// let model = L1tf::new()
///     .lambda(0.5)      // Regularization weight
///     .iter_max(500)    // Iteration cap
///     .build()?;
///
/// let result = model.fit(&y)?;
/// assert_eq!(result.y.len(), y.len());
/// # Result::<(), L1tfError>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct L1tfBuilder<T: SolverLinalg + Debug> {
    /// ADMM step parameter rho (> 0).
    pub rho: Option<T>,

    /// L1 regularization weight lambda (>= 0).
    pub lambda: Option<T>,

    /// Iteration cap.
    pub iter_max: Option<usize>,

    /// Relative convergence tolerance (>= 0).
    pub tolerance: Option<T>,

    /// Tolerance scaling rule.
    pub tolerance_scaling: Option<ToleranceScaling>,

    /// Return residuals (input minus trend) in the output.
    pub compute_residuals: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: SolverLinalg + Debug> Default for L1tfBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SolverLinalg + Debug> L1tfBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            rho: None,
            lambda: None,
            iter_max: None,
            tolerance: None,
            tolerance_scaling: None,
            compute_residuals: None,
            duplicate_param: None,
        }
    }

    /// Set the ADMM step parameter rho.
    pub fn rho(mut self, rho: T) -> Self {
        if self.rho.is_some() {
            self.duplicate_param = Some("rho");
        }
        self.rho = Some(rho);
        self
    }

    /// Set the L1 regularization weight lambda.
    ///
    /// Larger values produce flatter, more aggressively regularized
    /// trends; zero reproduces the input.
    pub fn lambda(mut self, lambda: T) -> Self {
        if self.lambda.is_some() {
            self.duplicate_param = Some("lambda");
        }
        self.lambda = Some(lambda);
        self
    }

    /// Set the iteration cap.
    ///
    /// A cap of zero is valid and returns the input unchanged (zero
    /// iterations are performed).
    pub fn iter_max(mut self, iter_max: usize) -> Self {
        if self.iter_max.is_some() {
            self.duplicate_param = Some("iter_max");
        }
        self.iter_max = Some(iter_max);
        self
    }

    /// Set the relative convergence tolerance.
    ///
    /// The iteration stops once the largest per-sample step change falls
    /// below `tolerance` times the signal scale (see
    /// [`tolerance_scaling`](Self::tolerance_scaling)).
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set how the tolerance is scaled by the input signal.
    ///
    /// Defaults to [`ToleranceScaling::SignedMax`], the reference
    /// behavior; see the enum documentation for the asymmetry this
    /// implies.
    pub fn tolerance_scaling(mut self, scaling: ToleranceScaling) -> Self {
        if self.tolerance_scaling.is_some() {
            self.duplicate_param = Some("tolerance_scaling");
        }
        self.tolerance_scaling = Some(scaling);
        self
    }

    /// Include residuals (input minus trend) in the output.
    pub fn return_residuals(mut self) -> Self {
        self.compute_residuals = Some(true);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the model.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for non-positive or non-finite
    /// `rho`, negative or non-finite `lambda` or `tolerance`, or a
    /// parameter configured more than once.
    pub fn build(self) -> Result<TrendModel<T>, L1tfError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let rho = self.rho.unwrap_or_else(T::one);
        let lambda = self.lambda.unwrap_or_else(T::one);
        let tolerance = self
            .tolerance
            .unwrap_or_else(|| T::from(DEFAULT_TOLERANCE).unwrap());

        Validator::validate_rho(rho)?;
        Validator::validate_lambda(lambda)?;
        Validator::validate_tolerance(tolerance)?;

        Ok(TrendModel {
            rho,
            lambda,
            iter_max: self.iter_max.unwrap_or(DEFAULT_ITER_MAX),
            tolerance,
            tolerance_scaling: self.tolerance_scaling.unwrap_or_default(),
            compute_residuals: self.compute_residuals.unwrap_or(false),
        })
    }
}

// ============================================================================
// Model
// ============================================================================

/// A validated trend-filter configuration, ready to fit signals.
///
/// The model is immutable and reusable: independent `fit` calls share
/// only the read-only, process-wide operator cache, so batches of signals
/// may be fitted from multiple threads.
#[derive(Debug, Clone)]
pub struct TrendModel<T: SolverLinalg + Debug> {
    rho: T,
    lambda: T,
    iter_max: usize,
    tolerance: T,
    tolerance_scaling: ToleranceScaling,
    compute_residuals: bool,
}

impl<T: SolverLinalg + Debug> TrendModel<T> {
    /// Fit the trend filter to a signal.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error for signals shorter than 3
    /// samples. Reaching the iteration cap is not an error; inspect
    /// [`TrendResult::converged`] and [`TrendResult::max_delta`] to judge
    /// solution quality.
    ///
    /// Signals containing `NaN`/`Inf` yield unspecified output; values
    /// are not inspected or clamped.
    pub fn fit(&self, y: &[T]) -> Result<TrendResult<T>, L1tfError> {
        self.fit_observed(y, |_| {})
    }

    /// Fit the trend filter, invoking `observer` once per iteration.
    ///
    /// The observer receives the iteration index, the current trend
    /// estimate, and the step change. It runs synchronously and cannot
    /// suspend or abort the solve.
    pub fn fit_observed<F>(&self, y: &[T], observer: F) -> Result<TrendResult<T>, L1tfError>
    where
        F: FnMut(IterationEvent<'_, T>),
    {
        Validator::validate_signal(y)?;

        let executor = AdmmExecutor {
            rho: self.rho,
            lambda: self.lambda,
            iter_max: self.iter_max,
            tolerance: self.tolerance,
            tolerance_scaling: self.tolerance_scaling,
        };
        let output = executor.run_observed(y, observer)?;

        let residuals = if self.compute_residuals {
            Some(
                y.iter()
                    .zip(output.trend.iter())
                    .map(|(&orig, &fitted)| orig - fitted)
                    .collect::<Vec<T>>(),
            )
        } else {
            None
        };

        Ok(TrendResult {
            y: output.trend,
            residuals,
            iterations_used: output.iterations,
            max_delta: output.max_delta,
            converged: output.converged,
            rho_used: self.rho,
            lambda_used: self.lambda,
        })
    }
}
