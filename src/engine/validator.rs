//! Input validation for trend-filter configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for solver parameters and
//! input signals. It checks requirements such as minimum signal length
//! and parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered, and
//!   runs before any computation starts; no partial solve is attempted.
//! * **Generics**: Validation is generic over `Float` types.
//! * **No clamping**: Invalid parameters are rejected, never silently
//!   adjusted.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: rho must be positive; lambda and tolerance
//!   must be non-negative; all three must be finite.
//! * **Signal Length**: At least 3 samples, so a second difference exists.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * Signal *values* are not inspected: a signal containing `NaN`/`Inf`
//!   passes validation and yields unspecified output (documented rather
//!   than guarded).
//! * This module does not perform the solve itself.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::difference::MIN_SIGNAL_LEN;
use crate::primitives::errors::L1tfError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for trend-filter configuration and input data.
///
/// Provides static methods for validating solver parameters and input
/// signals. All methods return `Result<(), L1tfError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate the input signal length.
    ///
    /// Signal values are deliberately not checked for finiteness; see the
    /// module documentation.
    pub fn validate_signal<T: Float>(y: &[T]) -> Result<(), L1tfError> {
        if y.is_empty() {
            return Err(L1tfError::EmptyInput);
        }
        if y.len() < MIN_SIGNAL_LEN {
            return Err(L1tfError::TooFewPoints {
                got: y.len(),
                min: MIN_SIGNAL_LEN,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the ADMM step parameter rho.
    pub fn validate_rho<T: Float>(rho: T) -> Result<(), L1tfError> {
        if !rho.is_finite() || rho <= T::zero() {
            return Err(L1tfError::InvalidRho(rho.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the L1 regularization weight lambda.
    ///
    /// Zero is valid and means no regularization (the fixed point is the
    /// input signal itself).
    pub fn validate_lambda<T: Float>(lambda: T) -> Result<(), L1tfError> {
        if !lambda.is_finite() || lambda < T::zero() {
            return Err(L1tfError::InvalidLambda(
                lambda.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the relative convergence tolerance.
    ///
    /// Zero is valid: the iteration then only terminates at the cap (or
    /// on an exactly stationary step).
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), L1tfError> {
        if !tol.is_finite() || tol < T::zero() {
            return Err(L1tfError::InvalidTolerance(tol.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), L1tfError> {
        if let Some(parameter) = duplicate_param {
            return Err(L1tfError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
