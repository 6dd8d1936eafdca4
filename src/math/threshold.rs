//! Soft-threshold proximal operator.
//!
//! ## Purpose
//!
//! This module provides the element-wise soft-threshold function, the
//! closed-form proximal operator of the scaled L1 norm. It performs the
//! auxiliary-variable update of the ADMM iteration.
//!
//! ## Design notes
//!
//! * **Formula**: `r_i = a_i - k` if `a_i > k`, `r_i = a_i + k` if
//!   `a_i < -k`, and `r_i = 0` otherwise.
//! * **Vectorized**: Operates element-wise over a slice into a caller
//!   buffer; no allocation, no side effects.
//!
//! ## Invariants
//!
//! * `soft_threshold(0, a)` is the identity.
//! * Odd symmetry: negating the input negates the output.
//! * `|r_i| <= |a_i|` for every element (shrinkage).
//!
//! ## Non-goals
//!
//! * Behavior for `NaN`/`Inf` inputs or a `NaN` threshold is unspecified;
//!   non-finite values are neither detected nor corrected here.

// External dependencies
use num_traits::Float;

// ============================================================================
// Soft Threshold
// ============================================================================

/// Apply the soft threshold with level `threshold` to `values`, writing
/// the shrunk elements into `out`.
///
/// `out` must have the same length as `values`. The threshold is expected
/// to be non-negative; in the solver it is `lambda / rho`.
#[inline]
pub fn soft_threshold<T: Float>(threshold: T, values: &[T], out: &mut [T]) {
    for (out_i, &a) in out.iter_mut().zip(values.iter()) {
        *out_i = if a > threshold {
            a - threshold
        } else if a < -threshold {
            a + threshold
        } else {
            T::zero()
        };
    }
}
