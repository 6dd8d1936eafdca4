//! Second-difference operator construction and caching.
//!
//! ## Purpose
//!
//! This module builds the `(n-2) x n` second-difference matrix `D`, where
//! row `i` carries the stencil `[1, -2, 1]` at columns `i..i+2`, so that
//! `D * x` is the discrete second derivative of `x`. It also owns the
//! process-wide, size-keyed cache of built operators.
//!
//! ## Design notes
//!
//! * **Determinism**: The operator is a pure function of the signal length.
//! * **Caching**: One cache per element type, keyed by `n`, populated
//!   lazily and never evicted. Readers share the backing allocation
//!   through `Arc`; first-write is synchronized by a `Mutex`, so
//!   concurrent batch callers never race on construction. The cache
//!   requires `std`; without it the matrix is rebuilt per call.
//! * **Application**: `apply` and `apply_transpose` are fixed-stencil
//!   loops whose results are identical to the dense products `D * v` and
//!   `D^T * w`; the dense matrix itself is kept for the one-per-solve
//!   system assembly and for direct inspection.
//!
//! ## Invariants
//!
//! * `D` has exactly `3 * (n - 2)` nonzero entries.
//! * Operators for equal `n` (and equal element type) share one allocation
//!   for the lifetime of the process (`std` only).
//!
//! ## Non-goals
//!
//! * This module does not exploit the banded structure for the system
//!   solve; the per-iteration linear algebra stays dense.
//! * This module does not bound or evict the cache.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::linalg::SolverLinalg;
use crate::primitives::errors::L1tfError;

/// Minimum signal length for which a second difference exists.
pub const MIN_SIGNAL_LEN: usize = 3;

// ============================================================================
// Operator Construction
// ============================================================================

/// Build the dense row-major `(n-2) x n` second-difference matrix.
///
/// Callers reach this through [`SolverLinalg::second_difference`], which
/// consults the per-type cache first.
pub(crate) fn build_matrix<T: Float>(n: usize) -> Arc<[T]> {
    let rows = n - 2;
    let two = T::one() + T::one();
    let mut data = vec![T::zero(); rows * n];
    for row in 0..rows {
        data[row * n + row] = T::one();
        data[row * n + row + 1] = -two;
        data[row * n + row + 2] = T::one();
    }
    data.into()
}

// ============================================================================
// Operator Cache
// ============================================================================

/// Process-wide, size-keyed operator cache (one map per element type).
pub(crate) mod cache {
    use super::*;

    #[cfg(feature = "std")]
    use std::collections::HashMap;
    #[cfg(feature = "std")]
    use std::sync::{Mutex, OnceLock};

    #[cfg(feature = "std")]
    static CACHE_F64: OnceLock<Mutex<HashMap<usize, Arc<[f64]>>>> = OnceLock::new();

    #[cfg(feature = "std")]
    static CACHE_F32: OnceLock<Mutex<HashMap<usize, Arc<[f32]>>>> = OnceLock::new();

    /// Fetch the f64 operator for length `n`, building and caching on first use.
    pub(crate) fn fetch_f64(n: usize) -> Arc<[f64]> {
        #[cfg(feature = "std")]
        {
            let map = CACHE_F64.get_or_init(|| Mutex::new(HashMap::new()));
            let mut entries = map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(entries.entry(n).or_insert_with(|| build_matrix::<f64>(n)))
        }
        #[cfg(not(feature = "std"))]
        {
            build_matrix::<f64>(n)
        }
    }

    /// Fetch the f32 operator for length `n`, building and caching on first use.
    pub(crate) fn fetch_f32(n: usize) -> Arc<[f32]> {
        #[cfg(feature = "std")]
        {
            let map = CACHE_F32.get_or_init(|| Mutex::new(HashMap::new()));
            let mut entries = map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(entries.entry(n).or_insert_with(|| build_matrix::<f32>(n)))
        }
        #[cfg(not(feature = "std"))]
        {
            build_matrix::<f32>(n)
        }
    }
}

// ============================================================================
// Difference Operator
// ============================================================================

/// The second-difference operator for a fixed signal length.
///
/// Holds a shared handle to the cached dense matrix and applies the
/// operator (and its transpose) without allocating.
#[derive(Debug, Clone)]
pub struct DifferenceOperator<T: SolverLinalg> {
    n: usize,
    data: Arc<[T]>,
}

impl<T: SolverLinalg> DifferenceOperator<T> {
    /// Fetch the operator for signal length `n`.
    ///
    /// # Errors
    ///
    /// Returns [`L1tfError::EmptyInput`] for `n == 0` and
    /// [`L1tfError::TooFewPoints`] for `0 < n < 3`, since no second
    /// difference exists there.
    pub fn new(n: usize) -> Result<Self, L1tfError> {
        if n == 0 {
            return Err(L1tfError::EmptyInput);
        }
        if n < MIN_SIGNAL_LEN {
            return Err(L1tfError::TooFewPoints {
                got: n,
                min: MIN_SIGNAL_LEN,
            });
        }
        Ok(Self {
            n,
            data: T::second_difference(n),
        })
    }

    /// Number of rows, `n - 2`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.n - 2
    }

    /// Number of columns, `n`.
    #[inline]
    pub fn cols(&self) -> usize {
        self.n
    }

    /// The dense row-major matrix backing this operator.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Compute `out = D * v`.
    ///
    /// `v` has length `n`, `out` has length `n - 2`. Equivalent to the
    /// dense product; written as a stencil loop.
    #[inline]
    pub fn apply(&self, v: &[T], out: &mut [T]) {
        let two = T::one() + T::one();
        for (i, out_i) in out.iter_mut().enumerate() {
            *out_i = v[i] - two * v[i + 1] + v[i + 2];
        }
    }

    /// Compute `out = D^T * w`.
    ///
    /// `w` has length `n - 2`, `out` has length `n`. Equivalent to the
    /// dense product; written as a scatter over the stencil.
    #[inline]
    pub fn apply_transpose(&self, w: &[T], out: &mut [T]) {
        let two = T::one() + T::one();
        for out_j in out.iter_mut() {
            *out_j = T::zero();
        }
        for (i, &w_i) in w.iter().enumerate() {
            out[i] = out[i] + w_i;
            out[i + 1] = out[i + 1] - two * w_i;
            out[i + 2] = out[i + 2] + w_i;
        }
    }
}
