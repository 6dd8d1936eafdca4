//! Linear algebra backend abstraction for the trend filter.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the linear-algebra
//! operations the solver needs, standardizing on the nalgebra backend.
//!
//! ## Design notes
//!
//! * The only heavyweight operation is the one-per-solve inversion of the
//!   system matrix `M = I + rho * D^T D`. It is inverted through a QR
//!   decomposition, with a pseudo-inverse fallback for conditioning edge
//!   cases.
//! * `M` is always positive definite for `rho > 0` because `D^T D` is
//!   positive semidefinite, so the fallback is a safety net rather than an
//!   expected path.
//! * Generic over `SolverLinalg` types (f32 and f64) which delegate to
//!   nalgebra and to the per-type operator cache.
//! * Matrices cross this boundary as flat row-major slices; the
//!   per-iteration matrix-vector product stays a plain slice loop.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::difference::cache;

// ============================================================================
// SolverLinalg Trait
// ============================================================================

/// Helper trait to bridge generic `Float` types to the nalgebra backend
/// and the per-type operator cache.
pub trait SolverLinalg: Float + 'static {
    /// Fetch the dense `(n-2) x n` second-difference matrix for signal
    /// length `n`, row-major. Memoized per process when `std` is enabled.
    fn second_difference(n: usize) -> Arc<[Self]>;

    /// Invert the system matrix `I + rho * D^T D`, where `d` is the flat
    /// row-major `rows x cols` difference matrix. Returns the flat
    /// row-major `cols x cols` inverse, or `None` if inversion fails.
    fn invert_system(d: &[Self], rows: usize, cols: usize, rho: Self) -> Option<Vec<Self>>;
}

impl SolverLinalg for f64 {
    #[inline]
    fn second_difference(n: usize) -> Arc<[Self]> {
        cache::fetch_f64(n)
    }
    #[inline]
    fn invert_system(d: &[Self], rows: usize, cols: usize, rho: Self) -> Option<Vec<Self>> {
        nalgebra_backend::invert_system_f64(d, rows, cols, rho)
    }
}

impl SolverLinalg for f32 {
    #[inline]
    fn second_difference(n: usize) -> Arc<[Self]> {
        cache::fetch_f32(n)
    }
    #[inline]
    fn invert_system(d: &[Self], rows: usize, cols: usize, rho: Self) -> Option<Vec<Self>> {
        nalgebra_backend::invert_system_f32(d, rows, cols, rho)
    }
}

// ============================================================================
// Dense Matrix-Vector Product
// ============================================================================

/// Multiply a flat row-major square matrix by a vector: `out = a * x`.
///
/// `a` has length `x.len() * out.len()`; used each iteration to apply the
/// precomputed system inverse.
#[inline]
pub fn dense_matvec<T: Float>(a: &[T], x: &[T], out: &mut [T]) {
    let n = x.len();
    for (i, out_i) in out.iter_mut().enumerate() {
        let row = &a[i * n..(i + 1) * n];
        let mut acc = T::zero();
        for (&a_ij, &x_j) in row.iter().zip(x.iter()) {
            acc = acc + a_ij * x_j;
        }
        *out_i = acc;
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use super::*;
    use nalgebra::DMatrix;

    /// Invert the system matrix `I + rho * D^T D` using f64 precision.
    pub fn invert_system_f64(d: &[f64], rows: usize, cols: usize, rho: f64) -> Option<Vec<f64>> {
        let d = DMatrix::from_row_slice(rows, cols, d);
        let system = DMatrix::identity(cols, cols) + (d.transpose() * &d) * rho;

        let qr = system.clone().qr();
        let identity = DMatrix::identity(cols, cols);
        if let Some(inv) = qr.solve(&identity) {
            return Some(inv.transpose().as_slice().to_vec());
        }

        system
            .pseudo_inverse(f64::EPSILON * 100.0)
            .ok()
            .map(|inv: DMatrix<f64>| inv.transpose().as_slice().to_vec())
    }

    /// Invert the system matrix `I + rho * D^T D` using f32 precision.
    pub fn invert_system_f32(d: &[f32], rows: usize, cols: usize, rho: f32) -> Option<Vec<f32>> {
        let d = DMatrix::from_row_slice(rows, cols, d);
        let system = DMatrix::identity(cols, cols) + (d.transpose() * &d) * rho;

        let qr = system.clone().qr();
        let identity = DMatrix::identity(cols, cols);
        if let Some(inv) = qr.solve(&identity) {
            return Some(inv.transpose().as_slice().to_vec());
        }

        system
            .pseudo_inverse(f32::EPSILON * 100.0)
            .ok()
            .map(|inv: DMatrix<f32>| inv.transpose().as_slice().to_vec())
    }
}
