//! ADMM execution engine for L1 trend filtering.
//!
//! ## Purpose
//!
//! This module runs the Alternating Direction Method of Multipliers on
//! the trend-filtering objective `0.5 * ||y - x||^2 + lambda * ||D x||_1`.
//! It owns the iteration loop, the convergence check, and the optional
//! per-iteration observer hook.
//!
//! ## Design notes
//!
//! * The system matrix `M = I + rho * D^T D` is assembled and inverted
//!   once per solve call, before the loop; each iteration then costs one
//!   dense matrix-vector product plus stencil and element-wise passes.
//! * The iteration is warm-started from the raw signal (`x0 = y`), so the
//!   first primal step is a well-posed shrinkage of the unfiltered input
//!   rather than a solve from an arbitrary point.
//! * The observer runs synchronously inside the loop and cannot pause or
//!   abort the solve; interactive gating belongs entirely to the caller.
//!
//! ## Key concepts
//!
//! * **Primal update**: `x <- M^-1 (y + rho * D^T (z - u))`.
//! * **Auxiliary update**: `z <- soft_threshold(lambda / rho, D x + u)`.
//! * **Dual update**: `u <- u + D x - z`.
//! * **Stopping rule**: terminate when `max|x - x_prev| < tol * scale(y)`,
//!   where `scale` is set by [`ToleranceScaling`].
//!
//! ## Invariants
//!
//! * `x` has the input length `n`; `z` and `u` have length `n - 2`.
//! * Each iteration depends strictly on the previous one; the loop is
//!   purely sequential.
//! * Both terminal states (converged, cap exhausted) return the current
//!   `x`; exhaustion is not an error.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration parameters (handled by
//!   `validator` at the API boundary).
//! * This module does not inspect signal values: a `NaN`/`Inf` input
//!   propagates through the arithmetic and yields unspecified output.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::difference::DifferenceOperator;
use crate::math::linalg::{dense_matvec, SolverLinalg};
use crate::math::threshold::soft_threshold;
use crate::primitives::errors::L1tfError;

// ============================================================================
// Tolerance Scaling
// ============================================================================

/// How the relative tolerance is scaled into an absolute stopping bound.
///
/// The reference formulation scales the tolerance by the *signed* maximum
/// of the input, `tol * max(y)`. That is asymmetric: for a signal whose
/// largest value is small or negative the bound shrinks (or becomes
/// non-positive, in which case the iteration only stops at the cap). The
/// asymmetry is preserved here as the default and made explicit through
/// this enum rather than silently corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToleranceScaling {
    /// Scale by the signed maximum `max(y)` (reference behavior,
    /// including its negative-dominant quirk).
    #[default]
    SignedMax,

    /// Scale by the magnitude maximum `max(|y|)`.
    MagnitudeMax,
}

impl ToleranceScaling {
    /// Compute the scale factor for the signal `y`.
    pub(crate) fn scale<T: Float>(self, y: &[T]) -> T {
        match self {
            Self::SignedMax => y.iter().copied().fold(T::neg_infinity(), T::max),
            Self::MagnitudeMax => y.iter().fold(T::zero(), |acc, &v| acc.max(v.abs())),
        }
    }
}

// ============================================================================
// Iteration Event
// ============================================================================

/// Snapshot handed to the observer once per completed iteration.
#[derive(Debug)]
pub struct IterationEvent<'a, T> {
    /// Zero-based iteration index.
    pub index: usize,
    /// Current trend estimate (length `n`); valid for the duration of the
    /// callback only.
    pub trend: &'a [T],
    /// Infinity norm of the step change `max|x - x_prev|`.
    pub max_delta: T,
}

// ============================================================================
// Executor Output
// ============================================================================

/// Raw output from ADMM execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOutput<T> {
    /// The final trend estimate (same length as the input).
    pub trend: Vec<T>,

    /// Number of iterations actually performed.
    pub iterations: usize,

    /// Step change of the last iteration, `None` if no iteration ran.
    pub max_delta: Option<T>,

    /// Whether the tolerance was met before the iteration cap.
    pub converged: bool,
}

// ============================================================================
// ADMM Executor
// ============================================================================

/// Configured ADMM solver for one set of parameters.
///
/// Parameters are assumed validated (see `engine::validator`); the
/// executor itself only rejects signals too short for a second
/// difference.
#[derive(Debug, Clone)]
pub struct AdmmExecutor<T: SolverLinalg> {
    /// ADMM step parameter rho (> 0).
    pub rho: T,

    /// L1 regularization weight lambda (>= 0).
    pub lambda: T,

    /// Iteration cap; zero returns the input unchanged.
    pub iter_max: usize,

    /// Relative convergence tolerance (>= 0).
    pub tolerance: T,

    /// How the tolerance is scaled by the input signal.
    pub tolerance_scaling: ToleranceScaling,
}

impl<T: SolverLinalg> AdmmExecutor<T> {
    /// Run the solver on `y`, discarding per-iteration events.
    pub fn run(&self, y: &[T]) -> Result<ExecutorOutput<T>, L1tfError> {
        self.run_observed(y, |_| {})
    }

    /// Run the solver on `y`, invoking `observer` once per iteration.
    ///
    /// The observer is called after the dual update, with the iteration
    /// index, the current trend, and the step change. It runs
    /// synchronously on the solver's thread.
    ///
    /// # Errors
    ///
    /// * [`L1tfError::EmptyInput`] / [`L1tfError::TooFewPoints`] for
    ///   signals shorter than 3 samples.
    /// * [`L1tfError::SingularSystem`] if the system matrix could not be
    ///   inverted (unreachable for validated `rho > 0`).
    pub fn run_observed<F>(&self, y: &[T], mut observer: F) -> Result<ExecutorOutput<T>, L1tfError>
    where
        F: FnMut(IterationEvent<'_, T>),
    {
        let operator = DifferenceOperator::<T>::new(y.len())?;
        let n = operator.cols();
        let m = operator.rows();

        // One-time setup: invert M = I + rho * D^T D for this call.
        let system_inverse = T::invert_system(operator.as_slice(), m, n, self.rho)
            .ok_or(L1tfError::SingularSystem { size: n })?;

        // The stopping bound is fixed from the raw signal before iterating.
        let tolerance_cap = self.tolerance * self.tolerance_scaling.scale(y);
        let ratio = self.lambda / self.rho;

        // State: x warm-started from the signal, z and u at zero.
        let mut x = y.to_vec();
        let mut x_prev = vec![T::zero(); n];
        let mut z = vec![T::zero(); m];
        let mut u = vec![T::zero(); m];
        let mut q = vec![T::zero(); m];
        let mut rhs = vec![T::zero(); n];

        let mut iterations = 0;
        let mut max_delta = None;
        let mut converged = false;

        for index in 0..self.iter_max {
            x_prev.copy_from_slice(&x);

            // Primal update: x = M^-1 (y + rho * D^T (z - u)).
            for (q_i, (&z_i, &u_i)) in q.iter_mut().zip(z.iter().zip(u.iter())) {
                *q_i = z_i - u_i;
            }
            operator.apply_transpose(&q, &mut rhs);
            for (rhs_i, &y_i) in rhs.iter_mut().zip(y.iter()) {
                *rhs_i = y_i + self.rho * *rhs_i;
            }
            dense_matvec(&system_inverse, &rhs, &mut x);

            // Auxiliary update: z = soft_threshold(lambda / rho, D x + u).
            operator.apply(&x, &mut q);
            for (q_i, &u_i) in q.iter_mut().zip(u.iter()) {
                *q_i = *q_i + u_i;
            }
            soft_threshold(ratio, &q, &mut z);

            // Dual update: u = u + D x - z, which is q - z.
            for (u_i, (&q_i, &z_i)) in u.iter_mut().zip(q.iter().zip(z.iter())) {
                *u_i = q_i - z_i;
            }

            // Convergence check on the primal step change.
            let mut delta = T::zero();
            for (&x_i, &prev_i) in x.iter().zip(x_prev.iter()) {
                let change = (x_i - prev_i).abs();
                if change > delta {
                    delta = change;
                }
            }

            iterations = index + 1;
            max_delta = Some(delta);

            observer(IterationEvent {
                index,
                trend: &x,
                max_delta: delta,
            });

            if delta < tolerance_cap {
                converged = true;
                break;
            }
        }

        Ok(ExecutorOutput {
            trend: x,
            iterations,
            max_delta,
            converged,
        })
    }
}
