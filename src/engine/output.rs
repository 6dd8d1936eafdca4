//! Output types and result structures for trend-filtering operations.
//!
//! ## Purpose
//!
//! This module defines the `TrendResult` struct which encapsulates the
//! outputs of a solve: the fitted trend, termination metadata, and
//! optional residuals.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: Optional outputs use `Option<Vec<T>>`.
//! * **Generics**: Results are generic over `Float` types.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Key concepts
//!
//! * **Termination metadata**: iteration count, final step change, and
//!   whether the tolerance was met; cap exhaustion is reported, not
//!   raised.
//!
//! ## Invariants
//!
//! * `y` has the same length as the input signal.
//! * `residuals`, when present, has the same length as `y`.
//! * `max_delta` is `None` exactly when `iterations_used == 0`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization logic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Result Structure
// ============================================================================

/// Output of an L1 trend-filter solve.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendResult<T> {
    /// The fitted piecewise-linear trend (same length as the input).
    pub y: Vec<T>,

    /// Residuals of the fit (input minus trend), if requested.
    pub residuals: Option<Vec<T>>,

    /// Number of iterations actually performed.
    pub iterations_used: usize,

    /// Step change of the last iteration, `None` if no iteration ran.
    pub max_delta: Option<T>,

    /// Whether the tolerance was met before the iteration cap.
    pub converged: bool,

    /// ADMM step parameter used for the solve.
    pub rho_used: T,

    /// Regularization weight used for the solve.
    pub lambda_used: T,
}

impl<T: Float> TrendResult<T> {
    /// Check if residuals were computed.
    pub fn has_residuals(&self) -> bool {
        self.residuals.is_some()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for TrendResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.y.len())?;
        writeln!(f, "  Rho:         {}", self.rho_used)?;
        writeln!(f, "  Lambda:      {}", self.lambda_used)?;
        writeln!(f, "  Iterations:  {}", self.iterations_used)?;
        writeln!(
            f,
            "  Converged:   {}",
            if self.converged { "yes" } else { "no" }
        )?;
        if let Some(delta) = self.max_delta {
            writeln!(f, "  Max change:  {}", delta)?;
        }
        writeln!(f)?;

        writeln!(f, "Trend:")?;
        let has_resid = self.residuals.is_some();
        write!(f, "{:>8} {:>12}", "Index", "Trend")?;
        if has_resid {
            write!(f, " {:>12}", "Residual")?;
        }
        writeln!(f)?;

        let line_width = 21 + if has_resid { 13 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Data rows (show first 10 and last 10 if more than 20 points)
        let n = self.y.len();
        let show_all = n <= 20;
        let rows_to_show: Vec<usize> = if show_all {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8} {:>12.6}", idx, self.y[idx])?;
            if let Some(residuals) = &self.residuals {
                write!(f, " {:>12.6}", residuals[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
