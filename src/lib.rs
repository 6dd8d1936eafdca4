//! # L1TF - L1 Trend Filtering for Rust
//!
//! A compact, production-ready implementation of L1 trend filtering for
//! recovering piecewise-linear trends from noisy one-dimensional signals.
//!
//! ## What is L1 trend filtering?
//!
//! Given a noisy signal `y`, L1 trend filtering estimates a trend `x` by
//! minimizing
//!
//! ```text
//! 0.5 * ||y - x||_2^2 + lambda * ||D x||_1
//! ```
//!
//! where `D` is the second-difference operator. The squared-error term
//! keeps the trend close to the data, while the L1 penalty on the
//! discrete second derivative drives most curvature to exactly zero. The
//! result is a *piecewise-linear* fit whose kinks are placed by the data,
//! a sharper alternative to quadratic (Hodrick-Prescott) smoothing when
//! the underlying trend has distinct regime changes.
//!
//! **Common applications:**
//! - Trend extraction in financial and economic time series
//! - Segmenting sensor readings into linear regimes
//! - Baseline estimation in scientific measurements
//! - Denoising signals that are well described by a few slopes
//!
//! **How the solver works:**
//!
//! The problem is solved with the Alternating Direction Method of
//! Multipliers (ADMM), splitting the objective with the constraint
//! `z = D x`:
//!
//! 1. Primal update: `x <- M^-1 (y + rho * D^T (z - u))`, where
//!    `M = I + rho * D^T D` is inverted once per solve.
//! 2. Auxiliary update: `z <- soft_threshold(lambda / rho, D x + u)`.
//! 3. Dual update: `u <- u + D x - z`.
//! 4. Stop when the largest per-sample change of `x` falls below the
//!    scaled tolerance, or at the iteration cap.
//!
//! ## Quick Start
//!
//! ```rust
//! use l1tf_rs::prelude::*;
//!
//! // A noisy signal with a kink in the middle.
//! let y = vec![0.1, 1.0, 2.1, 2.9, 4.0, 3.1, 2.0, 1.1, 0.0];
//!
//! // Build the model.
//! let model = L1tf::new()
//!     .lambda(1.0)    // Regularization weight
//!     .build()?;
//!
//! // Fit the model to the signal.
//! let result = model.fit(&y)?;
//!
//! assert_eq!(result.y.len(), y.len());
//! println!("{}", result);
//! # Result::<(), L1tfError>::Ok(())
//! ```
//!
//! ### Full Features
//!
//! ```rust
//! use l1tf_rs::prelude::*;
//!
//! let y = vec![1.0, 2.2, 2.9, 4.1, 5.0, 6.2, 6.8, 8.1];
//!
//! let model = L1tf::new()
//!     .rho(1.0)                          // ADMM step parameter
//!     .lambda(2.0)                       // Regularization weight
//!     .iter_max(2000)                    // Iteration cap
//!     .tolerance(1e-10)                  // Relative stopping tolerance
//!     .tolerance_scaling(MagnitudeMax)   // Scale tolerance by max(|y|)
//!     .return_residuals()                // Include residuals in output
//!     .build()?;
//!
//! let result = model.fit(&y)?;
//!
//! println!("iterations: {}", result.iterations_used);
//! assert!(result.has_residuals());
//! # Result::<(), L1tfError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `fit` returns a `Result<TrendResult<T>, L1tfError>`. The `?` operator
//! is idiomatic, but results can also be handled explicitly:
//!
//! ```rust
//! use l1tf_rs::prelude::*;
//! # let y = vec![0.0, 1.0, 2.0, 3.0, 4.0];
//!
//! let model = L1tf::new().build()?;
//!
//! match model.fit(&y) {
//!     Ok(result) => println!("Trend: {:?}", result.y),
//!     Err(e) => eprintln!("Fitting failed: {}", e),
//! }
//! # Result::<(), L1tfError>::Ok(())
//! ```
//!
//! Reaching the iteration cap is *not* an error: the current estimate is
//! returned with `converged == false` and the final `max_delta`, so the
//! caller can judge solution quality.
//!
//! ### Observing the Iteration
//!
//! The solver can report each iteration to a synchronous observer, for
//! live plotting or logging by the caller. The observer cannot pause or
//! abort the solve.
//!
//! ```rust
//! use l1tf_rs::prelude::*;
//! # let y = vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0];
//!
//! let model = L1tf::new().iter_max(100).build()?;
//!
//! let mut steps = 0;
//! let result = model.fit_observed(&y, |event| {
//!     assert!(event.max_delta >= 0.0);
//!     assert_eq!(event.trend.len(), y.len());
//!     steps += 1;
//! })?;
//!
//! assert_eq!(steps, result.iterations_used);
//! # Result::<(), L1tfError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments. Disable default features to
//! remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! l1tf-rs = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, the process-wide operator cache is unavailable and the
//! second-difference matrix is rebuilt per solve.
//!
//! ## Parameters
//!
//! All builder parameters have sensible defaults. You only need to
//! specify what you want to change.
//!
//! | Parameter             | Default     | Range      | Description                                   |
//! |-----------------------|-------------|------------|-----------------------------------------------|
//! | **rho**               | 1.0         | (0, inf)   | ADMM step parameter                           |
//! | **lambda**            | 1.0         | [0, inf)   | L1 penalty on the second derivative           |
//! | **iter_max**          | 1000        | [0, inf)   | Iteration cap (0 returns the input unchanged) |
//! | **tolerance**         | 1e-8        | [0, inf)   | Relative stopping tolerance                   |
//! | **tolerance_scaling** | `SignedMax` | 2 options  | How the tolerance is scaled by the signal     |
//! | **return_residuals**  | false       | true/false | Include residuals in the output               |
//!
//! ### Choosing lambda
//!
//! - **0**: No regularization; the fixed point is the input itself.
//! - **Small** (relative to the noise scale): light smoothing, many kinks.
//! - **Large**: few kinks; in the limit, a single straight line.
//!
//! Lambda selection is left to the caller (for example by cross-validation
//! over a grid of candidates); the solver treats it as a fixed input.
//!
//! ### Choosing rho
//!
//! `rho` trades off primal and dual progress and affects only the path to
//! the solution, not the solution itself. The default of 1.0 is robust
//! for typical signal scales; convergence for poorly scaled data is
//! usually better addressed by rescaling the signal than by tuning `rho`.
//!
//! ### Tolerance scaling
//!
//! The stopping bound is `tolerance * scale(y)`:
//!
//! - [`ToleranceScaling::SignedMax`] (default) uses `max(y)`, matching
//!   the reference formulation of this filter. Note the asymmetry: for a
//!   signal whose maximum is small or negative the bound tightens, and
//!   for `max(y) <= 0` the iteration only stops at the cap.
//! - [`ToleranceScaling::MagnitudeMax`] uses `max(|y|)`, which is
//!   symmetric under sign flips of the input.
//!
//! ## Edge Cases
//!
//! - **`iter_max = 0`** performs no iterations and returns the input
//!   unchanged (`converged == false`, `max_delta == None`). This is a
//!   documented degenerate case, not an error.
//! - **Signals shorter than 3 samples** are rejected: no second
//!   difference exists.
//! - **Non-finite input values** (`NaN`/`Inf`) are not inspected or
//!   clamped; the output is unspecified. Parameters, by contrast, are
//!   strictly validated at `build()`.
//!
//! ## References
//!
//! - Kim, S.-J., Koh, K., Boyd, S. & Gorinevsky, D. (2009). "l1 Trend
//!   Filtering". SIAM Review 51(2).
//! - Boyd, S. et al. (2011). "Distributed Optimization and Statistical
//!   Learning via the Alternating Direction Method of Multipliers".
//!   Foundations and Trends in Machine Learning 3(1).
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - error types and reporting conventions.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the second-difference operator and its process-wide cache,
// the soft-threshold proximal operator, and the nalgebra-backed linear
// algebra used for the per-solve system inverse.
mod math;

// Layer 3: Engine - orchestration and execution control.
//
// Contains the ADMM iteration loop, convergence detection, validation,
// and result assembly.
mod engine;

// High-level fluent API for L1 trend filtering.
//
// Provides the `L1tfBuilder` for configuring and running the solver.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard trend-filtering prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use l1tf_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        IterationEvent, L1tfBuilder as L1tf, L1tfError, ToleranceScaling,
        ToleranceScaling::{MagnitudeMax, SignedMax},
        TrendModel, TrendResult, DEFAULT_ITER_MAX, DEFAULT_TOLERANCE,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing
/// purposes. It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change
/// without notice. Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
