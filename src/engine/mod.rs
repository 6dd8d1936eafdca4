//! Layer 3: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the solve: it validates configuration and
//! input, runs the ADMM fixed-point iteration to convergence or the
//! iteration cap, and assembles the result.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Engine ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// ADMM execution engine.
pub mod executor;

/// Output types for trend-filtering operations.
pub mod output;

/// Validation utilities.
pub mod validator;
