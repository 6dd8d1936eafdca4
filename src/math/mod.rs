//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure mathematical pieces of the trend filter:
//! - The second-difference operator and its process-wide cache
//! - The soft-threshold proximal operator
//! - The linear-algebra backend for the per-solve system inverse
//!
//! These are reusable building blocks with no iteration or orchestration logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Second-difference operator construction and caching.
pub mod difference;

/// Linear algebra backend abstraction.
pub mod linalg;

/// Soft-threshold proximal operator.
pub mod threshold;
