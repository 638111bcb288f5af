//! # ql-math
//!
//! Numerical helpers used by the volatility term structures.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Floating-point comparison utilities.
pub mod comparison;

pub use comparison::{close_enough, RANGE_TOLERANCE_ULPS};
