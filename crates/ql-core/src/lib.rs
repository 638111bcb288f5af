//! # ql-core
//!
//! Core types, traits, and error definitions shared by the volatility
//! term-structure crates.
//!
//! This crate provides the foundational building blocks: primitive type
//! aliases, the error enum with its `ensure!` / `ensure_range!` macros, the
//! acyclic visitor used to dispatch algorithms per concrete term-structure
//! type, and the global `Settings` holding the evaluation date.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_range!` macros.
pub mod errors;

/// Design patterns: acyclic visitor.
pub mod patterns;

/// Global library settings (evaluation date).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Non-negative integer type.
pub type Natural = u32;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use patterns::visitor::{AcyclicVisitable, AcyclicVisitor, Visitor};
pub use settings::{ScopedEvaluationDate, Settings};
