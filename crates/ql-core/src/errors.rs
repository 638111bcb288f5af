//! Error types for the volatility term-structure workspace.
//!
//! A single `thiserror`-derived enum is shared by every crate. Range checks
//! report [`Error::OutOfRange`], dispatch failures report
//! [`Error::Configuration`], and the collaborators (dates, settings) report
//! [`Error::Date`] or [`Error::Precondition`].

use thiserror::Error;

/// The error type shared across the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Precondition violated (see [`ensure!`](crate::ensure)).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// A time, date or strike falls outside the domain a term structure was
    /// built for, and extrapolation was not requested.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Programming or configuration mistake, e.g. dispatching a visitor to a
    /// type it does not support.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ql_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ql_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::OutOfRange(...))` if `$cond` is false.
///
/// Used by the term-structure range checks.
///
/// # Example
/// ```
/// use ql_core::{ensure_range, errors::Error};
/// fn check(t: f64, max: f64) -> ql_core::errors::Result<()> {
///     ensure_range!(t <= max, "time ({t}) is past max curve time ({max})");
///     Ok(())
/// }
/// assert!(check(1.0, 2.0).is_ok());
/// assert!(matches!(check(3.0, 2.0), Err(Error::OutOfRange(_))));
/// ```
#[macro_export]
macro_rules! ensure_range {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::OutOfRange(
                format!($($msg)*)
            ));
        }
    };
}
