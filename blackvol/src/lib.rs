//! # blackvol
//!
//! Black volatility term structures after QuantLib's `BlackAtmVolCurve`
//! and `BlackVolSurface`.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ql-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! blackvol = "0.1"
//! ```
//!
//! ```rust
//! use blackvol::termstructures::{BlackAtmVolCurve, BlackVolSurface, FlatVolSurface};
//! use blackvol::time::{Actual365Fixed, Date};
//!
//! let today = Date::from_ymd(2025, 1, 2)?;
//! let surface = FlatVolSurface::new(
//!     today,
//!     today + 1825,
//!     0.2,
//!     100.0,
//!     (50.0, 150.0),
//!     Actual365Fixed,
//! )?;
//! assert_eq!(surface.atm_vol_time(1.0, false)?, 0.2);
//! assert!(surface.volatility_time(6.0, 100.0, false).is_err());
//! assert_eq!(surface.volatility_time(6.0, 100.0, true)?, 0.2);
//! # Ok::<(), blackvol::core::Error>(())
//! ```
//!
//! ## Logging
//!
//! With the `logging` feature enabled, range-check rejections and
//! settlement-date resolution are reported at `debug` level and visitor
//! dispatch misses at `warn` level through `tracing`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions, and the acyclic visitor.
pub use ql_core as core;

/// Date, calendar, day counter, and period types.
pub use ql_time as time;

/// Floating-point comparison helpers.
pub use ql_math as math;

/// At-the-money curves and volatility surfaces.
pub use ql_termstructures as termstructures;

// ── Prelude ──────────────────────────────────────────────────────────────────

/// Commonly used items for glob import.
///
/// ```rust
/// use blackvol::prelude::*;
/// ```
pub mod prelude {
    pub use ql_core::{
        AcyclicVisitable, AcyclicVisitor, Error, Natural, Real, Result, ScopedEvaluationDate,
        Settings, Time, Visitor, Volatility,
    };
    pub use ql_termstructures::{
        BlackAtmVolCurve, BlackVolSurface, FlatAtmVolCurve, FlatVolSurface, TermStructure,
        TermStructureData, VolatilityTermStructure,
    };
    pub use ql_time::{
        Actual360, Actual365Fixed, ActualActualIsda, BusinessDayConvention, Calendar, Date,
        DayCounter, NullCalendar, Period, Thirty360, TimeUnit, WeekendsOnly,
    };
}
