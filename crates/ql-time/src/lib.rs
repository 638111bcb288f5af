//! # ql-time
//!
//! Date, calendar, day counter, and period types: the reference-date and
//! day-count collaborators consumed by the volatility term structures.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and holiday-free implementations.
pub mod calendar;

/// `Date` type and evaluation-date resolution.
pub mod date;

/// `DayCounter` trait and built-in day-count conventions.
pub mod day_counter;

/// `Period` — a tenor in a `TimeUnit`.
pub mod period;

/// `TimeUnit` — days, weeks, months, years.
pub mod time_unit;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use chrono::Weekday;
pub use date::Date;
pub use day_counter::{Actual360, Actual365Fixed, ActualActualIsda, DayCounter, Thirty360};
pub use period::Period;
pub use time_unit::TimeUnit;
