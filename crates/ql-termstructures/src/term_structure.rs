//! `TermStructure` — base trait for all term structures
//! (translates `ql/termstructure.hpp`).
//!
//! Every term structure has a **reference date**, a **day counter**, a
//! **calendar**, and a **maximum date**. Times are always measured from the
//! reference date with the day counter, and the range checks implemented
//! here are the single gate every query goes through before an
//! implementation hook runs.

use ql_core::{ensure_range, errors::Result, Error, Natural, Time};
use ql_math::{close_enough, RANGE_TOLERANCE_ULPS};
use ql_time::{Calendar, Date, DayCounter, NullCalendar};
use std::sync::Arc;

/// Base trait for all term structures.
///
/// Corresponds to `QuantLib::TermStructure`.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which time is zero.
    fn reference_date(&self) -> Date;

    /// The day counter used for date → time conversions.
    fn day_counter(&self) -> &dyn DayCounter;

    /// The calendar used for date adjustments.
    fn calendar(&self) -> &dyn Calendar;

    /// Settlement days used to derive the reference date from the
    /// evaluation date, if the structure was built that way.
    fn settlement_days(&self) -> Option<Natural> {
        None
    }

    /// The latest date for which the structure can be queried without
    /// extrapolation.
    fn max_date(&self) -> Date;

    /// The latest time for which the structure can be queried without
    /// extrapolation.
    fn max_time(&self) -> Time {
        self.time_from_reference(self.max_date())
    }

    /// Whether extrapolation was enabled when the structure was built.
    ///
    /// Queries then behave as if `extrapolate = true` had been passed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Convert a date to a year fraction relative to the reference date.
    ///
    /// All date-based queries go through this method.
    fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter().year_fraction(self.reference_date(), date)
    }

    /// Check that `t` lies in `[0, max_time()]`.
    ///
    /// Negative times are always rejected. Times past the maximum are
    /// accepted only if `extrapolate` is set or
    /// [`allows_extrapolation`](Self::allows_extrapolation) is true.
    ///
    /// # Errors
    /// [`Error::OutOfRange`](ql_core::Error::OutOfRange).
    fn check_range(&self, t: Time, extrapolate: bool) -> Result<()> {
        ensure_range!(t >= 0.0, "negative time ({t}) given");
        let max_time = self.max_time();
        let in_range = extrapolate
            || self.allows_extrapolation()
            || t <= max_time
            || close_enough(t, max_time, RANGE_TOLERANCE_ULPS);
        if !in_range {
            #[cfg(feature = "logging")]
            tracing::debug!(t, max_time, "query time past max curve time");
            return Err(Error::OutOfRange(format!(
                "time ({t}) is past max curve time ({max_time})"
            )));
        }
        Ok(())
    }

    /// Check that `date` lies in `[reference_date(), max_date()]`, with the
    /// same extrapolation rules as [`check_range`](Self::check_range).
    ///
    /// # Errors
    /// [`Error::OutOfRange`](ql_core::Error::OutOfRange).
    fn check_range_date(&self, date: Date, extrapolate: bool) -> Result<()> {
        let reference = self.reference_date();
        ensure_range!(
            date >= reference,
            "date ({date}) before reference date ({reference})"
        );
        let max_date = self.max_date();
        ensure_range!(
            extrapolate || self.allows_extrapolation() || date <= max_date,
            "date ({date}) is past max curve date ({max_date})"
        );
        Ok(())
    }
}

/// Shared state of a term structure: reference date, calendar, day counter,
/// and the extrapolation opt-in.
///
/// Concrete term structures embed it and delegate the [`TermStructure`]
/// accessors to it.
#[derive(Debug, Clone)]
pub struct TermStructureData {
    /// The date at which time is zero.
    pub reference_date: Date,
    /// Calendar for date adjustments.
    pub calendar: Arc<dyn Calendar>,
    /// Day counter for date → time conversions.
    pub day_counter: Arc<dyn DayCounter>,
    /// Settlement days, when the reference date was derived from the
    /// evaluation date.
    pub settlement_days: Option<Natural>,
    /// Whether queries past the maximum date are allowed without an explicit
    /// `extrapolate` flag.
    pub extrapolation: bool,
}

impl TermStructureData {
    /// Build with a fixed reference date and a [`NullCalendar`].
    pub fn new(reference_date: Date, day_counter: impl DayCounter + 'static) -> Self {
        Self {
            reference_date,
            calendar: Arc::new(NullCalendar),
            day_counter: Arc::new(day_counter),
            settlement_days: None,
            extrapolation: false,
        }
    }

    /// Build with a reference date `settlement_days` business days after the
    /// global evaluation date.
    ///
    /// The evaluation date is read once, here; later changes to it do not
    /// move the reference date.
    ///
    /// # Errors
    /// Fails if the evaluation date cannot be resolved or the settlement lag
    /// runs past the last representable date.
    pub fn with_settlement_days(
        settlement_days: Natural,
        calendar: impl Calendar + 'static,
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        let evaluation_date = Date::evaluation_date()?;
        let lag = i32::try_from(settlement_days).map_err(|_| {
            Error::Precondition(format!("settlement days ({settlement_days}) too large"))
        })?;
        let reference_date = calendar.advance_business_days(evaluation_date, lag)?;
        #[cfg(feature = "logging")]
        tracing::debug!(
            settlement_days,
            evaluation_date = %evaluation_date,
            reference_date = %reference_date,
            "reference date resolved from evaluation date"
        );
        Ok(Self {
            reference_date,
            calendar: Arc::new(calendar),
            day_counter: Arc::new(day_counter),
            settlement_days: Some(settlement_days),
            extrapolation: false,
        })
    }

    /// Replace the calendar.
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    /// Allow queries past the maximum date without an explicit
    /// `extrapolate` flag.
    pub fn enable_extrapolation(mut self) -> Self {
        self.extrapolation = true;
        self
    }
}
