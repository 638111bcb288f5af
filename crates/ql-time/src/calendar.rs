//! `Calendar` trait and the two holiday-free calendars.
//!
//! A calendar knows which dates are business days, adjusts dates according
//! to a [`BusinessDayConvention`], and advances dates by a [`Period`]. This
//! is what resolves a settlement-day offset against the evaluation date and
//! an option tenor into an expiry date.

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use chrono::Weekday;
use ql_core::errors::Result;

/// A financial calendar.
///
/// Corresponds to `QuantLib::Calendar`.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"Weekends Only"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` falls on a Saturday or Sunday.
    fn is_weekend(&self, date: Date) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => self.roll(date, 1),
            BusinessDayConvention::Preceding => self.roll(date, -1),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.roll(date, 1)?;
                if adjusted.month() == date.month() {
                    Ok(adjusted)
                } else {
                    self.roll(date, -1)
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.roll(date, -1)?;
                if adjusted.month() == date.month() {
                    Ok(adjusted)
                } else {
                    self.roll(date, 1)
                }
            }
        }
    }

    /// Step from `date` in direction `step` until a business day is found.
    fn roll(&self, mut date: Date, step: i32) -> Result<Date> {
        while self.is_holiday(date) {
            date = date.add_days(step)?;
        }
        Ok(date)
    }

    /// Advance `date` by `n` business days. `n == 0` adjusts `date` to the
    /// following business day.
    fn advance_business_days(&self, date: Date, n: i32) -> Result<Date> {
        if n == 0 {
            return self.adjust(date, BusinessDayConvention::Following);
        }
        let step = n.signum();
        let mut remaining = n.unsigned_abs();
        let mut current = date;
        while remaining > 0 {
            current = current.add_days(step)?;
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }
        Ok(current)
    }

    /// Advance `date` by `period`.
    ///
    /// Day periods count business days; longer periods move in calendar
    /// time and then adjust the result with `convention`.
    fn advance(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
    ) -> Result<Date> {
        match period.unit {
            TimeUnit::Days => self.advance_business_days(date, period.length),
            unit => {
                let unadjusted = date.advance(period.length, unit)?;
                self.adjust(unadjusted, convention)
            }
        }
    }
}

/// A calendar in which every day is a business day.
///
/// Equivalent to `QuantLib::NullCalendar`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }

    fn is_weekend(&self, _date: Date) -> bool {
        false
    }
}

/// A calendar whose only holidays are Saturdays and Sundays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date)
    }
}
