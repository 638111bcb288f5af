//! `Date` type (translates `ql/time/date.hpp`).
//!
//! Dates are stored as a serial number of days, serial 1 being
//! January 1, 1900. Calendar arithmetic is delegated to
//! [`chrono::NaiveDate`]; the serial is what term structures compare and
//! what the global evaluation date is stored as.

use crate::time_unit::TimeUnit;
use chrono::{Datelike, Months, NaiveDate, Weekday};
use ql_core::errors::{Error, Result};
use ql_core::Settings;

/// `NaiveDate::num_days_from_ce` of December 31, 1899 (serial 0).
const EPOCH_DAYS_FROM_CE: i32 = 693_595;

/// A calendar date represented as a serial number.
///
/// Corresponds to `QuantLib::Date`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Date(i32);

impl Date {
    /// The null date sentinel (serial 0).
    pub const NULL: Date = Date(0);

    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    /// Create a date from a serial number.
    pub fn from_serial(serial: i32) -> Result<Self> {
        let d = Date(serial);
        if d < Self::MIN || d > Self::MAX {
            return Err(Error::Date(format!(
                "serial {serial} outside [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(d)
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1900..=2199).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [1900, 2199]"
            )));
        }
        let naive = NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
            .ok_or_else(|| Error::Date(format!("invalid date {year}-{month:02}-{day:02}")))?;
        Ok(Self::from_naive(naive))
    }

    /// Today's date according to the system clock.
    pub fn todays_date() -> Result<Self> {
        let today = chrono::Local::now().date_naive();
        Self::from_naive_checked(today)
    }

    /// The global evaluation date: the date stored in [`Settings`], or
    /// today's date if none has been set.
    pub fn evaluation_date() -> Result<Self> {
        match Settings::instance().evaluation_date_serial() {
            Some(serial) => Self::from_serial(serial),
            None => Self::todays_date(),
        }
    }

    /// Make this date the global evaluation date.
    pub fn set_as_evaluation_date(self) {
        Settings::instance().set_evaluation_date_serial(self.0);
    }

    fn from_naive(naive: NaiveDate) -> Self {
        Date(naive.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
    }

    fn from_naive_checked(naive: NaiveDate) -> Result<Self> {
        Self::from_serial(naive.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
    }

    fn naive(self) -> NaiveDate {
        // Every `Date` other than NULL is built through a validated
        // constructor, so the conversion cannot fail.
        NaiveDate::from_num_days_from_ce_opt(self.0 + EPOCH_DAYS_FROM_CE)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return `true` if this is the null date sentinel.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        self.naive().year() as u16
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.naive().month() as u8
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.naive().day() as u8
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        self.naive().weekday()
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        self.naive().ordinal() as u16
    }

    /// Return `true` if this date falls in a leap year.
    pub fn is_leap_year(&self) -> bool {
        let year = self.year();
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self
            .0
            .checked_add(n)
            .ok_or_else(|| Error::Date(format!("cannot advance {self} by {n} days")))?;
        Self::from_serial(serial)
    }

    /// Advance by `n` units. Month and year steps keep the day of month,
    /// clamped to the length of the target month.
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => {
                let days = n
                    .checked_mul(7)
                    .ok_or_else(|| Error::Date(format!("cannot advance {self} by {n} weeks")))?;
                self.add_days(days)
            }
            TimeUnit::Months => {
                let months = Months::new(n.unsigned_abs());
                let shifted = if n >= 0 {
                    self.naive().checked_add_months(months)
                } else {
                    self.naive().checked_sub_months(months)
                };
                let shifted = shifted
                    .ok_or_else(|| Error::Date(format!("cannot advance {self} by {n} months")))?;
                Self::from_naive_checked(shifted)
            }
            TimeUnit::Years => {
                let months = n
                    .checked_mul(12)
                    .ok_or_else(|| Error::Date(format!("cannot advance {self} by {n} years")))?;
                self.advance(months, TimeUnit::Months)
            }
        }
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "null date");
        }
        write!(f, "{}", self.naive().format("%B %-d, %Y"))
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "Date(null)");
        }
        write!(f, "Date({})", self.naive())
    }
}
