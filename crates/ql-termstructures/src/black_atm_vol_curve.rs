//! `BlackAtmVolCurve` — at-the-money Black volatility curves
//! (translates `ql/termstructures/blackatmvolcurve.hpp`).
//!
//! Provides the `BlackAtmVolCurve` trait and `FlatAtmVolCurve`.
//!
//! Volatilities are expressed on an annual basis; variances are total
//! variances over `[0, t]`.

use crate::term_structure::{TermStructure, TermStructureData};
use ql_core::{
    errors::Result, AcyclicVisitable, AcyclicVisitor, Natural, Real, Time, Volatility,
};
use ql_time::{Calendar, Date, DayCounter};

/// An at-the-money Black volatility curve.
///
/// Implementors provide the two calculation hooks; the public queries
/// perform the range check first and call the hooks only if it passes, so
/// the hooks may assume the time is valid (or that extrapolation was
/// requested). The date-based queries convert with
/// [`time_from_reference`](TermStructure::time_from_reference) and then run
/// exactly the time-based path.
///
/// Every [`BlackVolSurface`](crate::BlackVolSurface) is a `BlackAtmVolCurve`
/// through a blanket implementation.
///
/// Corresponds to `QuantLib::BlackAtmVolCurve`.
pub trait BlackAtmVolCurve: TermStructure + AcyclicVisitable {
    /// At-the-money variance at time `t`; range already checked.
    fn atm_variance_impl(&self, t: Time) -> Real;

    /// At-the-money volatility at time `t`; range already checked.
    fn atm_vol_impl(&self, t: Time) -> Volatility;

    /// At-the-money volatility for an option expiring on `maturity`.
    fn atm_vol(&self, maturity: Date, extrapolate: bool) -> Result<Volatility> {
        let t = self.time_from_reference(maturity);
        self.atm_vol_time(t, extrapolate)
    }

    /// At-the-money volatility for an option expiring at time `t`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`](ql_core::Error::OutOfRange) if `t` is negative,
    /// or past [`max_time`](TermStructure::max_time) without extrapolation.
    fn atm_vol_time(&self, t: Time, extrapolate: bool) -> Result<Volatility> {
        self.check_range(t, extrapolate)?;
        Ok(self.atm_vol_impl(t))
    }

    /// At-the-money variance for an option expiring on `maturity`.
    fn atm_variance(&self, maturity: Date, extrapolate: bool) -> Result<Real> {
        let t = self.time_from_reference(maturity);
        self.atm_variance_time(t, extrapolate)
    }

    /// At-the-money variance for an option expiring at time `t`.
    ///
    /// # Errors
    /// Same as [`atm_vol_time`](Self::atm_vol_time).
    fn atm_variance_time(&self, t: Time, extrapolate: bool) -> Result<Real> {
        self.check_range(t, extrapolate)?;
        Ok(self.atm_variance_impl(t))
    }
}

// ── FlatAtmVolCurve ───────────────────────────────────────────────────────────

/// A constant at-the-money volatility curve.
///
/// `σ_atm(t) = constant` and `variance(t) = σ²·t`, up to a configurable
/// maximum date (the last representable date by default).
#[derive(Debug, Clone)]
pub struct FlatAtmVolCurve {
    data: TermStructureData,
    volatility: Volatility,
    max_date: Date,
}

impl FlatAtmVolCurve {
    /// Create a flat curve with a fixed reference date.
    pub fn new(
        reference_date: Date,
        volatility: Volatility,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self::from_data(TermStructureData::new(reference_date, day_counter), volatility)
    }

    /// Create a flat curve whose reference date is `settlement_days`
    /// business days after the evaluation date.
    pub fn with_settlement_days(
        settlement_days: Natural,
        calendar: impl Calendar + 'static,
        volatility: Volatility,
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        let data = TermStructureData::with_settlement_days(settlement_days, calendar, day_counter)?;
        Ok(Self::from_data(data, volatility))
    }

    /// Create a flat curve over existing term-structure data.
    pub fn from_data(data: TermStructureData, volatility: Volatility) -> Self {
        Self {
            data,
            volatility,
            max_date: Date::MAX,
        }
    }

    /// Restrict the curve to dates up to `max_date`.
    pub fn with_max_date(mut self, max_date: Date) -> Self {
        self.max_date = max_date;
        self
    }

    /// Allow queries past the maximum date without an explicit flag.
    pub fn enable_extrapolation(mut self) -> Self {
        self.data = self.data.enable_extrapolation();
        self
    }

    /// The constant volatility value.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }
}

impl TermStructure for FlatAtmVolCurve {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.data.day_counter
    }

    fn calendar(&self) -> &dyn Calendar {
        &*self.data.calendar
    }

    fn settlement_days(&self) -> Option<Natural> {
        self.data.settlement_days
    }

    fn max_date(&self) -> Date {
        self.max_date
    }

    fn allows_extrapolation(&self) -> bool {
        self.data.extrapolation
    }
}

impl BlackAtmVolCurve for FlatAtmVolCurve {
    fn atm_variance_impl(&self, t: Time) -> Real {
        self.volatility * self.volatility * t
    }

    fn atm_vol_impl(&self, _t: Time) -> Volatility {
        self.volatility
    }
}

impl AcyclicVisitable for FlatAtmVolCurve {
    fn accept(&self, visitor: &mut AcyclicVisitor<'_>) -> Result<()> {
        visitor.visit(self)
    }
}
