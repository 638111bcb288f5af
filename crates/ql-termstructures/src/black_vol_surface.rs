//! `BlackVolSurface` — Black volatility (smile) surfaces
//! (translates `ql/termstructures/blackvolsurface.hpp`).
//!
//! A surface adds a strike axis to the at-the-money curve. Its
//! at-the-money behaviour is not implemented separately: every surface is a
//! [`BlackAtmVolCurve`] whose hooks evaluate the smile at the surface's
//! at-the-money level,
//!
//! ```text
//! atm_vol_impl(t)      = vol_impl(t, atm_level_time(t))
//! atm_variance_impl(t) = variance_impl(t, atm_level_time(t))
//! ```
//!
//! Provides the `BlackVolSurface` trait and `FlatVolSurface`.

use crate::black_atm_vol_curve::BlackAtmVolCurve;
use crate::term_structure::{TermStructure, TermStructureData};
use crate::volatility_term_structure::VolatilityTermStructure;
use ql_core::{
    ensure, errors::Result, AcyclicVisitable, AcyclicVisitor, Natural, Real, Time, Volatility,
};
use ql_time::{Calendar, Date, DayCounter};

/// A Black volatility (smile) surface.
///
/// Implementors provide the at-the-money level, the strike domain (through
/// [`VolatilityTermStructure`]) and the two smile hooks. When a hook is
/// called the range check has already been performed, so hooks must not
/// re-check and must assume extrapolation may have been requested.
///
/// # At-the-money level
/// [`atm_level_time`](Self::atm_level_time) must lie in
/// `[min_strike(), max_strike()]` for every time up to
/// [`max_time`](TermStructure::max_time). The at-the-money queries rely on
/// it and do not re-check the strike; debug builds assert it.
///
/// Corresponds to `QuantLib::BlackVolSurface`.
pub trait BlackVolSurface: VolatilityTermStructure + AcyclicVisitable {
    /// The at-the-money level (e.g. the forward) for the given maturity.
    fn atm_level(&self, maturity: Date) -> Real {
        self.atm_level_time(self.time_from_reference(maturity))
    }

    /// The at-the-money level (e.g. the forward) for maturity time `t`.
    fn atm_level_time(&self, t: Time) -> Real;

    /// Black variance at `(t, strike)`; range already checked.
    fn variance_impl(&self, t: Time, strike: Real) -> Real;

    /// Black volatility at `(t, strike)`; range already checked.
    fn vol_impl(&self, t: Time, strike: Real) -> Volatility;

    /// Spot volatility for an option expiring on `maturity`.
    fn volatility(&self, maturity: Date, strike: Real, extrapolate: bool) -> Result<Volatility> {
        let t = self.time_from_reference(maturity);
        self.volatility_time(t, strike, extrapolate)
    }

    /// Spot volatility for an option expiring at time `t`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`](ql_core::Error::OutOfRange) if `t` or `strike`
    /// falls outside the surface domain without extrapolation.
    fn volatility_time(&self, t: Time, strike: Real, extrapolate: bool) -> Result<Volatility> {
        self.check_range_strike(t, strike, extrapolate)?;
        Ok(self.vol_impl(t, strike))
    }

    /// Spot variance for an option expiring on `maturity`.
    fn variance(&self, maturity: Date, strike: Real, extrapolate: bool) -> Result<Real> {
        let t = self.time_from_reference(maturity);
        self.variance_time(t, strike, extrapolate)
    }

    /// Spot variance for an option expiring at time `t`.
    ///
    /// # Errors
    /// Same as [`volatility_time`](Self::volatility_time).
    fn variance_time(&self, t: Time, strike: Real, extrapolate: bool) -> Result<Real> {
        self.check_range_strike(t, strike, extrapolate)?;
        Ok(self.variance_impl(t, strike))
    }

    /// Two-dimensional range check: time, then strike.
    fn check_range_strike(&self, t: Time, strike: Real, extrapolate: bool) -> Result<()> {
        self.check_range(t, extrapolate)?;
        self.check_strike(strike, extrapolate)
    }
}

impl<S: BlackVolSurface + ?Sized> BlackAtmVolCurve for S {
    fn atm_variance_impl(&self, t: Time) -> Real {
        let level = self.atm_level_time(t);
        debug_assert_atm_level(self, t, level);
        self.variance_impl(t, level)
    }

    fn atm_vol_impl(&self, t: Time) -> Volatility {
        let level = self.atm_level_time(t);
        debug_assert_atm_level(self, t, level);
        self.vol_impl(t, level)
    }
}

#[inline]
fn debug_assert_atm_level<S: BlackVolSurface + ?Sized>(surface: &S, t: Time, level: Real) {
    debug_assert!(
        t > surface.max_time() || (surface.min_strike()..=surface.max_strike()).contains(&level),
        "atm level ({level}) at time {t} outside the strike domain [{},{}]",
        surface.min_strike(),
        surface.max_strike()
    );
}

// ── FlatVolSurface ────────────────────────────────────────────────────────────

/// A flat Black volatility surface over a bounded strike domain.
///
/// `σ(t, K) = constant` for `K` in `[min_strike, max_strike]`, with a
/// constant at-the-money level. Queries outside the strike domain or past
/// the maximum date fail unless extrapolation is requested.
#[derive(Debug, Clone)]
pub struct FlatVolSurface {
    data: TermStructureData,
    volatility: Volatility,
    atm_level: Real,
    strikes: (Real, Real),
    max_date: Date,
}

impl FlatVolSurface {
    /// Create a flat surface with a fixed reference date.
    ///
    /// # Errors
    /// Fails unless `min_strike <= atm_level <= max_strike` and
    /// `max_date` is after `reference_date`.
    pub fn new(
        reference_date: Date,
        max_date: Date,
        volatility: Volatility,
        atm_level: Real,
        strikes: (Real, Real),
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        let data = TermStructureData::new(reference_date, day_counter);
        Self::from_data(data, max_date, volatility, atm_level, strikes)
    }

    /// Create a flat surface whose reference date is `settlement_days`
    /// business days after the evaluation date; `max_date` is given as a
    /// number of calendar days after that reference date.
    pub fn with_settlement_days(
        settlement_days: Natural,
        calendar: impl Calendar + 'static,
        max_days: i32,
        volatility: Volatility,
        atm_level: Real,
        strikes: (Real, Real),
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        let data = TermStructureData::with_settlement_days(settlement_days, calendar, day_counter)?;
        let max_date = data.reference_date.add_days(max_days)?;
        Self::from_data(data, max_date, volatility, atm_level, strikes)
    }

    /// Create a flat surface over existing term-structure data.
    pub fn from_data(
        data: TermStructureData,
        max_date: Date,
        volatility: Volatility,
        atm_level: Real,
        strikes: (Real, Real),
    ) -> Result<Self> {
        let (min_strike, max_strike) = strikes;
        ensure!(
            min_strike <= max_strike,
            "min strike ({min_strike}) above max strike ({max_strike})"
        );
        ensure!(
            (min_strike..=max_strike).contains(&atm_level),
            "atm level ({atm_level}) outside the strike domain [{min_strike},{max_strike}]"
        );
        ensure!(
            max_date > data.reference_date,
            "max date ({max_date}) not after reference date ({})",
            data.reference_date
        );
        Ok(Self {
            data,
            volatility,
            atm_level,
            strikes,
            max_date,
        })
    }

    /// Allow queries outside the domain without an explicit flag.
    pub fn enable_extrapolation(mut self) -> Self {
        self.data = self.data.enable_extrapolation();
        self
    }

    /// The constant volatility value.
    pub fn volatility_level(&self) -> Volatility {
        self.volatility
    }
}

impl TermStructure for FlatVolSurface {
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

impl VolatilityTermStructure for FlatVolSurface {
    fn min_strike(&self) -> Real {
        self.strikes.0
    }

    fn max_strike(&self) -> Real {
        self.strikes.1
    }
}

impl BlackVolSurface for FlatVolSurface {
    fn atm_level_time(&self, _t: Time) -> Real {
        self.atm_level
    }

    fn variance_impl(&self, t: Time, _strike: Real) -> Real {
        self.volatility * self.volatility * t
    }

    fn vol_impl(&self, _t: Time, _strike: Real) -> Volatility {
        self.volatility
    }
}

impl AcyclicVisitable for FlatVolSurface {
    fn accept(&self, visitor: &mut AcyclicVisitor<'_>) -> Result<()> {
        visitor.visit(self)
    }
}
