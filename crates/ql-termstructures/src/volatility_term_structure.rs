//! `VolatilityTermStructure` — base trait for strike-dependent volatility
//! term structures (translates `ql/termstructures/voltermstructure.hpp`).
//!
//! Extends [`TermStructure`] with the strike domain, the strike range check,
//! and the conversion of option tenors into expiry dates.

use crate::term_structure::TermStructure;
use ql_core::{errors::Result, Error, Real};
use ql_time::{BusinessDayConvention, Date, Period};

/// Base trait for volatility term structures with a strike axis.
///
/// Corresponds to `QuantLib::VolatilityTermStructure`.
pub trait VolatilityTermStructure: TermStructure {
    /// The business-day convention used for option-expiry adjustments.
    fn business_day_convention(&self) -> BusinessDayConvention {
        BusinessDayConvention::Following
    }

    /// The minimum strike for which the term structure can return vols.
    fn min_strike(&self) -> Real;

    /// The maximum strike for which the term structure can return vols.
    fn max_strike(&self) -> Real;

    /// The expiry date of an option with the given tenor: the reference
    /// date advanced on the calendar and adjusted with
    /// [`business_day_convention`](Self::business_day_convention).
    fn option_date_from_tenor(&self, tenor: Period) -> Result<Date> {
        self.calendar()
            .advance(self.reference_date(), tenor, self.business_day_convention())
    }

    /// Check that `strike` lies in `[min_strike(), max_strike()]`, unless
    /// extrapolation is requested or enabled.
    ///
    /// # Errors
    /// [`Error::OutOfRange`].
    fn check_strike(&self, strike: Real, extrapolate: bool) -> Result<()> {
        if extrapolate || self.allows_extrapolation() {
            return Ok(());
        }
        let (min, max) = (self.min_strike(), self.max_strike());
        if !(min..=max).contains(&strike) {
            #[cfg(feature = "logging")]
            tracing::debug!(strike, min, max, "query strike outside curve domain");
            return Err(Error::OutOfRange(format!(
                "strike ({strike}) is outside the curve domain [{min},{max}]"
            )));
        }
        Ok(())
    }
}
