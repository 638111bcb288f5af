//! Integration tests for the Black at-the-money curve and the Black
//! volatility surface: date/time agreement, range gating, the surface's
//! at-the-money delegation, and visitor dispatch.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use ql_core::{
    errors::Result, AcyclicVisitable, AcyclicVisitor, Error, Real, ScopedEvaluationDate, Time,
    Visitor, Volatility,
};
use ql_termstructures::{
    BlackAtmVolCurve, BlackVolSurface, FlatAtmVolCurve, FlatVolSurface, TermStructure,
    TermStructureData, VolatilityTermStructure,
};
use ql_time::{Actual365Fixed, Calendar, Date, DayCounter, Period, WeekendsOnly};
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn reference() -> Date {
    date(2025, 1, 2)
}

// ─── Test surface ─────────────────────────────────────────────────────────────

/// A quadratic smile around a drifting forward, counting hook calls.
///
/// `max_time()` is exactly 5.0 and strikes are limited to `[50, 150]`.
#[derive(Debug)]
struct SkewedSurface {
    data: TermStructureData,
    vol_calls: AtomicUsize,
    variance_calls: AtomicUsize,
}

impl SkewedSurface {
    fn new() -> Self {
        Self {
            data: TermStructureData::new(reference(), Actual365Fixed),
            vol_calls: AtomicUsize::new(0),
            variance_calls: AtomicUsize::new(0),
        }
    }

    fn hook_calls(&self) -> usize {
        self.vol_calls.load(Ordering::SeqCst) + self.variance_calls.load(Ordering::SeqCst)
    }

    fn smile(&self, t: Time, strike: Real) -> Volatility {
        let moneyness = strike / self.atm_level_time(t) - 1.0;
        0.18 + 0.4 * moneyness * moneyness + 0.01 * t
    }
}

impl TermStructure for SkewedSurface {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.data.day_counter
    }

    fn calendar(&self) -> &dyn Calendar {
        &*self.data.calendar
    }

    fn max_date(&self) -> Date {
        reference() + 1825
    }

    fn max_time(&self) -> Time {
        5.0
    }
}

impl VolatilityTermStructure for SkewedSurface {
    fn min_strike(&self) -> Real {
        50.0
    }

    fn max_strike(&self) -> Real {
        150.0
    }
}

impl BlackVolSurface for SkewedSurface {
    fn atm_level_time(&self, t: Time) -> Real {
        100.0 * (0.02 * t).exp()
    }

    fn variance_impl(&self, t: Time, strike: Real) -> Real {
        self.variance_calls.fetch_add(1, Ordering::SeqCst);
        let vol = self.smile(t, strike);
        vol * vol * t
    }

    fn vol_impl(&self, t: Time, strike: Real) -> Volatility {
        self.vol_calls.fetch_add(1, Ordering::SeqCst);
        self.smile(t, strike)
    }
}

impl AcyclicVisitable for SkewedSurface {
    fn accept(&self, visitor: &mut AcyclicVisitor<'_>) -> Result<()> {
        visitor.visit(self)
    }
}

/// A surface whose at-the-money level leaves the strike domain.
#[derive(Debug)]
struct RunawayForward(SkewedSurface);

impl TermStructure for RunawayForward {
    fn reference_date(&self) -> Date {
        self.0.reference_date()
    }

    fn day_counter(&self) -> &dyn DayCounter {
        self.0.day_counter()
    }

    fn calendar(&self) -> &dyn Calendar {
        self.0.calendar()
    }

    fn max_date(&self) -> Date {
        self.0.max_date()
    }
}

impl VolatilityTermStructure for RunawayForward {
    fn min_strike(&self) -> Real {
        self.0.min_strike()
    }

    fn max_strike(&self) -> Real {
        self.0.max_strike()
    }
}

impl BlackVolSurface for RunawayForward {
    fn atm_level_time(&self, _t: Time) -> Real {
        400.0
    }

    fn variance_impl(&self, t: Time, strike: Real) -> Real {
        self.0.variance_impl(t, strike)
    }

    fn vol_impl(&self, t: Time, strike: Real) -> Volatility {
        self.0.vol_impl(t, strike)
    }
}

impl AcyclicVisitable for RunawayForward {
    fn accept(&self, visitor: &mut AcyclicVisitor<'_>) -> Result<()> {
        visitor.visit(self)
    }
}

fn flat_curve() -> FlatAtmVolCurve {
    FlatAtmVolCurve::new(reference(), 0.22, Actual365Fixed).with_max_date(reference() + 1825)
}

// ─── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn test_surface_boundary_queries() {
    let surface = SkewedSurface::new();

    assert!(surface.volatility_time(5.0, 150.0, false).is_ok());
    assert!(matches!(
        surface.volatility_time(5.0001, 150.0, false),
        Err(Error::OutOfRange(_))
    ));
    assert!(surface.volatility_time(5.0001, 150.0, true).is_ok());
    assert!(matches!(
        surface.variance_time(1.0, 150.0001, false),
        Err(Error::OutOfRange(_))
    ));
    assert!(surface.variance_time(1.0, 150.0001, true).is_ok());
}

#[test]
fn test_surface_atm_vol_at_one_year() {
    let surface = SkewedSurface::new();
    let forward = surface.atm_level_time(1.0);
    assert_abs_diff_eq!(forward, 102.020_134, epsilon = 1e-6);

    let atm = surface.atm_vol_time(1.0, false).unwrap();
    assert_abs_diff_eq!(atm, 0.19, epsilon = 1e-15);
    assert_eq!(atm, surface.volatility_time(1.0, forward, false).unwrap());

    let variance = surface.atm_variance_time(4.0, false).unwrap();
    assert_abs_diff_eq!(variance, 0.22 * 0.22 * 4.0, epsilon = 1e-14);
}

#[test]
fn test_curve_query_before_reference_fails() {
    let curve = flat_curve();
    let yesterday = reference() - 1;
    assert!(matches!(curve.atm_vol(yesterday, false), Err(Error::OutOfRange(_))));
    assert!(matches!(curve.atm_vol(yesterday, true), Err(Error::OutOfRange(_))));
}

#[test]
fn test_surface_used_through_curve_interface() {
    let surfaces: Vec<Box<dyn BlackVolSurface>> = vec![
        Box::new(SkewedSurface::new()),
        Box::new(
            FlatVolSurface::new(
                reference(),
                reference() + 1825,
                0.3,
                100.0,
                (50.0, 150.0),
                Actual365Fixed,
            )
            .unwrap(),
        ),
    ];
    for surface in &surfaces {
        let atm = surface.atm_vol_time(2.0, false).unwrap();
        let level = surface.atm_level_time(2.0);
        assert_eq!(atm, surface.volatility_time(2.0, level, false).unwrap());
    }

    fn atm_at_three_years(curve: &dyn BlackAtmVolCurve) -> Result<Volatility> {
        curve.atm_vol_time(3.0, false)
    }
    let skewed = SkewedSurface::new();
    assert_abs_diff_eq!(atm_at_three_years(&skewed).unwrap(), 0.21, epsilon = 1e-15);
    assert_eq!(atm_at_three_years(&flat_curve()).unwrap(), 0.22);
}

#[test]
fn test_option_date_from_tenor_on_settlement_surface() {
    let friday = date(2024, 5, 17);
    let surface = {
        let _scope = ScopedEvaluationDate::new(friday.serial());
        FlatVolSurface::with_settlement_days(
            2,
            WeekendsOnly,
            3650,
            0.25,
            100.0,
            (50.0, 150.0),
            Actual365Fixed,
        )
        .unwrap()
    };
    assert_eq!(surface.reference_date(), date(2024, 5, 21));
    // 2024-11-21 is a Thursday; 2025-06-21 is a Saturday, rolled forward
    assert_eq!(
        surface.option_date_from_tenor(Period::months(6)).unwrap(),
        date(2024, 11, 21)
    );
    assert_eq!(
        surface.option_date_from_tenor(Period::months(13)).unwrap(),
        date(2025, 6, 23)
    );
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "outside the strike domain")]
fn test_atm_level_outside_strike_domain_is_a_contract_violation() {
    let surface = RunawayForward(SkewedSurface::new());
    let _ = surface.atm_vol_time(1.0, false);
}

#[test]
fn test_atm_level_past_max_time_is_not_asserted() {
    let surface = RunawayForward(SkewedSurface::new());
    assert!(surface.atm_vol_time(6.0, false).is_err());
    assert!(surface.atm_variance_time(6.0, true).is_ok());
}

// ─── Visitor dispatch ─────────────────────────────────────────────────────────

#[derive(Default)]
struct VolReport {
    lines: Vec<String>,
}

impl Visitor<FlatAtmVolCurve> for VolReport {
    fn visit(&mut self, curve: &FlatAtmVolCurve) {
        self.lines.push(format!("flat curve {}", curve.volatility()));
    }
}

impl Visitor<SkewedSurface> for VolReport {
    fn visit(&mut self, surface: &SkewedSurface) {
        let atm = surface.atm_vol_time(1.0, false).unwrap_or(Volatility::NAN);
        self.lines.push(format!("skewed surface {atm:.2}"));
    }
}

#[test]
fn test_shared_visitor_handles_several_types() {
    let report = RefCell::new(VolReport::default());
    let mut visitor = AcyclicVisitor::new()
        .with_shared_visitor::<FlatAtmVolCurve, _>(&report)
        .with_shared_visitor::<SkewedSurface, _>(&report);

    flat_curve().accept(&mut visitor).unwrap();
    SkewedSurface::new().accept(&mut visitor).unwrap();
    let flat_surface = FlatVolSurface::new(
        reference(),
        reference() + 365,
        0.2,
        100.0,
        (50.0, 150.0),
        Actual365Fixed,
    )
    .unwrap();
    assert_eq!(
        flat_surface.accept(&mut visitor),
        Err(Error::Configuration("not a FlatVolSurface visitor".into()))
    );
    drop(visitor);

    assert_eq!(
        report.into_inner().lines,
        vec!["flat curve 0.22".to_string(), "skewed surface 0.19".to_string()]
    );
}

#[test]
fn test_unsupported_visitor_runs_no_computation() {
    let surface = SkewedSurface::new();
    let mut curve_only = VolReport::default();
    let mut visitor = AcyclicVisitor::new().with_visitor::<FlatAtmVolCurve, _>(&mut curve_only);

    let err = surface.accept(&mut visitor).unwrap_err();
    assert_eq!(err.to_string(), "configuration error: not a SkewedSurface visitor");
    assert_eq!(surface.hook_calls(), 0);
    drop(visitor);
    assert!(curve_only.lines.is_empty());
}

// ─── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_date_and_time_queries_agree(days in -400i32..4_000, extrapolate in any::<bool>()) {
        let surface = SkewedSurface::new();
        let curve = flat_curve();
        let maturity = reference() + days;
        let t = surface.time_from_reference(maturity);
        prop_assert_eq!(t, curve.time_from_reference(maturity));

        prop_assert_eq!(surface.atm_vol(maturity, extrapolate), surface.atm_vol_time(t, extrapolate));
        prop_assert_eq!(
            surface.atm_variance(maturity, extrapolate),
            surface.atm_variance_time(t, extrapolate)
        );
        prop_assert_eq!(
            surface.volatility(maturity, 75.0, extrapolate),
            surface.volatility_time(t, 75.0, extrapolate)
        );
        prop_assert_eq!(
            surface.variance(maturity, 75.0, extrapolate),
            surface.variance_time(t, 75.0, extrapolate)
        );
        prop_assert_eq!(curve.atm_vol(maturity, extrapolate), curve.atm_vol_time(t, extrapolate));
        prop_assert_eq!(
            curve.atm_variance(maturity, extrapolate),
            curve.atm_variance_time(t, extrapolate)
        );
    }

    #[test]
    fn prop_repeated_queries_are_identical(t in 0.0f64..=5.0, strike in 50.0f64..=150.0) {
        let surface = SkewedSurface::new();
        prop_assert_eq!(surface.volatility_time(t, strike, false), surface.volatility_time(t, strike, false));
        prop_assert_eq!(surface.atm_variance_time(t, false), surface.atm_variance_time(t, false));
    }

    #[test]
    fn prop_surface_atm_is_smile_at_atm_level(t in 0.0f64..=5.0) {
        let surface = SkewedSurface::new();
        let level = surface.atm_level_time(t);
        prop_assert_eq!(surface.atm_vol_time(t, false), surface.volatility_time(t, level, false));
        prop_assert_eq!(surface.atm_variance_time(t, false), surface.variance_time(t, level, false));
    }

    #[test]
    fn prop_in_domain_queries_return_the_hook(t in 0.0f64..=5.0, strike in 50.0f64..=150.0) {
        let surface = SkewedSurface::new();
        prop_assert_eq!(surface.volatility_time(t, strike, false).unwrap(), surface.vol_impl(t, strike));
        prop_assert_eq!(surface.variance_time(t, strike, true).unwrap(), surface.variance_impl(t, strike));
    }

    #[test]
    fn prop_range_failures_run_no_hook(
        late in 5.001f64..100.0,
        early in -100.0f64..-1e-12,
        strike in 150.001f64..1_000.0,
    ) {
        let surface = SkewedSurface::new();
        prop_assert!(surface.atm_vol_time(late, false).is_err());
        prop_assert!(surface.atm_variance_time(late, false).is_err());
        prop_assert!(surface.atm_vol_time(early, true).is_err());
        prop_assert!(surface.volatility_time(early, 100.0, true).is_err());
        prop_assert!(surface.variance_time(1.0, strike, false).is_err());
        prop_assert!(surface.volatility_time(late, 100.0, false).is_err());
        prop_assert_eq!(surface.hook_calls(), 0);
    }

    #[test]
    fn prop_visitor_dispatch_runs_handler_once(repeats in 1usize..8) {
        let surface = SkewedSurface::new();
        let mut seen = 0usize;
        let mut visitor = AcyclicVisitor::new().on(|_: &SkewedSurface| seen += 1);
        for _ in 0..repeats {
            prop_assert!(surface.accept(&mut visitor).is_ok());
            prop_assert!(flat_curve().accept(&mut visitor).is_err());
        }
        drop(visitor);
        prop_assert_eq!(seen, repeats);
    }
}
