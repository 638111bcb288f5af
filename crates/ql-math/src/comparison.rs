//! Floating-point comparison (translates `ql/math/comparison.hpp`).
//!
//! Range checks compare a query time against the maximum time of a curve.
//! Both sides usually come out of a day-count division, so an exact `<=`
//! would reject a query for the last pillar date whenever the two divisions
//! round differently. [`close_enough`] absorbs that rounding.

use ql_core::Real;

/// Tolerance, in multiples of machine epsilon, used by the range checks.
pub const RANGE_TOLERANCE_ULPS: u32 = 42;

/// Return `true` if `a` and `b` differ by at most `n` machine epsilons
/// relative to **either** operand.
///
/// This is the "close enough" relation of QuantLib: the tolerance scales
/// with the larger of the two operands.
#[inline]
pub fn close_enough(a: Real, b: Real, n: u32) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    let tolerance = n as Real * f64::EPSILON;
    diff <= tolerance * a.abs() || diff <= tolerance * b.abs()
}
