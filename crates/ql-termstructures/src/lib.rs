//! # ql-termstructures
//!
//! Black volatility term structures: the at-the-money volatility curve and
//! the volatility (smile) surface, together with the term-structure and
//! volatility-term-structure bases they share.
//!
//! Queries are available by date or by time. Date queries convert through
//! the day counter and then take exactly the time path, so both agree to
//! the bit. Every query is range-checked before the implementation hook
//! runs; failures are reported as [`ql_core::Error::OutOfRange`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `TermStructure` — base trait for all term structures.
pub mod term_structure;

/// `VolatilityTermStructure` — strike domain and option-tenor conversion.
pub mod volatility_term_structure;

/// `BlackAtmVolCurve` — at-the-money Black volatility curves and
/// `FlatAtmVolCurve`.
pub mod black_atm_vol_curve;

/// `BlackVolSurface` — Black volatility smile surfaces and `FlatVolSurface`.
pub mod black_vol_surface;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use black_atm_vol_curve::{BlackAtmVolCurve, FlatAtmVolCurve};
pub use black_vol_surface::{BlackVolSurface, FlatVolSurface};
pub use term_structure::{TermStructure, TermStructureData};
pub use volatility_term_structure::VolatilityTermStructure;
