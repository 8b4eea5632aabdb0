//! Physical constants and fixed conversion factors.
//!
//! Values are the ones the reference spreadsheet uses, not CODATA values.

use std::f64::consts::PI;

/// Vacuum permeability μ₀ = 4π × 10⁻⁷ H/m (spreadsheet cell E6).
pub const VACUUM_PERMEABILITY: f64 = PI * 4e-7;

/// Inches to metres (spreadsheet E16 = diameter × 0.0254).
pub const INCHES_TO_METERS: f64 = 0.0254;

/// Metres to the engine's display length unit (spreadsheet E9 = E8 × 1000).
///
/// The spreadsheet labels this column "mils"; the same factor is applied to
/// every length reported in that unit.
pub const METERS_TO_MILS: f64 = 1000.0;

/// Circular mils to square millimetres.
pub const CMA_TO_SQUARE_MM: f64 = 0.000506707;

/// Minimum total area the line can strand without an engineering review
/// (one AWG 40 strand).
pub const MIN_MANUFACTURABLE_CMA: f64 = 9.61;

/// Single-strand area above which a one-strand "bundle" needs review.
pub const SINGLE_STRAND_REVIEW_CMA: f64 = 4807.0;
