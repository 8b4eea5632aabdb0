//! # Unit Types
//!
//! Type-safe wrappers for the units the engine reports. These are plain f64
//! newtypes so JSON stays clean (just numbers).
//!
//! ## Units
//!
//! - Temperature: degrees Celsius (primary), degrees Fahrenheit (input convenience)
//! - Length: inches (gauge tables), metres (physics), mils (display unit)
//! - Area: circular mils (CMA), square millimetres
//!
//! ## Example
//!
//! ```rust
//! use litz_core::units::{Celsius, Fahrenheit, Inches, Meters};
//!
//! let t: Celsius = Fahrenheit(212.0).into();
//! assert!((t.0 - 100.0).abs() < 1e-12);
//!
//! let d: Meters = Inches(1.0).into();
//! assert!((d.0 - 0.0254).abs() < 1e-15);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{CMA_TO_SQUARE_MM, INCHES_TO_METERS, METERS_TO_MILS};

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * (5.0 / 9.0))
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in the engine's display unit (metres × 1000)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mils(pub f64);

impl From<Inches> for Meters {
    fn from(inches: Inches) -> Self {
        Meters(inches.0 * INCHES_TO_METERS)
    }
}

impl From<Meters> for Mils {
    fn from(m: Meters) -> Self {
        Mils(m.0 * METERS_TO_MILS)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in circular mils
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircularMils(pub f64);

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

impl From<CircularMils> for SquareMillimeters {
    fn from(cma: CircularMils) -> Self {
        SquareMillimeters(cma.0 * CMA_TO_SQUARE_MM)
    }
}
