//! # Litz Calculations
//!
//! Each calculation follows the same pattern:
//!
//! - a calculator struct borrowing the read-only [`ReferenceTables`](crate::tables::ReferenceTables)
//! - a `*Result` / properties type (JSON-serializable)
//! - a pure `compute`/`resolve` method returning `CalcResult`
//!
//! ## Available Calculations
//!
//! - [`construction`] - Bunching/stranding operations for a strand count
//! - [`electrical`] - Bundle area, equivalent solid gauge, DC resistance
//! - [`skin_effect`] - Skin depth and N1 max
//! - [`diameter`] - Bundle diameters over film and serve, part numbers
//! - [`design`] - All of the above for one design, plus advisories

pub mod construction;
pub mod design;
pub mod diameter;
pub mod electrical;
pub mod skin_effect;

// Re-export commonly used types
pub use construction::{ConstructionResolver, ConstructionResult, Factorization};
pub use design::{Advisory, LitzDesignInput, LitzDesignResult};
pub use diameter::{BundleDiameters, NylonServe};
pub use electrical::{ElectricalCalculator, ElectricalProperties};
pub use skin_effect::{N1MaxResult, SkinEffectCalculator};

use crate::errors::{CalcError, CalcResult};

pub(crate) fn validate_strand_count(strand_count: u32) -> CalcResult<()> {
    if strand_count == 0 {
        return Err(CalcError::invalid_input(
            "strand_count",
            strand_count.to_string(),
            "Strand count must be positive",
        ));
    }
    Ok(())
}

pub(crate) fn validate_frequency(frequency_hz: f64) -> CalcResult<()> {
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return Err(CalcError::invalid_input(
            "frequency_hz",
            frequency_hz.to_string(),
            "Frequency must be a positive number",
        ));
    }
    Ok(())
}

pub(crate) fn validate_temperature(temperature_c: f64) -> CalcResult<()> {
    if !temperature_c.is_finite() {
        return Err(CalcError::invalid_input(
            "temperature_c",
            temperature_c.to_string(),
            "Temperature must be a finite number",
        ));
    }
    Ok(())
}
