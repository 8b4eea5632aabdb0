//! # Skin Effect / N1 Max
//!
//! Skin depth of the strand metal at the operating frequency, and the
//! largest strand count per bunch ("N1 max") the classical litz design rule
//! recommends for a strand of the given gauge.
//!
//! ## Formulas
//!
//! - ρ(T) from [`TemperatureModel::resistivity_at`]
//! - δ = √(ρ(T) / (π × f × μ₀)) in metres
//! - N1 max = ⌊4 × δ² / d²⌋ with d the bare strand diameter in metres
//!
//! The floor truncates toward zero like the spreadsheet's `ROUNDDOWN(x, 0)`.
//! N1 max is advisory output; nothing else in the engine enforces it.
//!
//! ## Example
//!
//! ```rust
//! use litz_core::calculations::skin_effect::SkinEffectCalculator;
//! use litz_core::tables::ReferenceTables;
//!
//! let calc = SkinEffectCalculator::new(ReferenceTables::standard().unwrap());
//! let result = calc.compute(40, 1200.0, 60.0).unwrap();
//! assert_eq!(result.n1_max, 2710);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{validate_frequency, validate_temperature};
use crate::constants::VACUUM_PERMEABILITY;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConductorMaterial, TemperatureModel};
use crate::tables::ReferenceTables;
use crate::units::{Inches, Meters, Mils};

/// Skin depth and optimum strand count for one gauge/frequency/temperature.
///
/// ## JSON Example
///
/// ```json
/// {
///   "skin_depth_mils": 2.0497,
///   "strand_diameter_mils": 0.07874,
///   "n1_max": 2710,
///   "skin_depth_m": 0.0020497,
///   "strand_diameter_in": 0.0031,
///   "corrected_resistivity": 1.990384e-8
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct N1MaxResult {
    /// Skin depth in the display unit (metres × 1000)
    pub skin_depth_mils: f64,

    /// Bare strand diameter in the same unit as `skin_depth_mils`
    pub strand_diameter_mils: f64,

    /// Recommended maximum strands per bunch
    pub n1_max: u64,

    /// Skin depth (m)
    pub skin_depth_m: f64,

    /// Bare strand diameter (in)
    pub strand_diameter_in: f64,

    /// Temperature-corrected resistivity (Ω·m)
    pub corrected_resistivity: f64,
}

/// Skin depth δ = √(ρ / (π f μ₀)) in metres.
pub fn skin_depth_m(resistivity: f64, frequency_hz: f64) -> f64 {
    (resistivity / (PI * VACUUM_PERMEABILITY * frequency_hz)).sqrt()
}

/// ⌊4 × δ² / d²⌋ for lengths in the same unit.
pub fn n1_max(skin_depth: f64, strand_diameter: f64) -> u64 {
    (4.0 * (skin_depth * skin_depth) / (strand_diameter * strand_diameter)).floor() as u64
}

/// Skin-effect calculator bound to a set of reference tables.
#[derive(Debug, Clone, Copy)]
pub struct SkinEffectCalculator<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> SkinEffectCalculator<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        SkinEffectCalculator { tables }
    }

    /// N1 max for the tables' conductor at `temperature_c`.
    pub fn compute(&self, gauge: u32, frequency_hz: f64, temperature_c: f64) -> CalcResult<N1MaxResult> {
        self.compute_with_model(&self.tables.temperature, gauge, frequency_hz, temperature_c)
    }

    /// N1 max for a strand of another metal.
    pub fn compute_for_material(
        &self,
        material: ConductorMaterial,
        gauge: u32,
        frequency_hz: f64,
        temperature_c: f64,
    ) -> CalcResult<N1MaxResult> {
        self.compute_with_model(&material.temperature_model(), gauge, frequency_hz, temperature_c)
    }

    fn compute_with_model(
        &self,
        model: &TemperatureModel,
        gauge: u32,
        frequency_hz: f64,
        temperature_c: f64,
    ) -> CalcResult<N1MaxResult> {
        validate_frequency(frequency_hz)?;
        validate_temperature(temperature_c)?;
        let entry = self.tables.lookup(gauge)?;

        let corrected_resistivity = model.resistivity_at(temperature_c);
        if !(corrected_resistivity > 0.0) {
            return Err(CalcError::invalid_input(
                "temperature_c",
                temperature_c.to_string(),
                "Temperature is below the range of the linear resistivity model",
            ));
        }

        let skin_depth = skin_depth_m(corrected_resistivity, frequency_hz);
        let strand_diameter = Meters::from(Inches(entry.bare_diameter_in)).0;
        let n1_max = n1_max(skin_depth, strand_diameter);

        tracing::debug!(
            gauge,
            frequency_hz,
            temperature_c,
            corrected_resistivity,
            skin_depth_m = skin_depth,
            n1_max,
            "N1 max computed"
        );

        Ok(N1MaxResult {
            skin_depth_mils: Mils::from(Meters(skin_depth)).0,
            strand_diameter_mils: Mils::from(Meters(strand_diameter)).0,
            n1_max,
            skin_depth_m: skin_depth,
            strand_diameter_in: entry.bare_diameter_in,
            corrected_resistivity,
        })
    }
}
