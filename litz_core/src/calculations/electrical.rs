//! # Electrical Properties
//!
//! Bundle-level electrical figures for `n` strands of one gauge:
//!
//! - total conductor area (circular mils and mm²)
//! - the solid-wire gauge with the same or slightly smaller area
//! - DC resistance per 1000 ft at the operating temperature, including the
//!   extra conductor length the twist lay adds (take-up factor)
//! - skin depth and N1 max, taken from [`SkinEffectCalculator`]
//!
//! ## Formulas
//!
//! ```text
//! total_cma   = CMA(gauge) × n
//! R(T)        = R_ref × (1 + α (T − T_ref))
//! dc_per_foot = (R(T) / n × take_up) / 1000
//! dc          = dc_per_foot × 1000          (Ω / 1000 ft)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use litz_core::calculations::electrical::ElectricalCalculator;
//! use litz_core::settings::ConstructionLimits;
//! use litz_core::tables::ReferenceTables;
//!
//! let tables = ReferenceTables::standard().unwrap();
//! let calc = ElectricalCalculator::new(tables, ConstructionLimits::default()).unwrap();
//!
//! let props = calc.compute(100, 40, 20.0, 1000.0).unwrap();
//! assert_eq!(props.total_cma, 961.0);
//! assert_eq!(props.equivalent_awg, "21");
//! ```

use serde::{Deserialize, Serialize};

use super::construction::{ConstructionResolver, ConstructionResult};
use super::skin_effect::SkinEffectCalculator;
use super::{validate_frequency, validate_strand_count, validate_temperature};
use crate::errors::CalcResult;
use crate::settings::ConstructionLimits;
use crate::tables::ReferenceTables;
use crate::units::{CircularMils, SquareMillimeters};

/// Electrical summary of one litz bundle.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_cma": 961.0,
///   "total_area_mm2": 0.48694543,
///   "equivalent_awg": "21",
///   "dc_resistance": 12.2174,
///   "dc_resistance_per_foot": 0.0122174,
///   "corrected_resistivity": 1.72e-8,
///   "skin_depth_mils": 2.0873,
///   "n1_max": 2810,
///   "construction": { "type": "Type 2", "operations": 2, "...": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalProperties {
    /// Total conductor area (circular mils)
    pub total_cma: f64,

    /// Total conductor area (mm²)
    pub total_area_mm2: f64,

    /// Solid gauge whose area does not exceed the bundle's, as text
    pub equivalent_awg: String,

    /// DC resistance at temperature (Ω per 1000 ft)
    pub dc_resistance: f64,

    /// DC resistance at temperature (Ω per ft)
    pub dc_resistance_per_foot: f64,

    /// Temperature-corrected resistivity (Ω·m)
    pub corrected_resistivity: f64,

    /// Skin depth at the operating frequency (display unit)
    pub skin_depth_mils: f64,

    /// Recommended maximum strands per bunch
    pub n1_max: u64,

    /// Construction the take-up factor was taken from
    pub construction: ConstructionResult,
}

/// Electrical calculator bound to a set of reference tables.
///
/// Owns the construction resolver and skin-effect calculator it reads from,
/// so callers that need those too can borrow them instead of building new ones.
#[derive(Debug, Clone)]
pub struct ElectricalCalculator<'a> {
    tables: &'a ReferenceTables,
    resolver: ConstructionResolver<'a>,
    skin: SkinEffectCalculator<'a>,
}

impl<'a> ElectricalCalculator<'a> {
    pub fn new(tables: &'a ReferenceTables, limits: ConstructionLimits) -> CalcResult<Self> {
        Ok(Self::with_resolver(ConstructionResolver::new(tables, limits)?))
    }

    /// Build around an existing resolver, using its tables.
    pub fn with_resolver(resolver: ConstructionResolver<'a>) -> Self {
        let tables = resolver.tables();
        ElectricalCalculator {
            tables,
            resolver,
            skin: SkinEffectCalculator::new(tables),
        }
    }

    pub fn tables(&self) -> &'a ReferenceTables {
        self.tables
    }

    pub fn resolver(&self) -> &ConstructionResolver<'a> {
        &self.resolver
    }

    pub fn skin(&self) -> &SkinEffectCalculator<'a> {
        &self.skin
    }

    /// Electrical properties of `strand_count` strands of `gauge`.
    pub fn compute(
        &self,
        strand_count: u32,
        gauge: u32,
        temperature_c: f64,
        frequency_hz: f64,
    ) -> CalcResult<ElectricalProperties> {
        validate_strand_count(strand_count)?;
        validate_temperature(temperature_c)?;
        validate_frequency(frequency_hz)?;
        let entry = self.tables.lookup(gauge)?;

        let construction = self.resolver.resolve(strand_count, gauge)?;
        let skin = self.skin.compute(gauge, frequency_hz, temperature_c)?;

        let strands = strand_count as f64;
        let total_cma = entry.circular_mil_area * strands;
        let equivalent = self.tables.equivalent_gauge(total_cma)?;

        let corrected_resistance = self
            .tables
            .temperature
            .resistance_at(entry.dc_resistance_per_kft, temperature_c);
        let dc_resistance_per_foot =
            ((corrected_resistance / strands) * construction.take_up_factor) / 1000.0;
        let dc_resistance = dc_resistance_per_foot * 1000.0;

        tracing::debug!(
            strand_count,
            gauge,
            total_cma,
            equivalent_awg = equivalent.gauge,
            dc_resistance,
            "Electrical properties computed"
        );

        Ok(ElectricalProperties {
            total_cma,
            total_area_mm2: SquareMillimeters::from(CircularMils(total_cma)).0,
            equivalent_awg: equivalent.gauge.to_string(),
            dc_resistance,
            dc_resistance_per_foot,
            corrected_resistivity: skin.corrected_resistivity,
            skin_depth_mils: skin.skin_depth_mils,
            n1_max: skin.n1_max,
            construction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    fn calc() -> ElectricalCalculator<'static> {
        ElectricalCalculator::new(ReferenceTables::standard().unwrap(), ConstructionLimits::default())
            .unwrap()
    }

    #[test]
    fn test_reference_bundle() {
        let props = calc().compute(100, 40, 60.0, 1200.0).unwrap();
        assert_eq!(props.total_cma, 961.0);
        assert_eq!(props.equivalent_awg, "21");
        assert!((props.total_area_mm2 - 0.486945427).abs() < 1e-9);

        // 1152.33 × (1 + 0.00393 × 40) / 100 × 1.03
        assert!((props.dc_resistance - 13.7348056428).abs() < 1e-6);
        assert!((props.dc_resistance_per_foot - 0.0137348056428).abs() < 1e-9);
        assert_eq!(props.n1_max, 2710);
        assert_eq!(props.construction.operations, 2);
    }

    #[test]
    fn test_reference_temperature_has_no_correction() {
        let props = calc().compute(100, 40, 20.0, 1000.0).unwrap();
        assert!((props.dc_resistance - 1152.33 / 100.0 * 1.03).abs() < 1e-9);
        assert!((props.corrected_resistivity - 1.72e-8).abs() < 1e-20);
    }

    #[test]
    fn test_resistance_rises_with_temperature() {
        let cold = calc().compute(100, 40, 20.0, 1000.0).unwrap();
        let warm = calc().compute(100, 40, 60.0, 1000.0).unwrap();
        let hot = calc().compute(100, 40, 155.0, 1000.0).unwrap();
        assert!(cold.dc_resistance < warm.dc_resistance);
        assert!(warm.dc_resistance < hot.dc_resistance);
    }

    #[test]
    fn test_equivalent_gauge_is_lower_bound() {
        // 1020 × 0.98 = 999.6 CMA, just short of AWG 20's 1020
        let props = calc().compute(1020, 50, 20.0, 1000.0).unwrap();
        assert_eq!(props.equivalent_awg, "21");
        assert!(props.total_cma < 1020.0);
    }

    #[test]
    fn test_single_strand() {
        let props = calc().compute(1, 40, 20.0, 1000.0).unwrap();
        assert_eq!(props.equivalent_awg, "40");
        assert!(!props.construction.is_valid);
        assert_eq!(props.construction.operations, 1);
    }

    #[test]
    fn test_unbunched_gauge_uses_single_pass_take_up() {
        let props = calc().compute(4, 12, 20.0, 1000.0).unwrap();
        assert_eq!(props.construction.operations, 0);
        assert!((props.dc_resistance - 1.62 / 4.0 * 1.01).abs() < 1e-12);
        assert_eq!(props.total_cma, 26_120.0);
        assert_eq!(props.equivalent_awg, "10");
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            calc().compute(0, 40, 20.0, 1000.0).unwrap_err().field(),
            Some("strand_count")
        );
        assert_eq!(
            calc().compute(100, 40, f64::INFINITY, 1000.0).unwrap_err().field(),
            Some("temperature_c")
        );
        assert_eq!(
            calc().compute(100, 40, 20.0, 0.0).unwrap_err().field(),
            Some("frequency_hz")
        );
        assert_eq!(
            calc().compute(100, 7, 20.0, 1000.0).unwrap_err(),
            CalcError::gauge_not_found(7)
        );
    }
}
