//! # Reference Tables
//!
//! Immutable lookup data shared by every calculation: the solid-wire gauge
//! table, the copper temperature model and the per-operation construction
//! factors.
//!
//! Tables are parsed from TOML into typed fields and validated before any
//! calculation can see them. A missing or malformed row is a fatal
//! [`CalcError::Configuration`]; nothing is coerced or defaulted.
//!
//! ## Example
//!
//! ```rust
//! use litz_core::tables::ReferenceTables;
//!
//! let tables = ReferenceTables::standard().unwrap();
//! let awg40 = tables.lookup(40).unwrap();
//! assert_eq!(awg40.circular_mil_area, 9.61);
//!
//! // Largest solid wire whose area does not exceed 961 CMA
//! assert_eq!(tables.equivalent_gauge(961.0).unwrap().gauge, 21);
//! ```

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{FilmType, TemperatureModel};

/// Reference data compiled into the crate.
pub const STANDARD_TABLES_TOML: &str = include_str!("../data/reference_tables.toml");

/// Upper bound accepted for a gauge's `max_ends` column
pub const MAX_ENDS_PER_OPERATION: u32 = 100;

static STANDARD: OnceCell<ReferenceTables> = OnceCell::new();

/// One solid-wire row of the AWG reference table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaugeEntry {
    /// AWG size
    pub gauge: u32,
    /// Nominal bare conductor diameter (inches)
    pub bare_diameter_in: f64,
    /// Nominal area of one solid strand (circular mils)
    pub circular_mil_area: f64,
    /// DC resistance at the reference temperature (Ω per 1000 ft)
    pub dc_resistance_per_kft: f64,
    /// Most strands of this gauge a single bunching pass can take (0 = not bunched)
    pub max_ends: u32,
    /// Insulated strand diameters per film build
    #[serde(default)]
    pub film: FilmBuilds,
}

/// Outside diameter tolerance band of one insulated strand (inches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilmDiameters {
    pub min: f64,
    pub nom: f64,
    pub max: f64,
}

/// Film builds drawn at one gauge. A missing build is not available there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilmBuilds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single: Option<FilmDiameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heavy: Option<FilmDiameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triple: Option<FilmDiameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadruple: Option<FilmDiameters>,
}

impl FilmBuilds {
    /// Diameters for `film`, if that build exists at this gauge
    pub fn get(&self, film: FilmType) -> Option<&FilmDiameters> {
        match film {
            FilmType::Single => self.single.as_ref(),
            FilmType::Heavy => self.heavy.as_ref(),
            FilmType::Triple => self.triple.as_ref(),
            FilmType::Quadruple => self.quadruple.as_ref(),
        }
    }
}

impl GaugeEntry {
    fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("bare_diameter_in", self.bare_diameter_in),
            ("circular_mil_area", self.circular_mil_area),
            ("dc_resistance_per_kft", self.dc_resistance_per_kft),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::configuration(format!(
                    "AWG {}: {} must be a positive number, got {}",
                    self.gauge, name, value
                )));
            }
        }
        if self.max_ends > MAX_ENDS_PER_OPERATION {
            return Err(CalcError::configuration(format!(
                "AWG {}: max_ends {} exceeds {}",
                self.gauge, self.max_ends, MAX_ENDS_PER_OPERATION
            )));
        }
        for film in FilmType::ALL {
            let Some(d) = self.film.get(film) else { continue };
            let ordered = d.min.is_finite()
                && d.max.is_finite()
                && self.bare_diameter_in < d.min
                && d.min <= d.nom
                && d.nom <= d.max;
            if !ordered {
                return Err(CalcError::configuration(format!(
                    "AWG {}: {} film diameters must satisfy bare < min <= nom <= max",
                    self.gauge,
                    film.display_name()
                )));
            }
        }
        Ok(())
    }
}

/// Packing and take-up factors for one operation count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructionFactor {
    /// Number of bunching/stranding operations this row applies to
    pub operations: u32,
    /// Bundle diameter over √n × strand diameter
    pub packing_factor: f64,
    /// Packing factor for strands coarser than `coarse_gauge_below`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coarse_packing_factor: Option<f64>,
    /// Conductor length consumed by twist lay, per unit bundle length
    pub take_up_factor: f64,
}

/// Construction-factor table keyed by operation count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructionFactorTable {
    /// Gauges numerically below this use the coarse packing factor
    pub coarse_gauge_below: u32,
    /// One row per operation count, starting at 1
    pub factors: Vec<ConstructionFactor>,
}

impl ConstructionFactorTable {
    /// Row for `operations`, if tabulated
    pub fn get(&self, operations: u32) -> Option<&ConstructionFactor> {
        self.factors.iter().find(|row| row.operations == operations)
    }

    /// Highest operation count with a row
    pub fn max_operations(&self) -> u32 {
        self.factors.len() as u32
    }

    /// Packing factor for a construction of `operations` passes on `gauge` strands
    pub fn packing_factor(&self, operations: u32, gauge: u32) -> Option<f64> {
        self.get(operations).map(|row| match row.coarse_packing_factor {
            Some(coarse) if gauge < self.coarse_gauge_below => coarse,
            _ => row.packing_factor,
        })
    }

    /// Take-up factor for a construction of `operations` passes
    pub fn take_up_factor(&self, operations: u32) -> Option<f64> {
        self.get(operations).map(|row| row.take_up_factor)
    }

    fn validate(&mut self) -> CalcResult<()> {
        self.factors.sort_by_key(|row| row.operations);
        if self.factors.is_empty() {
            return Err(CalcError::configuration("construction factor table is empty"));
        }
        for (index, row) in self.factors.iter().enumerate() {
            let expected = index as u32 + 1;
            if row.operations != expected {
                return Err(CalcError::configuration(format!(
                    "construction factors must cover operations 1..={} without gaps; expected row {}, found {}",
                    self.factors.len(),
                    expected,
                    row.operations
                )));
            }
            let values = [Some(row.packing_factor), row.coarse_packing_factor, Some(row.take_up_factor)];
            if values.iter().flatten().any(|v| !(v.is_finite() && *v >= 1.0)) {
                return Err(CalcError::configuration(format!(
                    "construction factors for {} operation(s) must be finite and at least 1.0",
                    row.operations
                )));
            }
        }
        Ok(())
    }
}

/// All immutable reference data the engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceTables {
    /// Conductor temperature model
    pub temperature: TemperatureModel,
    /// Packing/take-up factors per operation count
    pub construction: ConstructionFactorTable,
    /// Solid-wire rows, ascending gauge (descending area)
    gauges: Vec<GaugeEntry>,
}

impl ReferenceTables {
    /// The embedded reference tables, parsed and validated on first use.
    ///
    /// Later calls return the same instance.
    pub fn standard() -> CalcResult<&'static ReferenceTables> {
        STANDARD.get_or_try_init(|| Self::from_toml_str(STANDARD_TABLES_TOML))
    }

    /// Parse and validate tables from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let tables: ReferenceTables = toml::from_str(text)?;
        tables.validated()
    }

    /// Build tables from already-typed parts (validated the same way as TOML input).
    pub fn new(
        temperature: TemperatureModel,
        construction: ConstructionFactorTable,
        gauges: Vec<GaugeEntry>,
    ) -> CalcResult<Self> {
        ReferenceTables {
            temperature,
            construction,
            gauges,
        }
        .validated()
    }

    fn validated(mut self) -> CalcResult<Self> {
        self.temperature.validate()?;
        self.construction.validate()?;

        if self.gauges.is_empty() {
            return Err(CalcError::configuration("gauge table is empty"));
        }
        self.gauges.sort_by_key(|entry| entry.gauge);
        for entry in &self.gauges {
            entry.validate()?;
        }
        for pair in self.gauges.windows(2) {
            let (thick, thin) = (&pair[0], &pair[1]);
            if thick.gauge.checked_add(1) != Some(thin.gauge) {
                return Err(CalcError::configuration(format!(
                    "gauge table must be contiguous: AWG {} is followed by AWG {}",
                    thick.gauge, thin.gauge
                )));
            }
            if thin.circular_mil_area >= thick.circular_mil_area {
                return Err(CalcError::configuration(format!(
                    "circular mil area must decrease with gauge: AWG {} ({}) vs AWG {} ({})",
                    thick.gauge, thick.circular_mil_area, thin.gauge, thin.circular_mil_area
                )));
            }
        }

        tracing::debug!(
            gauges = self.gauges.len(),
            first = self.gauges[0].gauge,
            last = self.gauges[self.gauges.len() - 1].gauge,
            "Reference tables validated"
        );
        Ok(self)
    }

    /// Look up a gauge row.
    pub fn lookup(&self, gauge: u32) -> CalcResult<&GaugeEntry> {
        self.gauges
            .binary_search_by_key(&gauge, |entry| entry.gauge)
            .map(|index| &self.gauges[index])
            .map_err(|_| CalcError::gauge_not_found(gauge))
    }

    /// Rows in ascending gauge order (thickest wire first)
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &GaugeEntry> + ExactSizeIterator {
        self.gauges.iter()
    }

    /// Rows in descending gauge order (thinnest wire first)
    pub fn iter_descending(&self) -> impl Iterator<Item = &GaugeEntry> {
        self.gauges.iter().rev()
    }

    /// Supported gauge range (inclusive)
    pub fn gauge_range(&self) -> (u32, u32) {
        (self.gauges[0].gauge, self.gauges[self.gauges.len() - 1].gauge)
    }

    /// Solid wire equivalent to a bundle of `total_cma`.
    ///
    /// Returns the row with the largest area that does not exceed `total_cma`.
    /// This is a lower bound: a nearer row with more area than the bundle
    /// is never chosen.
    pub fn equivalent_gauge(&self, total_cma: f64) -> CalcResult<&GaugeEntry> {
        if !(total_cma.is_finite() && total_cma >= 0.0) {
            return Err(CalcError::invalid_input(
                "total_cma",
                total_cma.to_string(),
                "Area must be a non-negative number",
            ));
        }
        // Rows are ordered by descending area
        let index = self
            .gauges
            .partition_point(|entry| entry.circular_mil_area > total_cma);
        self.gauges.get(index).ok_or_else(|| CalcError::BelowRange {
            total_cma,
            smallest_cma: self.gauges[self.gauges.len() - 1].circular_mil_area,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::standard().unwrap()
    }

    #[test]
    fn test_standard_tables_load() {
        let t = tables();
        assert_eq!(t.gauge_range(), (10, 50));
        assert_eq!(t.iter().len(), 41);
        assert_eq!(t.temperature, TemperatureModel::COPPER);
        assert_eq!(t.construction.max_operations(), 5);
    }

    #[test]
    fn test_lookup() {
        let awg40 = tables().lookup(40).unwrap();
        assert_eq!(awg40.bare_diameter_in, 0.0031);
        assert_eq!(awg40.circular_mil_area, 9.61);
        assert_eq!(awg40.dc_resistance_per_kft, 1152.33);
        assert_eq!(awg40.max_ends, 66);
        assert_eq!(awg40.film.get(FilmType::Single).unwrap().nom, 0.0035);
    }

    #[test]
    fn test_max_ends_by_gauge() {
        let ends = |g| tables().lookup(g).unwrap().max_ends;
        assert_eq!(ends(10), 0);
        assert_eq!(ends(14), 1);
        assert_eq!(ends(22), 7);
        assert_eq!(ends(31), 60);
        assert_eq!(ends(46), 66);
        assert_eq!(ends(48), 21);
    }

    #[test]
    fn test_film_availability() {
        let t = tables();
        assert!(t.lookup(10).unwrap().film.get(FilmType::Single).is_none());
        assert!(t.lookup(12).unwrap().film.get(FilmType::Heavy).is_some());
        assert!(t.lookup(12).unwrap().film.get(FilmType::Triple).is_none());
        assert!(t.lookup(44).unwrap().film.get(FilmType::Quadruple).is_some());
        assert!(t.lookup(45).unwrap().film.get(FilmType::Quadruple).is_none());
    }

    #[test]
    fn test_lookup_out_of_range() {
        assert_eq!(tables().lookup(999).unwrap_err(), CalcError::gauge_not_found(999));
        assert!(tables().lookup(9).is_err());
    }

    #[test]
    fn test_traversal_order() {
        let ascending: Vec<u32> = tables().iter().map(|e| e.gauge).collect();
        let descending: Vec<u32> = tables().iter_descending().map(|e| e.gauge).collect();
        assert_eq!(ascending.first(), Some(&10));
        assert_eq!(descending.first(), Some(&50));
        assert!(tables()
            .iter()
            .zip(tables().iter().skip(1))
            .all(|(a, b)| a.circular_mil_area > b.circular_mil_area));
    }

    #[test]
    fn test_equivalent_gauge_lower_bound() {
        // 961 sits between AWG 21 (812) and AWG 20 (1020)
        assert_eq!(tables().equivalent_gauge(961.0).unwrap().gauge, 21);
        // Exact match picks that row
        assert_eq!(tables().equivalent_gauge(1020.0).unwrap().gauge, 20);
        // Just below a row falls to the next thinner one
        assert_eq!(tables().equivalent_gauge(1019.999).unwrap().gauge, 21);
        // Above the largest row clamps to the thickest gauge
        assert_eq!(tables().equivalent_gauge(50_000.0).unwrap().gauge, 10);
    }

    #[test]
    fn test_equivalent_gauge_below_range() {
        let err = tables().equivalent_gauge(0.5).unwrap_err();
        assert_eq!(
            err,
            CalcError::BelowRange {
                total_cma: 0.5,
                smallest_cma: 0.98
            }
        );
        assert!(tables().equivalent_gauge(f64::NAN).is_err());
    }

    #[test]
    fn test_packing_factor_override() {
        let c = &tables().construction;
        assert_eq!(c.packing_factor(4, 40), Some(1.363));
        assert_eq!(c.packing_factor(4, 46), Some(1.271));
        assert_eq!(c.packing_factor(2, 40), Some(1.236));
        assert_eq!(c.take_up_factor(2), Some(1.03));
        assert_eq!(c.take_up_factor(6), None);
    }

    const SMALL_TABLE: &str = r#"
        [temperature]
        reference_resistivity = 1.72e-8
        temperature_coefficient = 0.00393
        reference_temperature_c = 20.0

        [construction]
        coarse_gauge_below = 44

        [[construction.factors]]
        operations = 1
        packing_factor = 1.155
        take_up_factor = 1.01

        [[gauges]]
        gauge = 39
        bare_diameter_in = 0.0035
        circular_mil_area = 12.25
        dc_resistance_per_kft = 897.15
        max_ends = 66

        [[gauges]]
        gauge = 40
        bare_diameter_in = 0.0031
        circular_mil_area = 9.61
        dc_resistance_per_kft = 1152.33
        max_ends = 66

        [gauges.film]
        single = { min = 0.0032, nom = 0.0035, max = 0.0037 }
    "#;

    #[test]
    fn test_parse_small_table() {
        let t = ReferenceTables::from_toml_str(SMALL_TABLE).unwrap();
        assert_eq!(t.gauge_range(), (39, 40));
    }

    #[test]
    fn test_gap_is_fatal() {
        let text = SMALL_TABLE.replace("gauge = 40", "gauge = 41");
        let err = ReferenceTables::from_toml_str(&text).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn test_string_typed_number_is_fatal() {
        let text = SMALL_TABLE.replace("circular_mil_area = 9.61", "circular_mil_area = \"9.61\"");
        assert!(ReferenceTables::from_toml_str(&text).unwrap_err().is_fatal());
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let text = SMALL_TABLE.replace("dc_resistance_per_kft = 1152.33", "");
        assert!(ReferenceTables::from_toml_str(&text).unwrap_err().is_fatal());
    }

    #[test]
    fn test_non_positive_value_is_fatal() {
        let text = SMALL_TABLE.replace("bare_diameter_in = 0.0031", "bare_diameter_in = 0.0");
        assert!(ReferenceTables::from_toml_str(&text).unwrap_err().is_fatal());
    }

    #[test]
    fn test_excessive_max_ends_is_fatal() {
        let text = SMALL_TABLE.replacen("max_ends = 66", "max_ends = 500", 1);
        let err = ReferenceTables::from_toml_str(&text).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("max_ends"));
    }

    #[test]
    fn test_film_thinner_than_copper_is_fatal() {
        let text = SMALL_TABLE.replace("min = 0.0032", "min = 0.0030");
        let err = ReferenceTables::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("film"));
    }

    #[test]
    fn test_area_must_decrease() {
        let text = SMALL_TABLE.replace("circular_mil_area = 9.61", "circular_mil_area = 13.0");
        let err = ReferenceTables::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("decrease"));
    }
}
