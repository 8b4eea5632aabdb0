//! # Litz Engine
//!
//! Single entry point over the calculators. An engine borrows one set of
//! reference tables and owns validated settings; every method is a pure
//! function of its arguments and that read-only state, so one engine can be
//! shared across threads.
//!
//! All methods go through one [`ElectricalCalculator`] and the resolver it
//! owns, so achievable strand counts are indexed once per engine.
//!
//! ```rust
//! use litz_core::engine::LitzEngine;
//!
//! let engine = LitzEngine::standard().unwrap();
//! let construction = engine.resolve_construction(100, 40).unwrap();
//! assert_eq!(construction.operations, 2);
//!
//! let n1 = engine.compute_n1_max(40, 1200.0, 60.0).unwrap();
//! assert_eq!(n1.n1_max, 2710);
//! ```

use crate::calculations::design::{self, LitzDesignInput, LitzDesignResult};
use crate::calculations::{
    ConstructionResolver, ConstructionResult, ElectricalCalculator, ElectricalProperties,
    N1MaxResult,
};
use crate::errors::CalcResult;
use crate::materials::ConductorMaterial;
use crate::settings::EngineSettings;
use crate::tables::{GaugeEntry, ReferenceTables};

/// Calculation engine over one set of reference tables.
#[derive(Debug, Clone)]
pub struct LitzEngine<'a> {
    tables: &'a ReferenceTables,
    settings: EngineSettings,
    electrical: ElectricalCalculator<'a>,
}

impl LitzEngine<'static> {
    /// Engine over the embedded tables with default settings.
    pub fn standard() -> CalcResult<Self> {
        LitzEngine::new(ReferenceTables::standard()?, EngineSettings::default())
    }

    /// Engine over the embedded tables with the given settings.
    pub fn with_settings(settings: EngineSettings) -> CalcResult<Self> {
        LitzEngine::new(ReferenceTables::standard()?, settings)
    }
}

impl<'a> LitzEngine<'a> {
    /// Validate `settings` against `tables` and build the calculators.
    pub fn new(tables: &'a ReferenceTables, settings: EngineSettings) -> CalcResult<Self> {
        settings.validate()?;
        let resolver = ConstructionResolver::new(tables, settings.construction)?;
        let electrical = ElectricalCalculator::with_resolver(resolver);
        tracing::debug!(
            min_factor = settings.construction.min_factor,
            max_factor = settings.construction.max_factor,
            max_operations = settings.construction.max_operations,
            "Engine ready"
        );
        Ok(LitzEngine {
            tables,
            settings,
            electrical,
        })
    }

    pub fn tables(&self) -> &'a ReferenceTables {
        self.tables
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn resolve_construction(&self, strand_count: u32, gauge: u32) -> CalcResult<ConstructionResult> {
        self.electrical.resolver().resolve(strand_count, gauge)
    }

    /// Achievable strand counts near `strand_count`, closest first.
    pub fn nearby_counts(&self, strand_count: u32, gauge: u32) -> CalcResult<Vec<u32>> {
        self.electrical.resolver().nearby_counts(strand_count, gauge)
    }

    pub fn compute_electrical_properties(
        &self,
        strand_count: u32,
        gauge: u32,
        temperature_c: f64,
        frequency_hz: f64,
    ) -> CalcResult<ElectricalProperties> {
        self.electrical.compute(strand_count, gauge, temperature_c, frequency_hz)
    }

    pub fn compute_n1_max(&self, gauge: u32, frequency_hz: f64, temperature_c: f64) -> CalcResult<N1MaxResult> {
        self.electrical.skin().compute(gauge, frequency_hz, temperature_c)
    }

    /// N1 max for a strand of `material` instead of the tables' conductor.
    pub fn compute_n1_max_for_material(
        &self,
        material: ConductorMaterial,
        gauge: u32,
        frequency_hz: f64,
        temperature_c: f64,
    ) -> CalcResult<N1MaxResult> {
        self.electrical
            .skin()
            .compute_for_material(material, gauge, frequency_hz, temperature_c)
    }

    pub fn lookup_gauge(&self, gauge: u32) -> CalcResult<&'a GaugeEntry> {
        self.tables.lookup(gauge)
    }

    /// Every calculation for one design, with advisories.
    pub fn design(&self, input: &LitzDesignInput) -> CalcResult<LitzDesignResult> {
        design::calculate(input, &self.settings.defaults, &self.electrical)
    }
}
