//! # Litz Design
//!
//! Runs every calculation for one design input and collects the results,
//! the bundle diameters, nearby buildable strand counts and any engineering
//! advisories.
//!
//! Advisories flag constructions that need a manufacturing review. They
//! never turn a calculation into an error.
//!
//! ## Example
//!
//! ```rust
//! use litz_core::calculations::design::{calculate, LitzDesignInput};
//! use litz_core::calculations::ElectricalCalculator;
//! use litz_core::settings::EngineSettings;
//! use litz_core::tables::ReferenceTables;
//!
//! let settings = EngineSettings::default();
//! let electrical = ElectricalCalculator::new(ReferenceTables::standard().unwrap(), settings.construction).unwrap();
//!
//! let input = LitzDesignInput::new(100, 40).with_frequency(100_000.0);
//! let result = calculate(&input, &settings.defaults, &electrical).unwrap();
//!
//! println!("{} ({})", result.construction.construction_type, result.construction.designation());
//! println!("DC: {:.3} Ω/1000 ft", result.electrical.dc_resistance);
//! println!("N1 max: {}", result.n1_max.n1_max);
//! assert!(!result.requires_review());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::construction::ConstructionResult;
use super::diameter::{bare_diameters, BundleDiameters, NylonServe};
use super::electrical::{ElectricalCalculator, ElectricalProperties};
use super::skin_effect::N1MaxResult;
use crate::constants::{MIN_MANUFACTURABLE_CMA, SINGLE_STRAND_REVIEW_CMA};
use crate::errors::CalcResult;
use crate::materials::{FilmType, MagnetWireGrade};
use crate::settings::CalculationDefaults;

/// Finest strand size built without engineering review
const FINEST_ROUTINE_GAUGE: u32 = 49;

/// Strands coarser than this gauge are reviewed when bunched
const COARSE_BUNDLE_GAUGE: u32 = 23;

/// Largest bunch of coarse strands built without review
const COARSE_BUNDLE_MAX_STRANDS: u32 = 8;

/// Input for a complete litz design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "strand_count": 100,
///   "gauge": 40,
///   "temperature_c": 60.0,
///   "frequency_hz": 1200.0,
///   "film": "heavy",
///   "grade": "MW 79-C",
///   "serve": "single"
/// }
/// ```
///
/// `temperature_c` and `frequency_hz` may be omitted; the engine defaults
/// apply. `film`, `grade` and `serve` default to single film, MW 79-C and
/// no serve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LitzDesignInput {
    /// Number of strands in the bundle
    pub strand_count: u32,

    /// Strand AWG size
    pub gauge: u32,

    /// Operating temperature (°C)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,

    /// Operating frequency (Hz)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_hz: Option<f64>,

    /// Strand insulation build
    #[serde(default)]
    pub film: FilmType,

    /// Strand magnet wire grade
    #[serde(default)]
    pub grade: MagnetWireGrade,

    /// Nylon serve over the bundle
    #[serde(default)]
    pub serve: NylonServe,
}

impl LitzDesignInput {
    pub fn new(strand_count: u32, gauge: u32) -> Self {
        LitzDesignInput {
            strand_count,
            gauge,
            temperature_c: None,
            frequency_hz: None,
            film: FilmType::default(),
            grade: MagnetWireGrade::default(),
            serve: NylonServe::default(),
        }
    }

    pub fn with_film(mut self, film: FilmType) -> Self {
        self.film = film;
        self
    }

    pub fn with_grade(mut self, grade: MagnetWireGrade) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_serve(mut self, serve: NylonServe) -> Self {
        self.serve = serve;
        self
    }

    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature_c = Some(temperature_c);
        self
    }

    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = Some(frequency_hz);
        self
    }
}

/// A condition that should be confirmed with manufacturing engineering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// One heavy strand rather than a bundle
    SingleHeavyStrand { strand_cma: f64 },

    /// Strand finer than routine production sizes
    UltraFineStrand { gauge: u32 },

    /// Many coarse strands in one bunch
    CoarseStrandBundle { gauge: u32, strand_count: u32 },

    /// Total copper area below the smallest manufactured part
    BelowManufacturableArea { total_cma: f64 },

    /// Requested strand count has no construction within the operation cap
    InfeasibleConstruction { requested: u32, nearest: u32 },

    /// Strands this heavy are not bunched at all
    UnbunchedGauge { gauge: u32 },

    /// Requested film build is not drawn at this gauge; no diameters reported
    FilmUnavailable { gauge: u32, film: FilmType },
}

impl Advisory {
    /// Human-readable description
    pub fn message(&self) -> String {
        match self {
            Advisory::SingleHeavyStrand { strand_cma } => format!(
                "Single strand of {:.0} CMA exceeds {:.0} CMA; confirm construction with engineering",
                strand_cma, SINGLE_STRAND_REVIEW_CMA
            ),
            Advisory::UltraFineStrand { gauge } => format!(
                "AWG {} is finer than AWG {}; confirm final construction with engineering",
                gauge, FINEST_ROUTINE_GAUGE
            ),
            Advisory::CoarseStrandBundle {
                gauge,
                strand_count,
            } => format!(
                "{} strands of AWG {} (coarser than AWG {}, more than {} strands); consult engineering",
                strand_count, gauge, COARSE_BUNDLE_GAUGE, COARSE_BUNDLE_MAX_STRANDS
            ),
            Advisory::BelowManufacturableArea { total_cma } => format!(
                "Total area {:.2} CMA is below {:.2} CMA; verify manufacturing capability",
                total_cma, MIN_MANUFACTURABLE_CMA
            ),
            Advisory::InfeasibleConstruction { requested, nearest } => format!(
                "{} strands cannot be built within the operation limit; nearest buildable count is {}",
                requested, nearest
            ),
            Advisory::UnbunchedGauge { gauge } => format!(
                "AWG {} strands cannot be bunched; consider a finer gauge",
                gauge
            ),
            Advisory::FilmUnavailable { gauge, film } => format!(
                "{} film is not available for AWG {}; bundle diameter not calculated",
                film, gauge
            ),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Everything calculated for one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LitzDesignResult {
    /// Strand count as requested
    pub strand_count: u32,

    /// Strand AWG size
    pub gauge: u32,

    /// Temperature used (°C)
    pub temperature_c: f64,

    /// Frequency used (Hz)
    pub frequency_hz: f64,

    pub construction: ConstructionResult,

    pub electrical: ElectricalProperties,

    pub n1_max: N1MaxResult,

    /// Diameters over the strand film; absent when the film is not drawn at this gauge
    pub bare_diameter: Option<BundleDiameters>,

    /// Diameters over the nylon serve, when one was requested
    pub served_diameter: Option<BundleDiameters>,

    /// Buildable strand counts near the request, closest first
    pub nearby_counts: Vec<u32>,

    pub advisories: Vec<Advisory>,
}

impl LitzDesignResult {
    /// True when any advisory was raised
    pub fn requires_review(&self) -> bool {
        !self.advisories.is_empty()
    }

    /// True when the requested strand count exceeds N1 max
    pub fn exceeds_n1_max(&self) -> bool {
        self.strand_count as u64 > self.n1_max.n1_max
    }
}

/// Run every calculation for `input`.
///
/// `electrical` supplies the construction resolver and skin-effect
/// calculator as well, so the construction is resolved once per design.
pub fn calculate(
    input: &LitzDesignInput,
    defaults: &CalculationDefaults,
    electrical: &ElectricalCalculator,
) -> CalcResult<LitzDesignResult> {
    let temperature_c = input.temperature_c.unwrap_or(defaults.temperature_c);
    let frequency_hz = input.frequency_hz.unwrap_or(defaults.frequency_hz);

    let properties = electrical.compute(input.strand_count, input.gauge, temperature_c, frequency_hz)?;
    let construction = properties.construction.clone();
    let n1_max = electrical.skin().compute(input.gauge, frequency_hz, temperature_c)?;
    let nearby_counts = electrical.resolver().nearby_counts(input.strand_count, input.gauge)?;

    let entry = electrical.tables().lookup(input.gauge)?;
    let bare_diameter = match entry.film.get(input.film) {
        Some(_) => Some(bare_diameters(
            entry,
            input.strand_count,
            construction.packing_factor,
            input.film,
            input.grade,
        )?),
        None => None,
    };
    let served_diameter = bare_diameter
        .as_ref()
        .and_then(|bare| bare.served(input.serve));

    let advisories = collect_advisories(input, &construction, &properties, bare_diameter.is_some());
    for advisory in &advisories {
        tracing::info!(strand_count = input.strand_count, gauge = input.gauge, "{}", advisory);
    }

    Ok(LitzDesignResult {
        strand_count: input.strand_count,
        gauge: input.gauge,
        temperature_c,
        frequency_hz,
        construction,
        electrical: properties,
        n1_max,
        bare_diameter,
        served_diameter,
        nearby_counts,
        advisories,
    })
}

fn collect_advisories(
    input: &LitzDesignInput,
    construction: &ConstructionResult,
    electrical: &ElectricalProperties,
    has_film: bool,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if input.strand_count == 1 && electrical.total_cma > SINGLE_STRAND_REVIEW_CMA {
        advisories.push(Advisory::SingleHeavyStrand {
            strand_cma: electrical.total_cma,
        });
    }
    if input.gauge > FINEST_ROUTINE_GAUGE {
        advisories.push(Advisory::UltraFineStrand { gauge: input.gauge });
    }
    if input.gauge < COARSE_BUNDLE_GAUGE && input.strand_count > COARSE_BUNDLE_MAX_STRANDS {
        advisories.push(Advisory::CoarseStrandBundle {
            gauge: input.gauge,
            strand_count: input.strand_count,
        });
    }
    if electrical.total_cma < MIN_MANUFACTURABLE_CMA {
        advisories.push(Advisory::BelowManufacturableArea {
            total_cma: electrical.total_cma,
        });
    }
    if construction.operations == 0 {
        advisories.push(Advisory::UnbunchedGauge { gauge: input.gauge });
    } else if !construction.is_valid {
        advisories.push(Advisory::InfeasibleConstruction {
            requested: input.strand_count,
            nearest: construction.final_strand_count,
        });
    }
    if !has_film {
        advisories.push(Advisory::FilmUnavailable {
            gauge: input.gauge,
            film: input.film,
        });
    }

    advisories
}
