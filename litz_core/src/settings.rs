//! # Engine Settings
//!
//! Calibration constants that are policy rather than physics: the
//! manufacturable factor range for a single bunching pass, the operation
//! cap, and the defaults a caller gets when it omits temperature or
//! frequency.
//!
//! `max_factor` applies to every gauge. Each gauge row also carries its own
//! `max_ends`, and a pass on that gauge is limited by the smaller of the two.
//!
//! Settings deserialize from TOML with every field optional:
//!
//! ```toml
//! [construction]
//! min_factor = 2
//! max_factor = 66
//! max_operations = 5
//!
//! [defaults]
//! temperature_c = 20.0
//! frequency_hz = 1000.0
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Upper bound on the operation cap, whatever the settings say.
pub const HARD_OPERATION_CAP: u32 = 8;

/// All engine settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    /// Bunching pass limits
    #[serde(default)]
    pub construction: ConstructionLimits,

    /// Defaults for optional inputs
    #[serde(default)]
    pub defaults: CalculationDefaults,
}

impl EngineSettings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: EngineSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate all sections.
    pub fn validate(&self) -> CalcResult<()> {
        self.construction.validate()?;
        self.defaults.validate()
    }
}

/// Manufacturable range for one bunching/stranding operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructionLimits {
    /// Smallest number of ends one pass may combine
    #[serde(default = "default_min_factor")]
    pub min_factor: u32,

    /// Largest number of ends one pass may combine, on any gauge
    #[serde(default = "default_max_factor")]
    pub max_factor: u32,

    /// Most passes a construction may take
    #[serde(default = "default_max_operations")]
    pub max_operations: u32,
}

fn default_min_factor() -> u32 {
    2
}

fn default_max_factor() -> u32 {
    66
}

fn default_max_operations() -> u32 {
    5
}

impl Default for ConstructionLimits {
    fn default() -> Self {
        ConstructionLimits {
            min_factor: default_min_factor(),
            max_factor: default_max_factor(),
            max_operations: default_max_operations(),
        }
    }
}

impl ConstructionLimits {
    /// Whether a single pass can combine `factor` ends
    pub fn allows_factor(&self, factor: u64) -> bool {
        (self.min_factor as u64..=self.max_factor as u64).contains(&factor)
    }

    /// Limits for a gauge whose bunching pass takes at most `max_ends` strands.
    ///
    /// `None` when no pass on that gauge reaches `min_factor`.
    pub fn capped_at(&self, max_ends: u32) -> Option<ConstructionLimits> {
        let max_factor = self.max_factor.min(max_ends);
        (max_factor >= self.min_factor).then_some(ConstructionLimits {
            max_factor,
            ..*self
        })
    }

    /// Reject ranges that would make the search meaningless or unbounded.
    pub fn validate(&self) -> CalcResult<()> {
        if self.min_factor < 2 {
            return Err(CalcError::configuration(format!(
                "construction.min_factor must be at least 2, got {}",
                self.min_factor
            )));
        }
        if self.max_factor < self.min_factor {
            return Err(CalcError::configuration(format!(
                "construction.max_factor ({}) is below min_factor ({})",
                self.max_factor, self.min_factor
            )));
        }
        if self.max_operations == 0 || self.max_operations > HARD_OPERATION_CAP {
            return Err(CalcError::configuration(format!(
                "construction.max_operations must be between 1 and {}, got {}",
                HARD_OPERATION_CAP, self.max_operations
            )));
        }
        Ok(())
    }
}

/// Values used when a caller leaves temperature or frequency unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculationDefaults {
    /// Operating temperature (°C)
    #[serde(default = "default_temperature_c")]
    pub temperature_c: f64,

    /// Operating frequency (Hz)
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f64,
}

fn default_temperature_c() -> f64 {
    20.0
}

fn default_frequency_hz() -> f64 {
    1000.0
}

impl Default for CalculationDefaults {
    fn default() -> Self {
        CalculationDefaults {
            temperature_c: default_temperature_c(),
            frequency_hz: default_frequency_hz(),
        }
    }
}

impl CalculationDefaults {
    fn validate(&self) -> CalcResult<()> {
        if !self.temperature_c.is_finite() {
            return Err(CalcError::configuration("defaults.temperature_c must be finite"));
        }
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return Err(CalcError::configuration(format!(
                "defaults.frequency_hz must be positive, got {}",
                self.frequency_hz
            )));
        }
        Ok(())
    }
}
