//! Conductor Materials
//!
//! Resistivity and temperature-coefficient presets for strand metals, and
//! the linear temperature model every resistivity/resistance correction goes
//! through.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Linear resistivity model ρ(T) = ρ_ref × (1 + α × (T − T_ref)).
///
/// This is the only place the temperature correction is written down; DC
/// resistance and skin depth both call into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureModel {
    /// Resistivity at the reference temperature (Ω·m)
    pub reference_resistivity: f64,
    /// Temperature coefficient of resistance (per °C)
    pub temperature_coefficient: f64,
    /// Reference temperature (°C)
    pub reference_temperature_c: f64,
}

impl TemperatureModel {
    /// Annealed copper as used by the reference spreadsheet (E4, N6, O6).
    pub const COPPER: TemperatureModel = TemperatureModel {
        reference_resistivity: 1.72e-8,
        temperature_coefficient: 0.00393,
        reference_temperature_c: 20.0,
    };

    /// Multiplier `1 + α × (T − T_ref)`
    pub fn correction_factor(&self, temperature_c: f64) -> f64 {
        1.0 + self.temperature_coefficient * (temperature_c - self.reference_temperature_c)
    }

    /// Corrected resistivity ρ(T) in Ω·m (spreadsheet Q6)
    pub fn resistivity_at(&self, temperature_c: f64) -> f64 {
        self.reference_resistivity * self.correction_factor(temperature_c)
    }

    /// Scale a resistance measured at the reference temperature to `temperature_c`
    pub fn resistance_at(&self, reference_resistance: f64, temperature_c: f64) -> f64 {
        reference_resistance * self.correction_factor(temperature_c)
    }

    /// Reject non-finite or non-positive model parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.reference_resistivity.is_finite() && self.reference_resistivity > 0.0) {
            return Err(CalcError::configuration(format!(
                "reference_resistivity must be a positive number, got {}",
                self.reference_resistivity
            )));
        }
        if !self.temperature_coefficient.is_finite() {
            return Err(CalcError::configuration("temperature_coefficient must be finite"));
        }
        if !self.reference_temperature_c.is_finite() {
            return Err(CalcError::configuration("reference_temperature_c must be finite"));
        }
        Ok(())
    }
}

impl Default for TemperatureModel {
    fn default() -> Self {
        TemperatureModel::COPPER
    }
}

/// Strand metals with published resistivity presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConductorMaterial {
    #[default]
    Copper,
    Aluminum,
    Silver,
    Gold,
}

impl ConductorMaterial {
    /// All materials for UI selection
    pub const ALL: [ConductorMaterial; 4] = [
        ConductorMaterial::Copper,
        ConductorMaterial::Aluminum,
        ConductorMaterial::Silver,
        ConductorMaterial::Gold,
    ];

    /// Temperature model for this metal, referenced to 20 °C
    pub fn temperature_model(&self) -> TemperatureModel {
        let (reference_resistivity, temperature_coefficient) = match self {
            ConductorMaterial::Copper => (1.72e-8, 0.00393),
            ConductorMaterial::Aluminum => (2.82e-8, 0.00429),
            ConductorMaterial::Silver => (1.59e-8, 0.0038),
            ConductorMaterial::Gold => (2.44e-8, 0.0034),
        };
        TemperatureModel {
            reference_resistivity,
            temperature_coefficient,
            reference_temperature_c: 20.0,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "copper" | "cu" => Ok(ConductorMaterial::Copper),
            "aluminum" | "aluminium" | "al" => Ok(ConductorMaterial::Aluminum),
            "silver" | "ag" => Ok(ConductorMaterial::Silver),
            "gold" | "au" => Ok(ConductorMaterial::Gold),
            _ => Err(CalcError::invalid_input(
                "material",
                s,
                "Expected one of: copper, aluminum, silver, gold",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
            ConductorMaterial::Silver => "Silver",
            ConductorMaterial::Gold => "Gold",
        }
    }
}

impl std::fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copper_resistivity_at_60c() {
        let rho = TemperatureModel::COPPER.resistivity_at(60.0);
        // 1.72e-8 × (1 + 0.00393 × 40)
        assert!((rho - 1.990384e-8).abs() < 1e-12);
    }

    #[test]
    fn test_reference_temperature_is_identity() {
        let model = TemperatureModel::COPPER;
        assert_eq!(model.correction_factor(20.0), 1.0);
        assert_eq!(model.resistance_at(1152.33, 20.0), 1152.33);
    }

    #[test]
    fn test_copper_preset_matches_model() {
        assert_eq!(ConductorMaterial::Copper.temperature_model(), TemperatureModel::COPPER);
    }

    #[test]
    fn test_material_parsing() {
        assert_eq!(
            ConductorMaterial::from_str_flexible("Aluminium").unwrap(),
            ConductorMaterial::Aluminum
        );
        assert_eq!(ConductorMaterial::from_str_flexible("cu").unwrap(), ConductorMaterial::Copper);
        assert!(ConductorMaterial::from_str_flexible("brass").is_err());
    }

    #[test]
    fn test_invalid_model_rejected() {
        let model = TemperatureModel {
            reference_resistivity: f64::NAN,
            ..TemperatureModel::COPPER
        };
        assert!(model.validate().unwrap_err().is_fatal());
    }
}
