//! Magnet Wire Insulation
//!
//! Film build and NEMA grade of the insulated strands. Together with the
//! strand count and gauge they make up the litz part number.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Film build (insulation thickness class) of each strand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilmType {
    #[default]
    Single,
    Heavy,
    Triple,
    Quadruple,
}

impl FilmType {
    /// All builds for UI selection
    pub const ALL: [FilmType; 4] = [
        FilmType::Single,
        FilmType::Heavy,
        FilmType::Triple,
        FilmType::Quadruple,
    ];

    /// Letter used in part numbers
    pub fn code(&self) -> char {
        match self {
            FilmType::Single => 'S',
            FilmType::Heavy => 'H',
            FilmType::Triple => 'T',
            FilmType::Quadruple => 'Q',
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" | "s" => Ok(FilmType::Single),
            "heavy" | "h" => Ok(FilmType::Heavy),
            "triple" | "t" => Ok(FilmType::Triple),
            "quadruple" | "quad" | "q" => Ok(FilmType::Quadruple),
            _ => Err(CalcError::invalid_input(
                "film",
                s,
                "Expected one of: single, heavy, triple, quadruple",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FilmType::Single => "Single",
            FilmType::Heavy => "Heavy",
            FilmType::Triple => "Triple",
            FilmType::Quadruple => "Quadruple",
        }
    }
}

impl std::fmt::Display for FilmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// NEMA MW magnet wire specification of the strand insulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MagnetWireGrade {
    #[default]
    #[serde(rename = "MW 79-C")]
    Mw79C,
    #[serde(rename = "MW 80-C")]
    Mw80C,
    #[serde(rename = "MW 77-C")]
    Mw77C,
    #[serde(rename = "MW 35-C")]
    Mw35C,
    #[serde(rename = "MW 16-C")]
    Mw16C,
}

impl MagnetWireGrade {
    pub const ALL: [MagnetWireGrade; 5] = [
        MagnetWireGrade::Mw79C,
        MagnetWireGrade::Mw80C,
        MagnetWireGrade::Mw77C,
        MagnetWireGrade::Mw35C,
        MagnetWireGrade::Mw16C,
    ];

    /// Spec number used in part numbers ("79" for MW 79-C)
    pub fn code(&self) -> &'static str {
        match self {
            MagnetWireGrade::Mw79C => "79",
            MagnetWireGrade::Mw80C => "80",
            MagnetWireGrade::Mw77C => "77",
            MagnetWireGrade::Mw35C => "35",
            MagnetWireGrade::Mw16C => "16",
        }
    }

    /// Parse "MW 79-C", "mw79c" or just "79"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
        Self::ALL
            .into_iter()
            .find(|grade| grade.code() == digits)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "grade",
                    s,
                    "Expected one of: MW 79-C, MW 80-C, MW 77-C, MW 35-C, MW 16-C",
                )
            })
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MagnetWireGrade::Mw79C => "MW 79-C",
            MagnetWireGrade::Mw80C => "MW 80-C",
            MagnetWireGrade::Mw77C => "MW 77-C",
            MagnetWireGrade::Mw35C => "MW 35-C",
            MagnetWireGrade::Mw16C => "MW 16-C",
        }
    }
}

impl std::fmt::Display for MagnetWireGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
