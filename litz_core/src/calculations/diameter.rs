//! # Bundle Diameter
//!
//! Outside diameter of the finished litz bundle over the strand insulation,
//! and over an optional nylon serve, with the matching part number.
//!
//! ## Formulas
//!
//! ```text
//! bare OD   = round₃(√n × film OD × packing)      for film OD min, nom, max
//! served OD = round₃(bare OD + serve allowance)
//! part      = RL-{n}-{awg}{film code}{grade code}[-SN|-DN]-XX
//! ```
//!
//! Every figure is rounded to the nearest thousandth of an inch, which is
//! how the diameters are quoted.
//!
//! ## Example
//!
//! ```rust
//! use litz_core::calculations::diameter::{bare_diameters, NylonServe};
//! use litz_core::materials::{FilmType, MagnetWireGrade};
//! use litz_core::tables::ReferenceTables;
//!
//! let awg40 = ReferenceTables::standard().unwrap().lookup(40).unwrap();
//! let bare = bare_diameters(awg40, 100, 1.236, FilmType::Single, MagnetWireGrade::Mw79C).unwrap();
//! assert_eq!(bare.nom_in, 0.043);
//! assert_eq!(bare.part_number, "RL-100-40S79-XX");
//!
//! let served = bare.served(NylonServe::Single).unwrap();
//! assert_eq!(served.part_number, "RL-100-40S79-SN-XX");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{FilmType, MagnetWireGrade};
use crate::tables::GaugeEntry;

/// Suffix every unserved part number ends with
const PART_NUMBER_SUFFIX: &str = "-XX";

/// Nylon serve wrapped over the bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NylonServe {
    #[default]
    None,
    Single,
    Double,
}

impl NylonServe {
    pub const ALL: [NylonServe; 3] = [NylonServe::None, NylonServe::Single, NylonServe::Double];

    /// Added to the bare (min, nom, max) diameters, inches
    pub fn allowance_in(&self) -> (f64, f64, f64) {
        match self {
            NylonServe::None => (0.0, 0.0, 0.0),
            NylonServe::Single => (0.002, 0.002, 0.003),
            NylonServe::Double => (0.004, 0.004, 0.006),
        }
    }

    /// Part-number segment, if any
    pub fn code(&self) -> Option<&'static str> {
        match self {
            NylonServe::None => None,
            NylonServe::Single => Some("SN"),
            NylonServe::Double => Some("DN"),
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "bare" => Ok(NylonServe::None),
            "single" | "sn" => Ok(NylonServe::Single),
            "double" | "dn" => Ok(NylonServe::Double),
            _ => Err(CalcError::invalid_input(
                "serve",
                s,
                "Expected one of: none, single, double",
            )),
        }
    }
}

/// Outside diameter band of a bundle and its part number.
///
/// ## JSON Example
///
/// ```json
/// {
///   "min_in": 0.04,
///   "nom_in": 0.043,
///   "max_in": 0.046,
///   "part_number": "RL-100-40S79-XX"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleDiameters {
    pub min_in: f64,
    pub nom_in: f64,
    pub max_in: f64,
    pub part_number: String,
}

impl BundleDiameters {
    /// Diameters over a nylon serve; `None` for [`NylonServe::None`].
    pub fn served(&self, serve: NylonServe) -> Option<BundleDiameters> {
        let code = serve.code()?;
        let (min, nom, max) = serve.allowance_in();
        let base = self
            .part_number
            .strip_suffix(PART_NUMBER_SUFFIX)
            .unwrap_or(&self.part_number);
        Some(BundleDiameters {
            min_in: round_thousandths(self.min_in + min),
            nom_in: round_thousandths(self.nom_in + nom),
            max_in: round_thousandths(self.max_in + max),
            part_number: format!("{}-{}{}", base, code, PART_NUMBER_SUFFIX),
        })
    }
}

/// Bare litz diameters of `strand_count` insulated strands.
///
/// Fails when `film` is not drawn at this gauge.
pub fn bare_diameters(
    entry: &GaugeEntry,
    strand_count: u32,
    packing_factor: f64,
    film: FilmType,
    grade: MagnetWireGrade,
) -> CalcResult<BundleDiameters> {
    let od = entry.film.get(film).ok_or_else(|| {
        CalcError::invalid_input(
            "film",
            film.display_name(),
            format!("{} film is not available for AWG {}", film, entry.gauge),
        )
    })?;
    let scale = (strand_count as f64).sqrt() * packing_factor;

    Ok(BundleDiameters {
        min_in: round_thousandths(scale * od.min),
        nom_in: round_thousandths(scale * od.nom),
        max_in: round_thousandths(scale * od.max),
        part_number: format!(
            "RL-{}-{}{}{}{}",
            strand_count,
            entry.gauge,
            film.code(),
            grade.code(),
            PART_NUMBER_SUFFIX
        ),
    })
}

fn round_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    fn entry(gauge: u32) -> &'static GaugeEntry {
        ReferenceTables::standard().unwrap().lookup(gauge).unwrap()
    }

    #[test]
    fn test_reference_bundle_single_film() {
        let bare = bare_diameters(entry(40), 100, 1.236, FilmType::Single, MagnetWireGrade::Mw79C).unwrap();
        // round(10 × 0.0035 × 1.236, 3)
        assert_eq!(bare.nom_in, 0.043);
        assert_eq!(bare.min_in, 0.04);
        assert_eq!(bare.max_in, 0.046);
        assert_eq!(bare.part_number, "RL-100-40S79-XX");
    }

    #[test]
    fn test_heavy_film_and_grade_in_part_number() {
        let bare = bare_diameters(entry(40), 100, 1.236, FilmType::Heavy, MagnetWireGrade::Mw80C).unwrap();
        assert_eq!((bare.min_in, bare.nom_in, bare.max_in), (0.044, 0.047, 0.049));
        assert_eq!(bare.part_number, "RL-100-40H80-XX");
    }

    #[test]
    fn test_nylon_serve() {
        let bare = bare_diameters(entry(40), 100, 1.236, FilmType::Single, MagnetWireGrade::Mw79C).unwrap();

        let single = bare.served(NylonServe::Single).unwrap();
        assert_eq!((single.min_in, single.nom_in, single.max_in), (0.042, 0.045, 0.049));
        assert_eq!(single.part_number, "RL-100-40S79-SN-XX");

        let double = bare.served(NylonServe::Double).unwrap();
        assert_eq!((double.min_in, double.nom_in, double.max_in), (0.044, 0.047, 0.052));
        assert_eq!(double.part_number, "RL-100-40S79-DN-XX");

        assert_eq!(bare.served(NylonServe::None), None);
    }

    #[test]
    fn test_large_quadruple_bundle() {
        let bare =
            bare_diameters(entry(40), 390_625, 1.363, FilmType::Quadruple, MagnetWireGrade::Mw16C).unwrap();
        assert_eq!((bare.min_in, bare.nom_in, bare.max_in), (3.578, 3.748, 3.919));
        assert_eq!(bare.part_number, "RL-390625-40Q16-XX");
    }

    #[test]
    fn test_missing_film_build() {
        let err = bare_diameters(entry(46), 100, 1.236, FilmType::Triple, MagnetWireGrade::Mw79C).unwrap_err();
        assert_eq!(err.field(), Some("film"));
        assert!(err.to_string().contains("AWG 46"));

        // No film data at all for the heaviest gauges
        assert!(bare_diameters(entry(10), 1, 1.155, FilmType::Single, MagnetWireGrade::Mw79C).is_err());
    }

    #[test]
    fn test_serve_parsing() {
        assert_eq!(NylonServe::from_str_flexible("DN").unwrap(), NylonServe::Double);
        assert_eq!(NylonServe::from_str_flexible("none").unwrap(), NylonServe::None);
        assert!(NylonServe::from_str_flexible("triple").is_err());
    }
}
