//! # Materials
//!
//! Conductor metals and their temperature-dependent resistivity, plus the
//! film builds and grades of the strand insulation.
//!
//! ## Example
//!
//! ```rust
//! use litz_core::materials::{ConductorMaterial, TemperatureModel};
//!
//! let copper = ConductorMaterial::Copper.temperature_model();
//! assert_eq!(copper, TemperatureModel::COPPER);
//!
//! // Resistivity rises with temperature for a positive coefficient
//! assert!(copper.resistivity_at(100.0) > copper.resistivity_at(20.0));
//! ```

pub mod conductor;
pub mod film;

pub use conductor::{ConductorMaterial, TemperatureModel};
pub use film::{FilmType, MagnetWireGrade};
