//! # litz_core - Litz Wire Design Calculation Engine
//!
//! `litz_core` reproduces the design formulas of the litz wire design
//! spreadsheet: bundle construction, bundle area and equivalent gauge, DC
//! resistance at temperature, skin depth, N1 max and the bundle diameter over
//! film and serve. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over read-only reference tables
//! - **JSON-First**: All result types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Spreadsheet parity**: Same constants, same order of operations
//!
//! ## Quick Start
//!
//! ```rust
//! use litz_core::{LitzDesignInput, LitzEngine};
//!
//! let engine = LitzEngine::standard().unwrap();
//! let result = engine
//!     .design(&LitzDesignInput::new(100, 40).with_temperature(60.0).with_frequency(1200.0))
//!     .unwrap();
//!
//! assert_eq!(result.electrical.equivalent_awg, "21");
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! # let _ = json;
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Facade over all calculations
//! - [`calculations`] - Construction, electrical and skin-effect calculators
//! - [`tables`] - AWG and construction-factor reference data
//! - [`settings`] - Factor range, operation cap, input defaults
//! - [`materials`] - Conductor resistivity models, strand film builds and grades
//! - [`units`] - Type-safe unit wrappers
//! - [`constants`] - Physical constants and unit conversions
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod materials;
pub mod settings;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    Advisory, BundleDiameters, ConstructionResult, ElectricalProperties, LitzDesignInput,
    LitzDesignResult, N1MaxResult, NylonServe,
};
pub use engine::LitzEngine;
pub use errors::{CalcError, CalcResult};
pub use materials::{FilmType, MagnetWireGrade};
pub use settings::{CalculationDefaults, ConstructionLimits, EngineSettings};
pub use tables::{GaugeEntry, ReferenceTables};
