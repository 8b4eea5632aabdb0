//! # Error Types
//!
//! Structured error types for litz_core. Every failure a caller can recover
//! from names the offending field or value, so a form can show a
//! field-specific message instead of a generic failure.
//!
//! Construction infeasibility is *not* an error: it is reported through
//! [`ConstructionResult::is_valid`](crate::calculations::ConstructionResult).
//!
//! ## Example
//!
//! ```rust
//! use litz_core::errors::{CalcError, CalcResult};
//!
//! fn validate_frequency(frequency_hz: f64) -> CalcResult<()> {
//!     if !(frequency_hz > 0.0) {
//!         return Err(CalcError::invalid_input(
//!             "frequency_hz",
//!             frequency_hz.to_string(),
//!             "Frequency must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for litz_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (zero strand count, non-positive frequency, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Gauge is not present in the reference tables
    #[error("AWG {gauge} not found in reference tables")]
    GaugeNotFound { gauge: u32 },

    /// Bundle area is smaller than every tabulated solid wire
    #[error("Total area {total_cma} CMA is below the smallest tabulated gauge ({smallest_cma} CMA)")]
    BelowRange { total_cma: f64, smallest_cma: f64 },

    /// Reference tables or settings are missing or malformed
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a GaugeNotFound error
    pub fn gauge_not_found(gauge: u32) -> Self {
        CalcError::GaugeNotFound { gauge }
    }

    /// Create a Configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        CalcError::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Name of the input field this error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(field),
            CalcError::GaugeNotFound { .. } => Some("gauge"),
            _ => None,
        }
    }

    /// A broken table or settings file: nothing may be calculated with it
    pub fn is_fatal(&self) -> bool {
        matches!(self, CalcError::Configuration { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::GaugeNotFound { .. } => "GAUGE_NOT_FOUND",
            CalcError::BelowRange { .. } => "BELOW_RANGE",
            CalcError::Configuration { .. } => "CONFIGURATION_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::Configuration {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("strand_count", "0", "Strand count must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("InvalidInput"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::gauge_not_found(999).error_code(), "GAUGE_NOT_FOUND");
        assert_eq!(CalcError::configuration("bad table").error_code(), "CONFIGURATION_ERROR");
        let below = CalcError::BelowRange { total_cma: 0.5, smallest_cma: 0.98 };
        assert_eq!(below.error_code(), "BELOW_RANGE");
    }

    #[test]
    fn test_field_and_fatal() {
        assert_eq!(CalcError::gauge_not_found(7).field(), Some("gauge"));
        assert_eq!(
            CalcError::invalid_input("frequency_hz", "0", "must be positive").field(),
            Some("frequency_hz")
        );
        assert!(CalcError::configuration("missing row").is_fatal());
        assert!(!CalcError::gauge_not_found(7).is_fatal());
    }

    #[test]
    fn test_display() {
        let err = CalcError::gauge_not_found(999);
        assert_eq!(err.to_string(), "AWG 999 not found in reference tables");
    }
}
