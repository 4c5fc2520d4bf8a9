//! # Error Types
//!
//! Structured error types for shearwall_core.
//!
//! Only hard precondition failures are errors here: a wall with zero thickness,
//! no reinforcement layers, or a spacing that leaves room for fewer than two bars
//! cannot be analysed at all. Code-conformance failures are reported as
//! [`Diagnostic`](crate::calculations::validation::Diagnostic)s, and numerical
//! degeneracy in the neutral-axis search is a
//! [`SolveFailure`](crate::calculations::neutral_axis::SolveFailure) that the
//! interaction sweep turns into a termination status.
//!
//! ## Example
//!
//! ```rust
//! use shearwall_core::errors::{CalcError, CalcResult};
//!
//! fn check_thickness(t_mm: f64) -> CalcResult<()> {
//!     if t_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "thickness_mm",
//!             t_mm.to_string(),
//!             "Thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_thickness(-5.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the engine
pub type CalcResult<T> = Result<T, CalcError>;

/// Reasons a wall cannot be analysed.
///
/// Serializes as `{"type": "InvalidInput", "details": {...}}`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A field is non-finite, out of range, or otherwise unusable
    #[error("'{field}' = {value}: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A stage of the analysis (bar layout, sweep setup) has nothing to work with
    #[error("{stage} failed: {reason}")]
    CalculationFailed { stage: String, reason: String },

    /// Wall or configuration JSON could not be read or written
    #[error("JSON error: {reason}")]
    Serialization { reason: String },
}

impl CalcError {
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn calculation_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Stable code for scripts consuming `--json` output
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN and infinite values before they reach the solver.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"))
    }
}

/// Reject zero, negative and non-finite values.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    let value = require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_json() {
        let error = CalcError::invalid_input("thickness_mm", "-5", "Must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.starts_with("{\"type\":\"InvalidInput\",\"details\":"));
        let back: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, error);
    }

    #[test]
    fn test_messages() {
        let error = CalcError::calculation_failed("bar layout", "no room for two bars");
        assert_eq!(error.to_string(), "bar layout failed: no room for two bars");
        let error = CalcError::invalid_input("layers", "0", "At least one layer");
        assert_eq!(error.to_string(), "'layers' = 0: At least one layer");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_input("f_c", "0", "Must be positive").error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            CalcError::calculation_failed("bar layout", "no room").error_code(),
            "CALCULATION_FAILED"
        );
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("t", 200.0).unwrap(), 200.0);
        assert!(require_positive("t", 0.0).is_err());
        assert!(require_positive("t", -1.0).is_err());
        assert!(require_positive("t", f64::NAN).is_err());
        assert!(require_finite("n_u", f64::INFINITY).is_err());
        assert_eq!(require_finite("n_u", -10.0).unwrap(), -10.0);
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let calc: CalcError = err.into();
        assert_eq!(calc.error_code(), "SERIALIZATION_ERROR");
    }
}
