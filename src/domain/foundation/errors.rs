//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

use super::FactorId;

/// Errors raised when an input value or option is outside its allowed domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid value validation error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DataInconsistency,
    ValidationFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::DataInconsistency => "DATA_INCONSISTENCY",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Errors that abort an analysis batch. No partial results are produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Inconsistent factor data ({}): {reason}", format_ids(.factor_ids))]
    DataInconsistency {
        factor_ids: Vec<FactorId>,
        reason: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    /// Creates a data inconsistency error for the offending factors.
    pub fn data_inconsistency(factor_ids: Vec<FactorId>, reason: impl Into<String>) -> Self {
        AnalysisError::DataInconsistency {
            factor_ids,
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::DataInconsistency { .. } => ErrorCode::DataInconsistency,
            AnalysisError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

fn format_ids(ids: &[FactorId]) -> String {
    if ids.is_empty() {
        return "no factor".to_string();
    }
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("factors {}", ids.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("filter_threshold", 0.0, 1.0, 1.5);
        assert_eq!(
            format!("{}", err),
            "Field 'filter_threshold' must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn validation_error_invalid_value_displays_correctly() {
        let err = ValidationError::invalid_value("threshold_level", "unknown level 'loose'");
        assert_eq!(
            format!("{}", err),
            "Field 'threshold_level' is invalid: unknown level 'loose'"
        );
    }

    #[test]
    fn data_inconsistency_names_offending_factors() {
        let err = AnalysisError::data_inconsistency(
            vec![FactorId::new(2), FactorId::new(5)],
            "loading length mismatch",
        );
        assert_eq!(
            format!("{}", err),
            "Inconsistent factor data (factors 2, 5): loading length mismatch"
        );
        assert_eq!(err.code(), ErrorCode::DataInconsistency);
    }

    #[test]
    fn validation_converts_into_analysis_error() {
        let err: AnalysisError = ValidationError::out_of_range("x", 0.0, 1.0, -1.0).into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::DataInconsistency), "DATA_INCONSISTENCY");
        assert_eq!(format!("{}", ErrorCode::ValidationFailed), "VALIDATION_FAILED");
    }
}
