//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::ValidationError as AnalysisValidationError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid analysis settings: {0}")]
    InvalidAnalysis(#[from] AnalysisValidationError),

    #[error("Log level directive cannot be empty")]
    EmptyLogLevel,
}
