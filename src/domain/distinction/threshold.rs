//! Significance thresholds for distinguishing statements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// |z| cutoff for p < 0.01.
pub const STRICT_CUTOFF: f64 = 2.58;

/// |z| cutoff for p < 0.05.
pub const MODERATE_CUTOFF: f64 = 1.96;

/// |z| cutoff for p < 0.10.
pub const INCLUSIVE_CUTOFF: f64 = 1.645;

/// How demanding statement selection is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdLevel {
    Strict,
    #[default]
    Moderate,
    Inclusive,
}

impl ThresholdLevel {
    /// Minimum |z| for a statement to qualify.
    pub fn cutoff(&self) -> f64 {
        match self {
            ThresholdLevel::Strict => STRICT_CUTOFF,
            ThresholdLevel::Moderate => MODERATE_CUTOFF,
            ThresholdLevel::Inclusive => INCLUSIVE_CUTOFF,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThresholdLevel::Strict => "strict",
            ThresholdLevel::Moderate => "moderate",
            ThresholdLevel::Inclusive => "inclusive",
        }
    }
}

impl fmt::Display for ThresholdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ThresholdLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ThresholdLevel::Strict),
            "moderate" => Ok(ThresholdLevel::Moderate),
            "inclusive" => Ok(ThresholdLevel::Inclusive),
            other => Err(ValidationError::invalid_value(
                "threshold_level",
                format!("unknown level '{}'", other),
            )),
        }
    }
}

/// Significance band of a distinguishing statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    High,
    Medium,
    Low,
}

impl Significance {
    /// Band for a z-score, independent of the selection threshold.
    pub fn from_z(z: f64) -> Self {
        let magnitude = z.abs();
        if magnitude >= STRICT_CUTOFF {
            Significance::High
        } else if magnitude >= MODERATE_CUTOFF {
            Significance::Medium
        } else {
            Significance::Low
        }
    }

    /// Adverb used when describing a loading of this band.
    pub fn adverb(&self) -> &'static str {
        match self {
            Significance::High => "strongly",
            Significance::Medium => "moderately",
            Significance::Low => "somewhat",
        }
    }
}
