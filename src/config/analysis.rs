//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::distinction::ThresholdLevel;
use crate::domain::interaction::{GraphOptions, DEFAULT_FILTER_THRESHOLD, DEFAULT_SIGNIFICANT_LOADING};

/// Tunable thresholds of the analysis pipeline
///
/// The strong-cluster threshold is fixed and not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum |r| for a relationship edge to be kept
    #[serde(default = "default_filter_threshold")]
    pub filter_threshold: f64,

    /// Cutoff level for distinguishing statements
    #[serde(default)]
    pub threshold_level: ThresholdLevel,

    /// |loading| above which a loading counts toward shared/conflicting counts
    #[serde(default = "default_significant_loading")]
    pub significant_loading: f64,
}

impl AnalysisConfig {
    /// Graph builder options derived from this configuration
    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            filter_threshold: self.filter_threshold,
            significant_loading: self.significant_loading,
        }
    }

    /// Returns a copy with a different filter threshold
    pub fn with_filter_threshold(mut self, filter_threshold: f64) -> Self {
        self.filter_threshold = filter_threshold;
        self
    }

    /// Returns a copy with a different threshold level
    pub fn with_threshold_level(mut self, threshold_level: ThresholdLevel) -> Self {
        self.threshold_level = threshold_level;
        self
    }

    /// Validate analysis configuration
    ///
    /// Applies the same rules the graph builder enforces on its options.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.graph_options().validate()?;
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter_threshold: default_filter_threshold(),
            threshold_level: ThresholdLevel::default(),
            significant_loading: default_significant_loading(),
        }
    }
}

fn default_filter_threshold() -> f64 {
    DEFAULT_FILTER_THRESHOLD
}

fn default_significant_loading() -> f64 {
    DEFAULT_SIGNIFICANT_LOADING
}
