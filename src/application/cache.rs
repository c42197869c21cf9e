//! AnalysisCache - Caller-side memoization of analysis reports.
//!
//! Reports are keyed by a SHA-256 fingerprint of the factor set together with
//! the configuration, so any change to loadings, statements, themes or
//! thresholds produces a fresh computation.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use super::{AnalysisReport, ViewpointAnalysis};
use crate::config::AnalysisConfig;
use crate::domain::foundation::{AnalysisError, StudySnapshot};

/// Fingerprint of a snapshot plus configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Computes the key for a snapshot under a configuration.
    pub fn compute(snapshot: &StudySnapshot, config: &AnalysisConfig) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"factors");
        for factor in snapshot.factors() {
            hasher.update(factor.id.value().to_le_bytes());
            hasher.update((factor.loadings.len() as u64).to_le_bytes());
            for loading in &factor.loadings {
                hasher.update(loading.to_bits().to_le_bytes());
            }
        }

        hasher.update(b"statements");
        for statement in snapshot.statements() {
            hasher.update(statement.id.value().to_le_bytes());
            hasher.update((statement.text.len() as u64).to_le_bytes());
            hasher.update(statement.text.as_bytes());
        }

        hasher.update(b"themes");
        for (factor, theme) in snapshot.themes() {
            hasher.update(factor.value().to_le_bytes());
            hasher.update((theme.len() as u64).to_le_bytes());
            hasher.update(theme.as_bytes());
        }

        hasher.update(b"config");
        hasher.update(config.filter_threshold.to_bits().to_le_bytes());
        hasher.update(config.significant_loading.to_bits().to_le_bytes());
        hasher.update(config.threshold_level.label().as_bytes());

        let digest = hasher.finalize();
        Self(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thread-safe store of computed reports.
///
/// Only analyses that use the snapshot's own themes are cached; a custom
/// narrative lookup is opaque and cannot be fingerprinted.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    reports: Mutex<HashMap<CacheKey, Arc<AnalysisReport>>>,
}

impl AnalysisCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached report or computes and stores it.
    ///
    /// Errors are not cached.
    pub fn get_or_compute(
        &self,
        snapshot: &StudySnapshot,
        config: &AnalysisConfig,
    ) -> Result<Arc<AnalysisReport>, AnalysisError> {
        let key = CacheKey::compute(snapshot, config);

        if let Some(report) = self.lock().get(&key) {
            debug!(key = %key, "Analysis cache hit");
            return Ok(Arc::clone(report));
        }

        // Computed outside the lock; a concurrent miss on the same key yields
        // an identical report.
        let report = Arc::new(ViewpointAnalysis::run(snapshot, config, None)?);
        debug!(key = %key, "Analysis cache miss");

        let mut reports = self.lock();
        let stored = reports.entry(key).or_insert(report);
        Ok(Arc::clone(stored))
    }

    /// Number of cached reports.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every cached report.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Arc<AnalysisReport>>> {
        // A poisoned map is still structurally valid
        self.reports.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
