//! ViewpointAnalysis - Runs the full interpretation pipeline over a snapshot.
//!
//! Order of computation:
//! - Relationship graph → clusters → {patterns, network metrics}
//! - Distinguishing statements per factor (independent of the graph)
//!
//! Contrasts are computed on demand from a finished report.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::domain::distinction::{
    ContrastAnalyzer, ContrastResult, DistinguishingStatementExtractor, FactorDistinction,
};
use crate::domain::foundation::{AnalysisError, FactorId, StudySnapshot};
use crate::domain::interaction::{
    Cluster, ClusterDetector, InteractionPattern, NetworkMetrics, NetworkMetricsSnapshot,
    PatternClassifier, RelationshipGraph, RelationshipGraphBuilder,
};
use crate::ports::NarrativeLookup;

/// Every output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub graph: RelationshipGraph,
    pub clusters: Vec<Cluster>,
    pub patterns: Vec<InteractionPattern>,
    pub metrics: NetworkMetricsSnapshot,
    pub distinctions: Vec<FactorDistinction>,
}

impl AnalysisReport {
    /// Finds the distinction computed for a factor.
    pub fn distinction(&self, factor: FactorId) -> Option<&FactorDistinction> {
        self.distinctions.iter().find(|d| d.factor_id == factor)
    }

    /// Finds the cluster holding a factor.
    pub fn cluster_of(&self, factor: FactorId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.contains(factor))
    }
}

/// Entry point for the analysis pipeline.
pub struct ViewpointAnalysis;

impl ViewpointAnalysis {
    /// Runs every analysis over a validated snapshot.
    ///
    /// Configuration is checked before any computation starts. The snapshot's
    /// own themes are consulted when `narrative` is `None`.
    ///
    /// # Errors
    /// - `Validation` for out-of-range configuration
    pub fn run(
        snapshot: &StudySnapshot,
        config: &AnalysisConfig,
        narrative: Option<&dyn NarrativeLookup>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let options = config.graph_options();
        if let Err(err) = options.validate() {
            warn!(error = %err, "Rejected analysis configuration");
            return Err(err.into());
        }

        let graph = RelationshipGraphBuilder::build(snapshot.factors(), options)?;
        debug!(
            factors = graph.node_count(),
            edges = graph.edge_count(),
            filter_threshold = config.filter_threshold,
            "Built relationship graph"
        );

        let narrative: &dyn NarrativeLookup = match narrative {
            Some(lookup) => lookup,
            None => snapshot.themes(),
        };
        let clusters = ClusterDetector::detect(&graph, narrative);
        let patterns = PatternClassifier::classify(&graph, &clusters);
        let metrics = NetworkMetrics::compute(&graph, &clusters);
        debug!(
            clusters = clusters.len(),
            patterns = patterns.len(),
            "Classified factor interactions"
        );

        let distinctions =
            DistinguishingStatementExtractor::extract_snapshot(snapshot, config.threshold_level);
        debug!(
            threshold_level = %config.threshold_level,
            distinguishing = distinctions.iter().map(|d| d.distinguishing.len()).sum::<usize>(),
            "Extracted distinguishing statements"
        );

        Ok(AnalysisReport {
            graph,
            clusters,
            patterns,
            metrics,
            distinctions,
        })
    }

    /// Contrasts two factors of a finished report.
    ///
    /// Returns `None` if either factor is not part of the report.
    pub fn contrast(report: &AnalysisReport, a: FactorId, b: FactorId) -> Option<ContrastResult> {
        let left = report.distinction(a)?;
        let right = report.distinction(b)?;
        Some(ContrastAnalyzer::contrast(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Factor, Statement};
    use crate::domain::interaction::PatternKind;
    use std::collections::HashMap;

    fn snapshot() -> StudySnapshot {
        StudySnapshot::new(
            vec![
                Factor::new(1, vec![2.7, -0.4, 0.2, 2.3, -2.6]),
                Factor::new(2, vec![2.5, 0.3, -0.1, -2.4, 2.6]),
            ],
            (1..=5).map(|i| Statement::new(i, format!("Statement {}", i))).collect(),
        )
        .unwrap()
    }

    #[test]
    fn run_produces_every_output() {
        let report = ViewpointAnalysis::run(&snapshot(), &AnalysisConfig::default(), None).unwrap();

        assert_eq!(report.graph.node_count(), 2);
        assert_eq!(report.clusters.len(), 2);
        assert!(!report.patterns.is_empty());
        assert_eq!(report.distinctions.len(), 2);
    }

    #[test]
    fn run_on_empty_snapshot_is_neutral() {
        let empty = StudySnapshot::new(vec![], vec![]).unwrap();
        let report = ViewpointAnalysis::run(&empty, &AnalysisConfig::default(), None).unwrap();

        assert!(report.graph.is_empty());
        assert!(report.clusters.is_empty());
        assert!(report.patterns.is_empty());
        assert!(report.distinctions.is_empty());
        assert_eq!(report.metrics, NetworkMetricsSnapshot::default());
    }

    #[test]
    fn run_rejects_invalid_config_before_computing() {
        let config = AnalysisConfig::default().with_filter_threshold(2.0);
        let err = ViewpointAnalysis::run(&snapshot(), &config, None).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
    }

    #[test]
    fn run_uses_snapshot_themes_by_default() {
        let snapshot = snapshot().with_themes([(FactorId::new(2), "Reformers".to_string())]);
        let report = ViewpointAnalysis::run(&snapshot, &AnalysisConfig::default(), None).unwrap();
        assert_eq!(report.cluster_of(FactorId::new(2)).unwrap().theme, "Reformers");
    }

    #[test]
    fn explicit_narrative_overrides_snapshot_themes() {
        let snapshot = snapshot().with_themes([(FactorId::new(2), "Reformers".to_string())]);
        let lookup = HashMap::from([(FactorId::new(2), "Modernizers".to_string())]);
        let report =
            ViewpointAnalysis::run(&snapshot, &AnalysisConfig::default(), Some(&lookup)).unwrap();
        assert_eq!(report.cluster_of(FactorId::new(2)).unwrap().theme, "Modernizers");
    }

    #[test]
    fn high_filter_threshold_isolates_factors() {
        let config = AnalysisConfig::default().with_filter_threshold(1.0);
        let report = ViewpointAnalysis::run(&snapshot(), &config, None).unwrap();

        assert!(report.graph.edges.is_empty());
        let isolated = report
            .patterns
            .iter()
            .filter(|p| p.kind == PatternKind::Isolated)
            .count();
        assert_eq!(isolated, 2);
    }

    #[test]
    fn contrast_requires_known_factors() {
        let report = ViewpointAnalysis::run(&snapshot(), &AnalysisConfig::default(), None).unwrap();

        assert!(ViewpointAnalysis::contrast(&report, FactorId::new(1), FactorId::new(2)).is_some());
        assert!(ViewpointAnalysis::contrast(&report, FactorId::new(1), FactorId::new(3)).is_none());
    }
}
