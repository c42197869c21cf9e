//! Network Metrics - Whole-graph summary statistics on a 0-100 scale.

use serde::{Deserialize, Serialize};

use super::{Cluster, EdgeKind, RelationshipGraph};
use crate::domain::foundation::Score;

/// Summary statistics of the relationship graph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkMetricsSnapshot {
    pub density: Score,
    pub centralization: Score,
    pub clustering_coefficient: Score,
    pub modularity: Score,
    pub polarization: Score,
}

/// Calculator for network metrics.
pub struct NetworkMetrics;

impl NetworkMetrics {
    /// Computes all metrics.
    ///
    /// # Formulas
    /// - density = |edges| / (k(k-1)/2)
    /// - centralization = Σ(maxDegree - degree) / ((k-1)(k-2)), k > 2
    /// - clustering coefficient = mean cluster coherence
    /// - modularity = 1 - 1/|clusters|, |clusters| > 1
    /// - polarization = opposition edges / |edges|
    ///
    /// # Edge Cases
    /// - Empty graph: All metrics 0
    pub fn compute(graph: &RelationshipGraph, clusters: &[Cluster]) -> NetworkMetricsSnapshot {
        NetworkMetricsSnapshot {
            density: Self::density(graph),
            centralization: Self::centralization(graph),
            clustering_coefficient: Self::clustering_coefficient(clusters),
            modularity: Self::modularity(clusters),
            polarization: Self::polarization(graph),
        }
    }

    pub fn density(graph: &RelationshipGraph) -> Score {
        let k = graph.node_count();
        if k < 2 {
            return Score::ZERO;
        }
        let possible = (k * (k - 1) / 2) as f64;
        Score::from_fraction(graph.edge_count() as f64 / possible)
    }

    pub fn centralization(graph: &RelationshipGraph) -> Score {
        let k = graph.node_count();
        if k <= 2 {
            return Score::ZERO;
        }
        let degrees: Vec<usize> = graph.nodes.iter().map(|&id| graph.degree(id)).collect();
        let max_degree = degrees.iter().copied().max().unwrap_or(0);
        let spread: usize = degrees.iter().map(|d| max_degree - d).sum();
        Score::from_fraction(spread as f64 / ((k - 1) * (k - 2)) as f64)
    }

    pub fn clustering_coefficient(clusters: &[Cluster]) -> Score {
        if clusters.is_empty() {
            return Score::ZERO;
        }
        let total: f64 = clusters.iter().map(|c| c.coherence).sum();
        Score::from_fraction(total / clusters.len() as f64)
    }

    pub fn modularity(clusters: &[Cluster]) -> Score {
        if clusters.len() <= 1 {
            return Score::ZERO;
        }
        Score::from_fraction(1.0 - 1.0 / clusters.len() as f64)
    }

    pub fn polarization(graph: &RelationshipGraph) -> Score {
        if graph.edges.is_empty() {
            return Score::ZERO;
        }
        let oppositions = graph
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Opposition)
            .count();
        Score::from_fraction(oppositions as f64 / graph.edge_count() as f64)
    }
}
