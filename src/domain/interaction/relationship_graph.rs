//! Relationship Graph Builder - Pairwise factor correlation and typed edges.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{validate_factors, AnalysisError, Factor, FactorId, ValidationError};

/// Default minimum |r| for an edge to be materialized.
pub const DEFAULT_FILTER_THRESHOLD: f64 = 0.3;

/// Default |loading| above which a loading counts as significant when
/// counting shared and conflicting statements.
pub const DEFAULT_SIGNIFICANT_LOADING: f64 = 0.4;

/// r above which a pair is a correlation edge.
pub const CORRELATION_CUTOFF: f64 = 0.5;

/// r below which a pair is an opposition edge.
pub const OPPOSITION_CUTOFF: f64 = -0.3;

/// How two factors relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Correlation,
    Opposition,
    Neutral,
}

impl EdgeKind {
    /// Classifies a Pearson coefficient.
    pub fn classify(r: f64) -> Self {
        if r > CORRELATION_CUTOFF {
            EdgeKind::Correlation
        } else if r < OPPOSITION_CUTOFF {
            EdgeKind::Opposition
        } else {
            EdgeKind::Neutral
        }
    }
}

/// An undirected edge between two distinct factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub factor_a: FactorId,
    pub factor_b: FactorId,
    /// |r|, in [0, 1].
    pub strength: f64,
    /// Signed Pearson coefficient.
    pub correlation: f64,
    pub kind: EdgeKind,
    pub shared_count: usize,
    pub conflicting_count: usize,
}

impl RelationshipEdge {
    /// Returns true if the edge touches the given factor.
    pub fn involves(&self, factor: FactorId) -> bool {
        self.factor_a == factor || self.factor_b == factor
    }

    /// Returns true if the edge connects exactly these two factors.
    pub fn connects(&self, a: FactorId, b: FactorId) -> bool {
        (self.factor_a == a && self.factor_b == b) || (self.factor_a == b && self.factor_b == a)
    }

    /// Returns the endpoint opposite `factor`, if the edge touches it.
    pub fn other(&self, factor: FactorId) -> Option<FactorId> {
        if self.factor_a == factor {
            Some(self.factor_b)
        } else if self.factor_b == factor {
            Some(self.factor_a)
        } else {
            None
        }
    }
}

/// Factors as nodes, materialized relationships as edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    pub nodes: Vec<FactorId>,
    pub edges: Vec<RelationshipEdge>,
}

impl RelationshipGraph {
    /// Creates an empty graph.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of incident edges of any kind.
    pub fn degree(&self, factor: FactorId) -> usize {
        self.edges.iter().filter(|e| e.involves(factor)).count()
    }

    /// Finds the edge between two factors, if materialized.
    pub fn edge_between(&self, a: FactorId, b: FactorId) -> Option<&RelationshipEdge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    /// Neighbours of a factor in edge order.
    pub fn neighbors(&self, factor: FactorId) -> Vec<FactorId> {
        self.edges.iter().filter_map(|e| e.other(factor)).collect()
    }
}

/// Options controlling edge materialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphOptions {
    pub filter_threshold: f64,
    pub significant_loading: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            filter_threshold: DEFAULT_FILTER_THRESHOLD,
            significant_loading: DEFAULT_SIGNIFICANT_LOADING,
        }
    }
}

impl GraphOptions {
    /// Creates options with the given filter threshold.
    pub fn with_filter_threshold(filter_threshold: f64) -> Self {
        Self {
            filter_threshold,
            ..Self::default()
        }
    }

    /// Rejects out-of-range options before any computation starts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.filter_threshold) {
            return Err(ValidationError::out_of_range(
                "filter_threshold",
                0.0,
                1.0,
                self.filter_threshold,
            ));
        }
        if !self.significant_loading.is_finite() || self.significant_loading <= 0.0 {
            return Err(ValidationError::invalid_value(
                "significant_loading",
                format!("must be a positive number, got {}", self.significant_loading),
            ));
        }
        Ok(())
    }
}

/// Builder for the factor relationship graph.
pub struct RelationshipGraphBuilder;

impl RelationshipGraphBuilder {
    /// Builds the relationship graph.
    ///
    /// # Algorithm
    /// For every unordered pair (i, j), i < j in input order:
    /// - r = Pearson correlation of the two loading sequences
    /// - shared / conflicting = positions where both |loading| exceed the
    ///   significance cutoff with matching / opposite signs
    /// - edge materialized if |r| >= filter threshold
    ///
    /// # Edge Cases
    /// - Empty factor list: Returns empty graph
    /// - Zero-variance factor: Correlates 0 with every peer
    /// - Mismatched loading lengths: `DataInconsistency`
    pub fn build(factors: &[Factor], options: GraphOptions) -> Result<RelationshipGraph, AnalysisError> {
        options.validate()?;
        validate_factors(factors)?;

        let nodes: Vec<FactorId> = factors.iter().map(|f| f.id).collect();

        let pairs: Vec<(usize, usize)> = (0..factors.len())
            .flat_map(|i| ((i + 1)..factors.len()).map(move |j| (i, j)))
            .collect();

        let edges: Vec<RelationshipEdge> = pairs
            .par_iter()
            .filter_map(|&(i, j)| Self::relate(&factors[i], &factors[j], &options))
            .collect();

        Ok(RelationshipGraph { nodes, edges })
    }

    /// Computes the edge between two factors, or None if below threshold.
    fn relate(a: &Factor, b: &Factor, options: &GraphOptions) -> Option<RelationshipEdge> {
        let r = Self::pearson(&a.loadings, &b.loadings);
        let strength = r.abs();
        if strength < options.filter_threshold {
            return None;
        }

        let (shared_count, conflicting_count) =
            Self::count_agreement(&a.loadings, &b.loadings, options.significant_loading);

        Some(RelationshipEdge {
            factor_a: a.id,
            factor_b: b.id,
            strength,
            correlation: r,
            kind: EdgeKind::classify(r),
            shared_count,
            conflicting_count,
        })
    }

    /// Pearson correlation coefficient.
    ///
    /// Returns 0 when either sequence has zero variance (including sequences
    /// shorter than two values).
    pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
        let n = xs.len().min(ys.len());
        if n == 0 {
            return 0.0;
        }

        let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
        let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

        let mut covariance = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (x, y) in xs[..n].iter().zip(&ys[..n]) {
            let dx = x - mean_x;
            let dy = y - mean_y;
            covariance += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        if var_x == 0.0 || var_y == 0.0 {
            return 0.0;
        }

        (covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
    }

    /// Counts statement positions where both loadings are significant,
    /// split by whether their signs agree.
    fn count_agreement(xs: &[f64], ys: &[f64], cutoff: f64) -> (usize, usize) {
        xs.iter()
            .zip(ys)
            .filter(|(x, y)| x.abs() > cutoff && y.abs() > cutoff)
            .fold((0, 0), |(shared, conflicting), (x, y)| {
                if x.signum() == y.signum() {
                    (shared + 1, conflicting)
                } else {
                    (shared, conflicting + 1)
                }
            })
    }
}
