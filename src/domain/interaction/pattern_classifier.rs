//! Pattern Classifier - Heuristic topology of the factor relationship graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Cluster, EdgeKind, RelationshipGraph};
use crate::domain::foundation::FactorId;

/// Topology shapes recognised in the relationship graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    HubSpoke,
    Bipolar,
    Triangular,
    Isolated,
    Network,
}

impl PatternKind {
    /// Returns the display label for this pattern.
    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::HubSpoke => "hub-spoke",
            PatternKind::Bipolar => "bipolar",
            PatternKind::Triangular => "triangular",
            PatternKind::Isolated => "isolated",
            PatternKind::Network => "network",
        }
    }
}

/// A recognised interaction pattern and what it suggests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionPattern {
    pub kind: PatternKind,
    pub involved_factors: Vec<FactorId>,
    pub implications: Vec<String>,
}

impl InteractionPattern {
    fn new(kind: PatternKind, involved_factors: Vec<FactorId>, implications: Vec<String>) -> Self {
        Self {
            kind,
            involved_factors,
            implications,
        }
    }
}

/// Classifier for interaction patterns.
pub struct PatternClassifier;

impl PatternClassifier {
    /// Classifies the graph topology.
    ///
    /// Hub-spoke, bipolar, triangular and isolated patterns are evaluated
    /// independently and may coexist. `network` is emitted only when none of
    /// them fired.
    ///
    /// # Edge Cases
    /// - Empty graph: Returns empty Vec
    pub fn classify(graph: &RelationshipGraph, clusters: &[Cluster]) -> Vec<InteractionPattern> {
        if graph.is_empty() {
            return Vec::new();
        }

        let degrees: Vec<(FactorId, usize)> =
            graph.nodes.iter().map(|&id| (id, graph.degree(id))).collect();

        let mut patterns = Vec::new();
        patterns.extend(Self::hub_spoke(graph, &degrees));
        patterns.extend(Self::bipolar(graph, clusters));
        patterns.extend(Self::triangular(graph, clusters));
        patterns.extend(Self::isolated(&degrees));

        if patterns.is_empty() {
            patterns.push(InteractionPattern::new(
                PatternKind::Network,
                graph.nodes.clone(),
                vec![
                    "Viewpoints interconnect without a dominant structure".to_string(),
                    "Relationships are distributed across the factor set".to_string(),
                ],
            ));
        }

        patterns
    }

    /// Hub-spoke: maximum degree more than twice the mean degree.
    fn hub_spoke(graph: &RelationshipGraph, degrees: &[(FactorId, usize)]) -> Option<InteractionPattern> {
        let total: usize = degrees.iter().map(|(_, d)| d).sum();
        let mean = total as f64 / degrees.len() as f64;

        // Highest degree, lowest id among ties
        let &(hub, max_degree) = degrees
            .iter()
            .min_by(|(a_id, a_deg), (b_id, b_deg)| b_deg.cmp(a_deg).then(a_id.cmp(b_id)))?;

        if (max_degree as f64) <= 2.0 * mean {
            return None;
        }

        let mut involved = vec![hub];
        let spokes: BTreeSet<FactorId> = graph.neighbors(hub).into_iter().collect();
        involved.extend(spokes);

        Some(InteractionPattern::new(
            PatternKind::HubSpoke,
            involved,
            vec![
                format!("Factor {} acts as a central viewpoint linking the others", hub),
                "Peripheral viewpoints relate mainly through the hub".to_string(),
            ],
        ))
    }

    /// Bipolar: exactly two multi-member clusters joined by an opposition edge.
    fn bipolar(graph: &RelationshipGraph, clusters: &[Cluster]) -> Option<InteractionPattern> {
        let blocs: Vec<&Cluster> = clusters.iter().filter(|c| c.size() > 1).collect();
        let [left, right] = blocs.as_slice() else {
            return None;
        };

        let opposed = graph.edges.iter().any(|e| {
            e.kind == EdgeKind::Opposition
                && ((left.contains(e.factor_a) && right.contains(e.factor_b))
                    || (right.contains(e.factor_a) && left.contains(e.factor_b)))
        });
        if !opposed {
            return None;
        }

        let involved: Vec<FactorId> = left.members.iter().chain(&right.members).copied().collect();
        Some(InteractionPattern::new(
            PatternKind::Bipolar,
            involved,
            vec![
                format!("'{}' and '{}' form opposing camps", left.theme, right.theme),
                "The study is polarized between two coherent positions".to_string(),
            ],
        ))
    }

    /// Triangular: exactly three factors, or exactly three singleton clusters.
    fn triangular(graph: &RelationshipGraph, clusters: &[Cluster]) -> Option<InteractionPattern> {
        let singletons: Vec<FactorId> = clusters
            .iter()
            .filter(|c| c.is_singleton())
            .flat_map(|c| c.members.iter().copied())
            .collect();

        let involved = if graph.node_count() == 3 {
            graph.nodes.clone()
        } else if singletons.len() == 3 {
            singletons
        } else {
            return None;
        };

        Some(InteractionPattern::new(
            PatternKind::Triangular,
            involved,
            vec!["Three distinct positions balance one another".to_string()],
        ))
    }

    /// Isolated: one pattern per factor with no materialized edge.
    fn isolated(degrees: &[(FactorId, usize)]) -> Vec<InteractionPattern> {
        degrees
            .iter()
            .filter(|(_, degree)| *degree == 0)
            .map(|&(id, _)| {
                InteractionPattern::new(
                    PatternKind::Isolated,
                    vec![id],
                    vec![format!(
                        "Factor {} holds a viewpoint unrelated to the others",
                        id
                    )],
                )
            })
            .collect()
    }
}
