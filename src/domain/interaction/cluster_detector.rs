//! Cluster Detector - Connected components over strong correlation edges.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use super::{EdgeKind, RelationshipGraph};
use crate::domain::foundation::FactorId;
use crate::ports::NarrativeLookup;

/// Strength above which a correlation edge binds two factors into a cluster.
///
/// Fixed, independent of the graph's filter threshold.
pub const STRONG_CLUSTER_THRESHOLD: f64 = 0.5;

/// A group of factors judged coherent through strong positive correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub members: BTreeSet<FactorId>,
    /// Share of member pairs joined by a materialized edge, in [0, 1].
    pub coherence: f64,
    pub theme: String,
    pub characteristics: Vec<String>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the cluster holds a single factor.
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn contains(&self, factor: FactorId) -> bool {
        self.members.contains(&factor)
    }
}

/// Partitions factors into clusters.
pub struct ClusterDetector;

impl ClusterDetector {
    /// Detects clusters in a relationship graph.
    ///
    /// # Algorithm
    /// Breadth-first expansion from each unvisited node along correlation
    /// edges with strength above [`STRONG_CLUSTER_THRESHOLD`]. Components with
    /// more than one member become clusters (in discovery order); every
    /// remaining node becomes a singleton cluster with coherence 1.
    ///
    /// # Edge Cases
    /// - Empty graph: Returns empty Vec
    /// - No strong edges: One singleton per node
    pub fn detect(graph: &RelationshipGraph, narrative: &dyn NarrativeLookup) -> Vec<Cluster> {
        let adjacency = Self::strong_adjacency(graph);
        let total = graph.node_count();

        let mut visited: HashSet<FactorId> = HashSet::new();
        let mut components: Vec<BTreeSet<FactorId>> = Vec::new();
        let mut singletons: Vec<FactorId> = Vec::new();

        for &start in &graph.nodes {
            if visited.contains(&start) {
                continue;
            }

            let component = Self::expand(start, &adjacency, &mut visited);
            if component.len() > 1 {
                components.push(component);
            } else {
                singletons.push(start);
            }
        }

        let mut clusters = Vec::with_capacity(components.len() + singletons.len());

        for members in components {
            let coherence = Self::coherence(graph, &members);
            let id = format!("cluster-{}", clusters.len() + 1);
            clusters.push(Self::cluster(id, members, coherence, total, narrative));
        }

        for factor in singletons {
            let id = format!("cluster-{}", clusters.len() + 1);
            clusters.push(Self::cluster(id, BTreeSet::from([factor]), 1.0, total, narrative));
        }

        clusters
    }

    /// Adjacency over strong correlation edges only.
    fn strong_adjacency(graph: &RelationshipGraph) -> HashMap<FactorId, Vec<FactorId>> {
        let mut adjacency: HashMap<FactorId, Vec<FactorId>> = HashMap::new();
        for edge in graph
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Correlation && e.strength > STRONG_CLUSTER_THRESHOLD)
        {
            adjacency.entry(edge.factor_a).or_default().push(edge.factor_b);
            adjacency.entry(edge.factor_b).or_default().push(edge.factor_a);
        }
        adjacency
    }

    /// Breadth-first expansion marking every reached node as visited.
    fn expand(
        start: FactorId,
        adjacency: &HashMap<FactorId, Vec<FactorId>>,
        visited: &mut HashSet<FactorId>,
    ) -> BTreeSet<FactorId> {
        let mut component = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            component.insert(current);
            if let Some(neighbors) = adjacency.get(&current) {
                for &next in neighbors {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        component
    }

    /// Materialized edges among members over possible member pairs.
    fn coherence(graph: &RelationshipGraph, members: &BTreeSet<FactorId>) -> f64 {
        let size = members.len();
        if size < 2 {
            return 1.0;
        }
        let possible = size * (size - 1) / 2;
        let present = graph
            .edges
            .iter()
            .filter(|e| members.contains(&e.factor_a) && members.contains(&e.factor_b))
            .count();
        (present as f64 / possible as f64).min(1.0)
    }

    fn cluster(
        id: String,
        members: BTreeSet<FactorId>,
        coherence: f64,
        total: usize,
        narrative: &dyn NarrativeLookup,
    ) -> Cluster {
        let theme = Self::theme(&members, narrative);
        let characteristics = vec![Self::characterize(members.len(), total).to_string()];
        Cluster {
            id,
            members,
            coherence,
            theme,
            characteristics,
        }
    }

    /// First known theme among members, else a label built from member ids.
    fn theme(members: &BTreeSet<FactorId>, narrative: &dyn NarrativeLookup) -> String {
        if let Some(theme) = members.iter().find_map(|&id| narrative.theme_for(id)) {
            return theme;
        }
        let ids: Vec<String> = members.iter().map(|id| id.to_string()).collect();
        format!("Factors {}", ids.join(", "))
    }

    fn characterize(size: usize, total: usize) -> &'static str {
        if size == 1 {
            "Independent perspective"
        } else if size == 2 {
            "Bilateral alignment"
        } else if size * 2 > total {
            "Majority viewpoint"
        } else {
            "Minority coalition"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interaction::RelationshipEdge;
    use crate::ports::NoNarrative;

    fn ids(values: &[u32]) -> BTreeSet<FactorId> {
        values.iter().map(|&v| FactorId::new(v)).collect()
    }

    fn edge(a: u32, b: u32, r: f64) -> RelationshipEdge {
        RelationshipEdge {
            factor_a: FactorId::new(a),
            factor_b: FactorId::new(b),
            strength: r.abs(),
            correlation: r,
            kind: EdgeKind::classify(r),
            shared_count: 0,
            conflicting_count: 0,
        }
    }

    fn graph(nodes: &[u32], edges: Vec<RelationshipEdge>) -> RelationshipGraph {
        RelationshipGraph {
            nodes: nodes.iter().map(|&n| FactorId::new(n)).collect(),
            edges,
        }
    }

    #[test]
    fn detect_empty_graph() {
        let clusters = ClusterDetector::detect(&RelationshipGraph::empty(), &NoNarrative);
        assert!(clusters.is_empty());
    }

    #[test]
    fn detect_no_edges_gives_singletons() {
        let clusters = ClusterDetector::detect(&graph(&[1, 2, 3], vec![]), &NoNarrative);

        assert_eq!(clusters.len(), 3);
        for cluster in &clusters {
            assert!(cluster.is_singleton());
            assert_eq!(cluster.coherence, 1.0);
            assert_eq!(cluster.characteristics, vec!["Independent perspective"]);
        }
        assert_eq!(clusters[0].theme, "Factors 1");
    }

    #[test]
    fn detect_follows_transitive_strong_edges() {
        // 1-2 and 2-3 strong; 1-3 not materialized
        let g = graph(&[1, 2, 3, 4], vec![edge(1, 2, 0.8), edge(2, 3, 0.7)]);
        let clusters = ClusterDetector::detect(&g, &NoNarrative);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members, ids(&[1, 2, 3]));
        assert!((clusters[0].coherence - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(clusters[0].characteristics, vec!["Majority viewpoint"]);
        assert_eq!(clusters[1].members, ids(&[4]));
    }

    #[test]
    fn detect_ignores_opposition_and_weak_edges() {
        let g = graph(&[1, 2, 3], vec![edge(1, 2, -0.9), edge(2, 3, 0.45)]);
        let clusters = ClusterDetector::detect(&g, &NoNarrative);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(Cluster::is_singleton));
    }

    #[test]
    fn coherence_counts_any_edge_kind_between_members() {
        // 1-2 strong, 2-3 strong, 1-3 neutral but materialized
        let g = graph(&[1, 2, 3], vec![edge(1, 2, 0.9), edge(2, 3, 0.8), edge(1, 3, 0.35)]);
        let clusters = ClusterDetector::detect(&g, &NoNarrative);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].coherence, 1.0);
    }

    #[test]
    fn multi_member_clusters_precede_singletons() {
        let g = graph(&[1, 2, 3], vec![edge(2, 3, 0.9)]);
        let clusters = ClusterDetector::detect(&g, &NoNarrative);

        assert_eq!(clusters[0].id, "cluster-1");
        assert_eq!(clusters[0].members, ids(&[2, 3]));
        assert_eq!(clusters[0].theme, "Factors 2, 3");
        assert_eq!(clusters[0].characteristics, vec!["Bilateral alignment"]);
        assert_eq!(clusters[1].id, "cluster-2");
        assert_eq!(clusters[1].members, ids(&[1]));
    }

    #[test]
    fn minority_coalition_when_not_majority() {
        let g = graph(
            &[1, 2, 3, 4, 5, 6, 7],
            vec![edge(1, 2, 0.9), edge(2, 3, 0.9)],
        );
        let clusters = ClusterDetector::detect(&g, &NoNarrative);
        assert_eq!(clusters[0].characteristics, vec!["Minority coalition"]);
    }

    #[test]
    fn theme_comes_from_narrative_lookup() {
        let themes = HashMap::from([(FactorId::new(3), "Growth first".to_string())]);
        let g = graph(&[1, 2, 3], vec![edge(2, 3, 0.9)]);
        let clusters = ClusterDetector::detect(&g, &themes);

        assert_eq!(clusters[0].theme, "Growth first");
        assert_eq!(clusters[1].theme, "Factors 1");
    }

    #[test]
    fn clusters_partition_nodes() {
        let g = graph(
            &[1, 2, 3, 4, 5],
            vec![edge(1, 2, 0.9), edge(3, 4, 0.6), edge(4, 5, -0.7)],
        );
        let clusters = ClusterDetector::detect(&g, &NoNarrative);

        let mut seen = BTreeSet::new();
        for cluster in &clusters {
            for member in &cluster.members {
                assert!(seen.insert(*member), "factor {} in two clusters", member);
            }
        }
        assert_eq!(seen, ids(&[1, 2, 3, 4, 5]));
    }
}
