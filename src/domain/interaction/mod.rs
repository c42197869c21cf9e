//! Interaction Module - Relationships between factors.
//!
//! Stateless functions that turn a factor set into a relationship graph and
//! read structure out of it.
//!
//! # Components
//!
//! - `RelationshipGraphBuilder` - Pairwise correlation and typed edges
//! - `ClusterDetector` - Connected components over strong correlations
//! - `PatternClassifier` - Hub-spoke, bipolar, triangular, isolated, network
//! - `NetworkMetrics` - Density, centralization, clustering, modularity, polarization

mod cluster_detector;
mod network_metrics;
mod pattern_classifier;
mod relationship_graph;

pub use cluster_detector::{Cluster, ClusterDetector, STRONG_CLUSTER_THRESHOLD};
pub use network_metrics::{NetworkMetrics, NetworkMetricsSnapshot};
pub use pattern_classifier::{InteractionPattern, PatternClassifier, PatternKind};
pub use relationship_graph::{
    EdgeKind, GraphOptions, RelationshipEdge, RelationshipGraph, RelationshipGraphBuilder,
    CORRELATION_CUTOFF, DEFAULT_FILTER_THRESHOLD, DEFAULT_SIGNIFICANT_LOADING, OPPOSITION_CUTOFF,
};
