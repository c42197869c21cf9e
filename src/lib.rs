//! Factor Insight - Interpretation of Q-methodology factor analyses
//!
//! Given the factors of a completed Q-methodology analysis, this crate maps how
//! the factors relate (correlation graph, clusters, topology patterns, network
//! metrics) and which statements distinguish each factor's viewpoint.
//!
//! All analysis is pure, synchronous and deterministic.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
