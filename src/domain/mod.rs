//! Domain layer containing the analysis logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, study records, scores, errors)
//! - `interaction` - Relationship graph, clusters, patterns, network metrics
//! - `distinction` - Distinguishing statements and factor contrasts

pub mod distinction;
pub mod foundation;
pub mod interaction;
