//! Application layer - Orchestrates the pure domain analyzers.
//!
//! - `ViewpointAnalysis` - Runs the full pipeline and on-demand contrasts
//! - `AnalysisCache` - Memoizes reports by snapshot and configuration fingerprint

mod cache;
mod pipeline;

pub use cache::{AnalysisCache, CacheKey};
pub use pipeline::{AnalysisReport, ViewpointAnalysis};
