//! Distinction Module - What sets each factor's viewpoint apart.
//!
//! # Components
//!
//! - `ThresholdLevel` / `Significance` - z-score cutoffs and bands
//! - `DistinguishingStatementExtractor` - Per-factor statement selection and scoring
//! - `ContrastAnalyzer` - Agreements and disagreements between two factors
//!
//! Loadings are read as z-scores throughout this module.

mod contrast_analyzer;
mod statement_extractor;
mod threshold;

pub use contrast_analyzer::{Agreement, ContrastAnalyzer, ContrastResult, Disagreement};
pub use statement_extractor::{
    DistinguishingStatement, DistinguishingStatementExtractor, FactorDistinction, Opposition,
    MAX_CONFLICTING_BELIEFS, MAX_CORE_BELIEFS,
};
pub use threshold::{
    Significance, ThresholdLevel, INCLUSIVE_CUTOFF, MODERATE_CUTOFF, STRICT_CUTOFF,
};
