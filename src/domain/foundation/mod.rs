//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, study records and error types
//! that form the vocabulary of factor interpretation.

mod errors;
mod ids;
mod score;
mod study;

pub use errors::{AnalysisError, ErrorCode, ValidationError};
pub use ids::{FactorId, StatementId};
pub use score::Score;
pub use study::{
    validate_factors, validate_statement_coverage, Factor, RawStudySnapshot, Statement,
    StudySnapshot,
};
