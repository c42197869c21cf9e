//! Distinguishing Statement Extractor - Per-factor statement selection,
//! opposition mapping, and confidence scoring.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Significance, ThresholdLevel};
use crate::domain::foundation::{
    validate_factors, validate_statement_coverage, AnalysisError, Factor, FactorId, Score,
    Statement, StatementId, StudySnapshot,
};

/// Maximum number of core beliefs kept per factor.
pub const MAX_CORE_BELIEFS: usize = 5;

/// Maximum number of conflicting beliefs kept per opposition.
pub const MAX_CONFLICTING_BELIEFS: usize = 3;

/// |z| that maps to full confidence.
const FULL_CONFIDENCE_Z: f64 = 4.0;

/// Confidence multiplier for statements owned by a single factor.
const UNIQUE_CONFIDENCE_BOOST: f64 = 1.2;

/// A statement that characterizes a factor's viewpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistinguishingStatement {
    pub statement_id: StatementId,
    pub statement_text: String,
    pub factor_id: FactorId,
    pub z_score: f64,
    pub significance: Significance,
    /// No other factor crosses the cutoff on this statement.
    pub unique_to_factor: bool,
    /// Other factors crossing the cutoff with the opposite sign, ascending.
    pub opposing_factors: Vec<FactorId>,
    pub confidence: Score,
    pub explanation: String,
}

impl DistinguishingStatement {
    /// Returns true if the factor endorses the statement.
    pub fn is_agreement(&self) -> bool {
        self.z_score > 0.0
    }
}

/// A factor this factor conflicts with, and on what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opposition {
    pub opposing_factor: FactorId,
    pub conflicting_beliefs: Vec<DistinguishingStatement>,
    pub intensity: Score,
}

/// Everything that sets one factor's viewpoint apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorDistinction {
    pub factor_id: FactorId,
    /// Sorted by |z| descending.
    pub distinguishing: Vec<DistinguishingStatement>,
    pub core_beliefs: Vec<DistinguishingStatement>,
    /// Sorted by intensity descending.
    pub oppositions: Vec<Opposition>,
    pub uniqueness_score: Score,
    pub clarity_score: Score,
}

impl FactorDistinction {
    /// A distinction with no qualifying statements.
    pub fn empty(factor_id: FactorId) -> Self {
        Self {
            factor_id,
            distinguishing: Vec::new(),
            core_beliefs: Vec::new(),
            oppositions: Vec::new(),
            uniqueness_score: Score::ZERO,
            clarity_score: Score::ZERO,
        }
    }

    /// Returns true if no statement qualified.
    pub fn is_empty(&self) -> bool {
        self.distinguishing.is_empty()
    }

    /// Finds the distinguishing entry for a statement.
    pub fn statement(&self, statement_id: StatementId) -> Option<&DistinguishingStatement> {
        self.distinguishing
            .iter()
            .find(|s| s.statement_id == statement_id)
    }
}

/// Extractor for distinguishing statements.
pub struct DistinguishingStatementExtractor;

impl DistinguishingStatementExtractor {
    /// Extracts distinguishing statements for every factor.
    ///
    /// Loadings are read as z-scores. Returns one `FactorDistinction` per
    /// factor, in input order.
    ///
    /// # Errors
    /// - `DataInconsistency` if loading lengths disagree with each other or
    ///   with the statement list
    pub fn extract(
        factors: &[Factor],
        statements: &[Statement],
        level: ThresholdLevel,
    ) -> Result<Vec<FactorDistinction>, AnalysisError> {
        validate_factors(factors)?;
        validate_statement_coverage(factors, statements)?;
        Ok(Self::extract_validated(factors, statements, level))
    }

    /// Extracts from an already validated snapshot.
    pub fn extract_snapshot(snapshot: &StudySnapshot, level: ThresholdLevel) -> Vec<FactorDistinction> {
        Self::extract_validated(snapshot.factors(), snapshot.statements(), level)
    }

    fn extract_validated(
        factors: &[Factor],
        statements: &[Statement],
        level: ThresholdLevel,
    ) -> Vec<FactorDistinction> {
        let cutoff = level.cutoff();
        (0..factors.len())
            .into_par_iter()
            .map(|index| Self::distinguish(index, factors, statements, cutoff))
            .collect()
    }

    /// Builds the distinction for the factor at `index`.
    fn distinguish(
        index: usize,
        factors: &[Factor],
        statements: &[Statement],
        cutoff: f64,
    ) -> FactorDistinction {
        let factor = &factors[index];

        let mut distinguishing: Vec<DistinguishingStatement> = statements
            .iter()
            .enumerate()
            .filter_map(|(position, statement)| {
                let z = factor.loading(position)?;
                if z.abs() < cutoff {
                    return None;
                }
                Some(Self::describe(index, position, z, statement, factors, cutoff))
            })
            .collect();

        if distinguishing.is_empty() {
            return FactorDistinction::empty(factor.id);
        }

        distinguishing.sort_by(|a, b| b.z_score.abs().total_cmp(&a.z_score.abs()));

        let core_beliefs: Vec<DistinguishingStatement> = distinguishing
            .iter()
            .filter(|s| s.significance == Significance::High || s.unique_to_factor)
            .take(MAX_CORE_BELIEFS)
            .cloned()
            .collect();

        let oppositions = Self::oppositions(&distinguishing);
        let uniqueness_score = Self::uniqueness(&distinguishing);
        let clarity_score = Self::clarity(&distinguishing, core_beliefs.len());

        FactorDistinction {
            factor_id: factor.id,
            distinguishing,
            core_beliefs,
            oppositions,
            uniqueness_score,
            clarity_score,
        }
    }

    /// Scores one qualifying statement for the factor at `index`.
    fn describe(
        index: usize,
        position: usize,
        z: f64,
        statement: &Statement,
        factors: &[Factor],
        cutoff: f64,
    ) -> DistinguishingStatement {
        let factor = &factors[index];

        let mut crossing_others = 0usize;
        let mut opposing_factors = Vec::new();
        for (other_index, other) in factors.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let Some(other_z) = other.loading(position) else {
                continue;
            };
            if other_z.abs() < cutoff {
                continue;
            }
            crossing_others += 1;
            if (other_z > 0.0) != (z > 0.0) {
                opposing_factors.push(other.id);
            }
        }
        opposing_factors.sort();

        let unique_to_factor = crossing_others == 0;
        let significance = Significance::from_z(z);

        DistinguishingStatement {
            statement_id: statement.id,
            statement_text: statement.text.clone(),
            factor_id: factor.id,
            z_score: z,
            significance,
            unique_to_factor,
            explanation: Self::explain(factor.id, z, significance, &statement.text, &opposing_factors),
            opposing_factors,
            confidence: Self::confidence(z, unique_to_factor),
        }
    }

    /// min(100, |z|/4 × 100), boosted by 1.2 for unique statements.
    fn confidence(z: f64, unique: bool) -> Score {
        let base = (z.abs() / FULL_CONFIDENCE_Z * 100.0).min(100.0);
        if unique {
            Score::new(base * UNIQUE_CONFIDENCE_BOOST)
        } else {
            Score::new(base)
        }
    }

    fn explain(
        factor: FactorId,
        z: f64,
        significance: Significance,
        text: &str,
        opposing: &[FactorId],
    ) -> String {
        let direction = if z > 0.0 { "agrees with" } else { "disagrees with" };
        let mut explanation = format!(
            "Factor {} {} {} \"{}\" (z = {:+.2})",
            factor,
            significance.adverb(),
            direction,
            text,
            z
        );
        if !opposing.is_empty() {
            let ids: Vec<String> = opposing.iter().map(|id| id.to_string()).collect();
            let noun = if ids.len() == 1 { "factor" } else { "factors" };
            explanation.push_str(&format!(", opposed by {} {}", noun, ids.join(", ")));
        }
        explanation
    }

    /// Groups statements by opposing factor, most intense first.
    fn oppositions(distinguishing: &[DistinguishingStatement]) -> Vec<Opposition> {
        let mut groups: BTreeMap<FactorId, Vec<&DistinguishingStatement>> = BTreeMap::new();
        for statement in distinguishing {
            for &opposing in &statement.opposing_factors {
                groups.entry(opposing).or_default().push(statement);
            }
        }

        let mut oppositions: Vec<Opposition> = groups
            .into_iter()
            .map(|(opposing_factor, statements)| {
                let mean_z = statements.iter().map(|s| s.z_score.abs()).sum::<f64>()
                    / statements.len() as f64;
                Opposition {
                    opposing_factor,
                    conflicting_beliefs: statements
                        .into_iter()
                        .take(MAX_CONFLICTING_BELIEFS)
                        .cloned()
                        .collect(),
                    intensity: Score::new((mean_z / FULL_CONFIDENCE_Z * 100.0).min(100.0)),
                }
            })
            .collect();

        oppositions.sort_by(|a, b| b.intensity.value().total_cmp(&a.intensity.value()));
        oppositions
    }

    /// (2 × unique + high significance) / total.
    fn uniqueness(distinguishing: &[DistinguishingStatement]) -> Score {
        let total = distinguishing.len();
        if total == 0 {
            return Score::ZERO;
        }
        let unique = distinguishing.iter().filter(|s| s.unique_to_factor).count();
        let high = distinguishing
            .iter()
            .filter(|s| s.significance == Significance::High)
            .count();
        Score::from_fraction((2 * unique + high) as f64 / total as f64)
    }

    /// 0.7 × mean confidence + 30 × core-belief coverage.
    fn clarity(distinguishing: &[DistinguishingStatement], core_count: usize) -> Score {
        let total = distinguishing.len();
        if total == 0 {
            return Score::ZERO;
        }
        let avg_confidence = distinguishing
            .iter()
            .map(|s| s.confidence.value())
            .sum::<f64>()
            / total as f64;
        let coverage =
            core_count.min(MAX_CORE_BELIEFS) as f64 / total.min(MAX_CORE_BELIEFS) as f64;
        Score::new(avg_confidence * 0.7 + coverage * 30.0)
    }
}
