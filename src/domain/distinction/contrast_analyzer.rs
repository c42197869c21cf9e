//! Contrast Analyzer - Pairwise comparison of two factors' distinguishing statements.

use serde::{Deserialize, Serialize};

use super::FactorDistinction;
use crate::domain::foundation::{FactorId, Score, StatementId};

/// A statement both factors take the same side on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub statement_id: StatementId,
    pub text: String,
    /// The weaker of the two |z| values.
    pub strength: f64,
}

/// A statement the two factors take opposite sides on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disagreement {
    pub statement_id: StatementId,
    pub text: String,
    pub z_a: f64,
    pub z_b: f64,
    /// |z_a - z_b|.
    pub gap: f64,
}

/// Comparison of two factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub factor_a: FactorId,
    pub factor_b: FactorId,
    /// Sorted by strength descending.
    pub agreements: Vec<Agreement>,
    /// Sorted by gap descending.
    pub disagreements: Vec<Disagreement>,
    pub overall_similarity: Score,
    pub key_difference: String,
}

/// Analyzer for factor-versus-factor contrasts.
pub struct ContrastAnalyzer;

impl ContrastAnalyzer {
    /// Compares the statements that distinguish both factors.
    ///
    /// Only statements present in both distinguishing lists are considered.
    /// Similarity is the share of those statements on which the factors agree.
    ///
    /// # Edge Cases
    /// - No shared statements: similarity 0, fallback key difference
    pub fn contrast(a: &FactorDistinction, b: &FactorDistinction) -> ContrastResult {
        let mut agreements = Vec::new();
        let mut disagreements = Vec::new();

        for left in &a.distinguishing {
            let Some(right) = b.statement(left.statement_id) else {
                continue;
            };

            let (z_a, z_b) = (left.z_score, right.z_score);
            if (z_a > 0.0) == (z_b > 0.0) {
                agreements.push(Agreement {
                    statement_id: left.statement_id,
                    text: left.statement_text.clone(),
                    strength: z_a.abs().min(z_b.abs()),
                });
            } else {
                disagreements.push(Disagreement {
                    statement_id: left.statement_id,
                    text: left.statement_text.clone(),
                    z_a,
                    z_b,
                    gap: (z_a - z_b).abs(),
                });
            }
        }

        agreements.sort_by(|x, y| y.strength.total_cmp(&x.strength));
        disagreements.sort_by(|x, y| y.gap.total_cmp(&x.gap));

        let compared = agreements.len() + disagreements.len();
        let overall_similarity = if compared == 0 {
            Score::ZERO
        } else {
            Score::from_fraction(agreements.len() as f64 / compared as f64)
        };

        let key_difference = disagreements.first().map(|d| d.text.clone()).unwrap_or_else(|| {
            format!(
                "No significant disagreements between factor {} and factor {}",
                a.factor_id, b.factor_id
            )
        });

        ContrastResult {
            factor_a: a.factor_id,
            factor_b: b.factor_id,
            agreements,
            disagreements,
            overall_similarity,
            key_difference,
        }
    }
}
