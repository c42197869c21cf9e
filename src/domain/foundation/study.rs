//! Study records - statements, factors, and the validated snapshot that
//! enters the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{AnalysisError, FactorId, StatementId};

/// A Q-sort statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: StatementId,
    pub text: String,
}

impl Statement {
    /// Creates a new statement.
    pub fn new(id: impl Into<StatementId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// An extracted factor with one loading per statement position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub id: FactorId,
    #[serde(default)]
    pub eigenvalue: f64,
    #[serde(default)]
    pub variance_explained: f64,
    /// Signed loadings indexed by statement position.
    pub loadings: Vec<f64>,
}

impl Factor {
    /// Creates a factor with loadings only.
    pub fn new(id: impl Into<FactorId>, loadings: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            eigenvalue: 0.0,
            variance_explained: 0.0,
            loadings,
        }
    }

    /// Returns the loading at a statement position.
    pub fn loading(&self, position: usize) -> Option<f64> {
        self.loadings.get(position).copied()
    }
}

/// Checks that a factor list is internally consistent.
///
/// Every factor must carry the same number of finite loadings and ids must be
/// unique. An empty list is valid.
pub fn validate_factors(factors: &[Factor]) -> Result<(), AnalysisError> {
    let Some(first) = factors.first() else {
        return Ok(());
    };

    let expected = first.loadings.len();
    let mismatched: Vec<FactorId> = factors
        .iter()
        .filter(|f| f.loadings.len() != expected)
        .map(|f| f.id)
        .collect();
    if !mismatched.is_empty() {
        return Err(AnalysisError::data_inconsistency(
            mismatched,
            format!(
                "loading sequence length differs from factor {} ({} loadings)",
                first.id, expected
            ),
        ));
    }

    let non_finite: Vec<FactorId> = factors
        .iter()
        .filter(|f| f.loadings.iter().any(|l| !l.is_finite()))
        .map(|f| f.id)
        .collect();
    if !non_finite.is_empty() {
        return Err(AnalysisError::data_inconsistency(
            non_finite,
            "loadings must be finite numbers",
        ));
    }

    let mut seen: HashMap<FactorId, usize> = HashMap::new();
    for factor in factors {
        *seen.entry(factor.id).or_default() += 1;
    }
    let mut duplicated: Vec<FactorId> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect();
    if !duplicated.is_empty() {
        duplicated.sort();
        return Err(AnalysisError::data_inconsistency(
            duplicated,
            "factor ids must be unique",
        ));
    }

    Ok(())
}

/// Checks that every loading position maps onto a statement.
pub fn validate_statement_coverage(
    factors: &[Factor],
    statements: &[Statement],
) -> Result<(), AnalysisError> {
    let offending: Vec<FactorId> = factors
        .iter()
        .filter(|f| f.loadings.len() != statements.len())
        .map(|f| f.id)
        .collect();
    if offending.is_empty() {
        return Ok(());
    }
    Err(AnalysisError::data_inconsistency(
        offending,
        format!(
            "loadings do not align with the {} statements of the study",
            statements.len()
        ),
    ))
}

/// Snapshot fields as they arrive from a document, before any checks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawStudySnapshot {
    pub factors: Vec<Factor>,
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub themes: BTreeMap<FactorId, String>,
}

/// A validated snapshot of a completed factor analysis.
///
/// Deserialization runs the same checks as [`StudySnapshot::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStudySnapshot")]
pub struct StudySnapshot {
    factors: Vec<Factor>,
    statements: Vec<Statement>,
    themes: BTreeMap<FactorId, String>,
}

impl TryFrom<RawStudySnapshot> for StudySnapshot {
    type Error = AnalysisError;

    fn try_from(raw: RawStudySnapshot) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.factors, raw.statements)?.with_themes(raw.themes))
    }
}

impl StudySnapshot {
    /// Validates and creates a snapshot.
    pub fn new(factors: Vec<Factor>, statements: Vec<Statement>) -> Result<Self, AnalysisError> {
        validate_factors(&factors)?;
        validate_statement_coverage(&factors, &statements)?;
        Ok(Self {
            factors,
            statements,
            themes: BTreeMap::new(),
        })
    }

    /// Attaches narrative theme labels keyed by factor id.
    pub fn with_themes(mut self, themes: impl IntoIterator<Item = (FactorId, String)>) -> Self {
        self.themes = themes.into_iter().collect();
        self
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn themes(&self) -> &BTreeMap<FactorId, String> {
        &self.themes
    }

    /// Returns true if the snapshot holds no factors.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements(n: u32) -> Vec<Statement> {
        (1..=n).map(|i| Statement::new(i, format!("Statement {}", i))).collect()
    }

    #[test]
    fn empty_snapshot_is_valid() {
        let snapshot = StudySnapshot::new(vec![], vec![]).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.factor_count(), 0);
    }

    #[test]
    fn snapshot_accepts_aligned_factors() {
        let snapshot = StudySnapshot::new(
            vec![
                Factor::new(1, vec![0.1, 0.2, 0.3]),
                Factor::new(2, vec![0.3, 0.2, 0.1]),
            ],
            statements(3),
        )
        .unwrap();

        assert_eq!(snapshot.factor_count(), 2);
        assert_eq!(snapshot.statement_count(), 3);
    }

    #[test]
    fn mismatched_loading_lengths_report_offending_ids() {
        let err = StudySnapshot::new(
            vec![
                Factor::new(1, vec![0.1, 0.2, 0.3]),
                Factor::new(2, vec![0.3, 0.2]),
                Factor::new(3, vec![0.3]),
            ],
            statements(3),
        )
        .unwrap_err();

        match err {
            AnalysisError::DataInconsistency { factor_ids, .. } => {
                assert_eq!(factor_ids, vec![FactorId::new(2), FactorId::new(3)]);
            }
            other => panic!("Expected DataInconsistency, got {:?}", other),
        }
    }

    #[test]
    fn loadings_beyond_statement_list_are_rejected() {
        let err = StudySnapshot::new(vec![Factor::new(1, vec![0.1, 0.2, 0.3])], statements(2))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DataInconsistency { .. }));
    }

    #[test]
    fn duplicate_factor_ids_are_rejected() {
        let err = validate_factors(&[Factor::new(4, vec![0.1]), Factor::new(4, vec![0.2])])
            .unwrap_err();
        match err {
            AnalysisError::DataInconsistency { factor_ids, .. } => {
                assert_eq!(factor_ids, vec![FactorId::new(4)]);
            }
            other => panic!("Expected DataInconsistency, got {:?}", other),
        }
    }

    #[test]
    fn non_finite_loadings_are_rejected() {
        let err = validate_factors(&[Factor::new(1, vec![0.1, f64::NAN])]).unwrap_err();
        assert!(matches!(err, AnalysisError::DataInconsistency { .. }));
    }

    #[test]
    fn deserialization_rejects_loadings_past_statement_list() {
        let json = r#"{
            "factors": [
                {"id": 1, "loadings": [2.5, 2.0]},
                {"id": 2, "loadings": [-2.5, 1.0]}
            ],
            "statements": [
                {"id": 1, "text": "a"},
                {"id": 2, "text": "b"},
                {"id": 3, "text": "c"}
            ]
        }"#;

        let err = serde_json::from_str::<StudySnapshot>(json).unwrap_err();
        assert!(err.to_string().contains("Inconsistent factor data"));
    }

    #[test]
    fn deserialization_keeps_themes_and_stats() {
        let json = r#"{
            "factors": [{"id": 1, "eigenvalue": 3.1, "variance_explained": 18.0, "loadings": [0.5]}],
            "statements": [{"id": 1, "text": "a"}],
            "themes": {"1": "Pragmatists"}
        }"#;

        let snapshot: StudySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.factors()[0].eigenvalue, 3.1);
        assert_eq!(snapshot.themes().get(&FactorId::new(1)).map(String::as_str), Some("Pragmatists"));
    }

    #[test]
    fn raw_snapshot_converts_through_checks() {
        let raw = RawStudySnapshot {
            factors: vec![Factor::new(1, vec![0.5, -0.5]), Factor::new(2, vec![0.5])],
            statements: statements(2),
            themes: BTreeMap::new(),
        };
        let err = StudySnapshot::try_from(raw).unwrap_err();
        assert!(matches!(err, AnalysisError::DataInconsistency { .. }));
    }

    #[test]
    fn serialized_snapshot_reads_back() {
        let snapshot = StudySnapshot::new(vec![Factor::new(1, vec![0.5])], statements(1))
            .unwrap()
            .with_themes([(FactorId::new(1), "Pragmatists".to_string())]);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: StudySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
