//! Snapshot file adapter - Reads a study snapshot from JSON or YAML.
//!
//! Files are a convenience boundary for the command-line tool. Every snapshot
//! is re-validated after parsing, so a file can never bypass ingestion checks.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::foundation::{AnalysisError, RawStudySnapshot, StudySnapshot};

/// Errors from loading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid snapshot JSON.
    #[error("Invalid snapshot JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid snapshot YAML.
    #[error("Invalid snapshot YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file parsed but its contents are inconsistent.
    #[error(transparent)]
    Invalid(#[from] AnalysisError),
}

/// Snapshot document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Picks the format from the file extension. Anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

/// Reads and validates a snapshot file.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<StudySnapshot, SnapshotError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: display.clone(),
        source,
    })?;

    parse_snapshot(&content, SnapshotFormat::from_path(path), &display)
}

/// Parses and validates snapshot text.
pub fn parse_snapshot(
    content: &str,
    format: SnapshotFormat,
    origin: &str,
) -> Result<StudySnapshot, SnapshotError> {
    let raw: RawStudySnapshot = match format {
        SnapshotFormat::Json => serde_json::from_str(content).map_err(|source| SnapshotError::Json {
            path: origin.to_string(),
            source,
        })?,
        SnapshotFormat::Yaml => serde_yaml::from_str(content).map_err(|source| SnapshotError::Yaml {
            path: origin.to_string(),
            source,
        })?,
    };

    Ok(StudySnapshot::try_from(raw)?)
}
