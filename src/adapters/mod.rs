//! Adapters - Connections between the analysis core and the outside world.
//!
//! - `snapshot_file` - JSON/YAML study snapshot ingestion

pub mod snapshot_file;

pub use snapshot_file::{load_snapshot, parse_snapshot, SnapshotError, SnapshotFormat};
