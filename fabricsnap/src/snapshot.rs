//! The snapshot document: an immutable, timestamped capture of normalized
//! state across every tracked category.
//!
//! Snapshots persist as a flat JSON document keyed by category name, each
//! value the category's normalized entity list. Later comparison reads the
//! document back as-is; nothing is re-normalized. Every category field
//! defaults on load, so a snapshot missing a category (a fetch that failed
//! at capture time, or an older file) reads back as an empty collection.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::{ApiClass, ErrorKind};
use crate::entity::{Endpoint, ErrorCounter, Fault, HealthScore, InterfaceState, Route};
use crate::normalize;
use crate::normalize::FaultWindow;
use crate::source::{fetch_records, ClassSource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub fabric_health: Vec<HealthScore>,
    #[serde(default)]
    pub faults: Vec<Fault>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceState>,
    #[serde(default)]
    pub interface_errors: Vec<ErrorCounter>,
    #[serde(default)]
    pub crc_errors: Vec<ErrorCounter>,
    #[serde(default)]
    pub drop_errors: Vec<ErrorCounter>,
    #[serde(default)]
    pub output_errors: Vec<ErrorCounter>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub urib_routes: Vec<Route>,
}

/// Errors reading or writing snapshot files.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl Snapshot {
    /// Load a snapshot document from disk.
    pub fn load(path: &Path) -> Result<Snapshot, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Write the snapshot document to disk as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SnapshotError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SnapshotError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Capture options.
#[derive(Debug, Clone, Copy)]
pub struct CaptureOptions {
    /// Fault lookback window.
    pub fault_window: FaultWindow,
    /// Minimum error count for a counter record to be kept.
    pub error_threshold: u64,
}

/// Capture a snapshot from a class source.
///
/// Never fails: each category a fetch cannot supply is captured as empty,
/// so a partially reachable fabric still yields a usable snapshot.
pub fn capture(source: &dyn ClassSource, options: &CaptureOptions) -> Snapshot {
    let counters = |kind: ErrorKind| {
        normalize::error_counters(
            &fetch_records(source, kind.api_class()),
            kind,
            options.error_threshold,
        )
    };

    Snapshot {
        captured_at: Utc::now(),
        fabric_health: normalize::health_scores(&fetch_records(
            source,
            ApiClass::FabricHealthTotal,
        )),
        faults: normalize::faults(
            &fetch_records(source, ApiClass::FaultInst),
            &options.fault_window,
        ),
        interfaces: normalize::interfaces(&fetch_records(source, ApiClass::PhysIf)),
        interface_errors: counters(ErrorKind::Link),
        crc_errors: counters(ErrorKind::Crc),
        drop_errors: counters(ErrorKind::Drop),
        output_errors: counters(ErrorKind::Output),
        endpoints: normalize::endpoints(&fetch_records(source, ApiClass::ClientEndpoint)),
        urib_routes: normalize::routes(&fetch_records(source, ApiClass::UribRoute)),
    }
}

/// Default file name for a capture: `snapshot_<label>_<timestamp>.json`,
/// minute precision, filesystem-safe.
pub fn snapshot_file_name(label: &str, captured_at: DateTime<Utc>) -> String {
    format!(
        "snapshot_{label}_{}.json",
        captured_at.format("%Y-%m-%dT%H-%M")
    )
}

/// List snapshot files in a directory, sorted by file name. Timestamped
/// names make name order capture order.
pub fn list_snapshot_files(dir: &Path) -> Result<Vec<PathBuf>, SnapshotError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|source| SnapshotError::Read {
        path: dir.display().to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Render a capture timestamp for human output.
pub fn format_captured_at(captured_at: DateTime<Utc>) -> String {
    captured_at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
