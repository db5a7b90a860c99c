//! Batch orientation scanning with optional parallelism.
//!
//! Every image is independent: results carry no shared state and an I/O
//! failure on one path only shows up in that path's result.

use crate::header::read_header_from_path;
use crate::{inspect_orientation, DisplayTransform, Orientation};
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Result of scanning a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Path of the image
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    /// Orientation code, `None` when unknown
    pub orientation: Option<Orientation>,
    /// CSS transform to show the image upright
    pub transform: String,
    /// Why the orientation is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// I/O failure while reading the header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// Build a result from header bytes already in memory.
    pub fn from_bytes(path: impl Into<PathBuf>, data: &[u8]) -> Self {
        let (orientation, reason) = match inspect_orientation(data) {
            Ok(o) => (Some(o), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            path: path.into(),
            orientation,
            transform: DisplayTransform::for_code(orientation).css(),
            reason,
            error: None,
        }
    }

    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            orientation: None,
            transform: DisplayTransform::IDENTITY.css(),
            reason: None,
            error: Some(error),
        }
    }

    /// Whether the header could not be read at all.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Non-UTF-8 file names must not fail a whole JSON report.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Counts over a set of scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Images scanned
    pub total: usize,
    /// Images with a known orientation
    pub oriented: usize,
    /// Images whose display transform is not the identity
    pub rotated: usize,
    /// Images read successfully but with unknown orientation
    pub unknown: usize,
    /// Images that could not be read
    pub failed: usize,
}

/// Scan one file.
pub fn scan_file(path: &Path, header_bytes: usize) -> ScanResult {
    match read_header_from_path(path, header_bytes) {
        Ok(data) => ScanResult::from_bytes(path, &data),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read image header");
            ScanResult::failed(path, e.to_string())
        }
    }
}

/// Scan many files, reading at most `header_bytes` from each.
///
/// Results are returned in the same order as `paths`.
pub fn scan_files(paths: &[PathBuf], header_bytes: usize) -> Vec<ScanResult> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        paths
            .par_iter()
            .map(|path| scan_file(path, header_bytes))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        paths
            .iter()
            .map(|path| scan_file(path, header_bytes))
            .collect()
    }
}

/// Summarize a set of results.
pub fn summarize(results: &[ScanResult]) -> ScanSummary {
    results.iter().fold(ScanSummary::default(), |mut acc, r| {
        acc.total += 1;
        match (r.orientation, r.is_failed()) {
            (_, true) => acc.failed += 1,
            (Some(o), false) => {
                acc.oriented += 1;
                if !o.display_transform().is_identity() {
                    acc.rotated += 1;
                }
            }
            (None, false) => acc.unknown += 1,
        }
        acc
    })
}
