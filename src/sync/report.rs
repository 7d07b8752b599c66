use serde::{Serialize, Serializer};
use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

use crate::recording::{RecordingReference, ResolutionError};
use crate::storage::UploadError;

/// Per-recording failure once the file was found on disk
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Outcome of a recording that reached the upload stage
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadResult {
    Uploaded {
        reference: RecordingReference,
        object_key: String,
        url: String,
    },
    Failed {
        reference: RecordingReference,
        #[serde(serialize_with = "serialize_display")]
        error: SyncError,
    },
}

impl UploadResult {
    pub fn reference(&self) -> &RecordingReference {
        match self {
            UploadResult::Uploaded { reference, .. } | UploadResult::Failed { reference, .. } => {
                reference
            }
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UploadResult::Uploaded { url, .. } => Some(url.as_str()),
            UploadResult::Failed { .. } => None,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadResult::Uploaded { .. })
    }
}

/// Why a reference produced no upload attempt
#[derive(Debug, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// CDR row without a recording
    EmptyFilename,
    /// Same object key already queued in this run
    Duplicate(String),
    Unresolved(#[serde(serialize_with = "serialize_display")] ResolutionError),
    /// Recording is not stored on this host
    NotFound(PathBuf),
}

#[derive(Debug, Serialize)]
pub struct SkippedRecording {
    pub reference: RecordingReference,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub uploaded: usize,
    pub failed: usize,
    pub empty: usize,
    pub duplicate: usize,
    pub unresolved: usize,
    pub not_found: usize,
}

impl SyncSummary {
    pub fn skipped(&self) -> usize {
        self.empty + self.duplicate + self.unresolved + self.not_found
    }
}

/// Everything a sync run produced, in input order
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub results: Vec<UploadResult>,
    pub skipped: Vec<SkippedRecording>,
}

impl SyncReport {
    /// Public URLs of uploaded recordings, in input order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.results.iter().filter_map(UploadResult::url)
    }

    pub fn summary(&self) -> SyncSummary {
        let mut summary = SyncSummary::default();

        for result in &self.results {
            if result.is_uploaded() {
                summary.uploaded += 1;
            } else {
                summary.failed += 1;
            }
        }

        for skipped in &self.skipped {
            match skipped.reason {
                SkipReason::EmptyFilename => summary.empty += 1,
                SkipReason::Duplicate(_) => summary.duplicate += 1,
                SkipReason::Unresolved(_) => summary.unresolved += 1,
                SkipReason::NotFound(_) => summary.not_found += 1,
            }
        }

        summary
    }
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
