use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single recording referenced by a CDR row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingReference {
    /// Call date as stored in the CDR (e.g. "2023-03-04 10:00:00")
    pub call_date: String,

    /// Recording filename; empty when the call was not recorded
    pub recording_file: String,

    /// Office tag that selects the on-disk layout (e.g. "germany")
    pub office: String,
}

impl RecordingReference {
    pub fn new(
        call_date: impl Into<String>,
        recording_file: impl Into<String>,
        office: impl Into<String>,
    ) -> Self {
        Self {
            call_date: call_date.into(),
            recording_file: recording_file.into(),
            office: office.into(),
        }
    }

    /// Whether the CDR row actually points at a recording
    pub fn has_recording(&self) -> bool {
        !self.recording_file.is_empty()
    }
}

/// A reference mapped onto the local filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecording {
    pub reference: RecordingReference,
    pub disk_path: PathBuf,
}

impl ResolvedRecording {
    pub fn office(&self) -> &str {
        &self.reference.office
    }

    pub fn recording_file(&self) -> &str {
        &self.reference.recording_file
    }
}
