//! Batch synchronization of CDR recordings to object storage
//!
//! This module provides the `SyncOrchestrator` that, per reference:
//! - Resolves the on-disk path from office and call date
//! - Skips recordings that are not stored on this host
//! - Sniffs the content type and uploads under `/<office>/<file>`
//! - Collects the public URL or the failure into a `SyncReport`

mod orchestrator;
mod report;

pub use orchestrator::SyncOrchestrator;
pub use report::{SkipReason, SkippedRecording, SyncError, SyncReport, SyncSummary, UploadResult};
