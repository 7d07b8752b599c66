use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use super::report::{SkipReason, SkippedRecording, SyncError, SyncReport, UploadResult};
use crate::recording::{
    build_object_key, build_public_url, sniff_content_type, PathResolver, RecordingReference,
};
use crate::storage::Uploader;

/// Per-reference outcome before it is filed into the report
enum ItemOutcome {
    Done(UploadResult),
    Skipped(SkippedRecording),
}

/// Work item after the in-order pre-pass
enum Pending {
    Skip(SkippedRecording),
    Process(RecordingReference),
}

/// Drives references through resolve -> exists -> read -> sniff -> upload
///
/// A failing recording never stops the batch. Results come back in input
/// order whatever the concurrency.
pub struct SyncOrchestrator {
    resolver: PathResolver,
    uploader: Uploader,
    region: String,
    concurrency: usize,
}

impl SyncOrchestrator {
    pub fn new(resolver: PathResolver, uploader: Uploader, region: impl Into<String>) -> Self {
        Self {
            resolver,
            uploader,
            region: region.into(),
            concurrency: 1,
        }
    }

    /// Number of recordings in flight at once (clamped to at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run(&self, references: Vec<RecordingReference>) -> SyncReport {
        info!(
            "Syncing {} recording references (concurrency {})",
            references.len(),
            self.concurrency
        );

        let pending = Self::plan(references);

        let outcomes: Vec<ItemOutcome> = stream::iter(pending)
            .map(|item| async move {
                match item {
                    Pending::Skip(skipped) => ItemOutcome::Skipped(skipped),
                    Pending::Process(reference) => self.process(reference).await,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut report = SyncReport::default();
        for outcome in outcomes {
            match outcome {
                ItemOutcome::Done(result) => report.results.push(result),
                ItemOutcome::Skipped(skipped) => report.skipped.push(skipped),
            }
        }

        let summary = report.summary();
        info!(
            "Sync complete: {} uploaded, {} failed, {} skipped ({} empty, {} duplicate, {} unresolved, {} not on disk)",
            summary.uploaded,
            summary.failed,
            summary.skipped(),
            summary.empty,
            summary.duplicate,
            summary.unresolved,
            summary.not_found
        );

        report
    }

    /// Drops empty filenames and repeated object keys up front, so no two
    /// in-flight uploads ever target the same key
    fn plan(references: Vec<RecordingReference>) -> Vec<Pending> {
        let mut seen = HashSet::new();

        references
            .into_iter()
            .map(|reference| {
                if !reference.has_recording() {
                    return Pending::Skip(SkippedRecording {
                        reference,
                        reason: SkipReason::EmptyFilename,
                    });
                }

                let key = build_object_key(&reference.office, &reference.recording_file);
                if !seen.insert(key.clone()) {
                    debug!("Skipping duplicate reference for {}", key);
                    return Pending::Skip(SkippedRecording {
                        reference,
                        reason: SkipReason::Duplicate(key),
                    });
                }

                Pending::Process(reference)
            })
            .collect()
    }

    async fn process(&self, reference: RecordingReference) -> ItemOutcome {
        let resolved = match self.resolver.resolve(&reference) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Skipping {}: {}", reference.recording_file, e);
                return ItemOutcome::Skipped(SkippedRecording {
                    reference,
                    reason: SkipReason::Unresolved(e),
                });
            }
        };
        let path = resolved.disk_path;

        // Missing files are expected: the recording may live at another office
        match tokio::fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Not on disk: {}", path.display());
                return ItemOutcome::Skipped(SkippedRecording {
                    reference,
                    reason: SkipReason::NotFound(path),
                });
            }
            Err(source) => return Self::failed(reference, SyncError::Read { path, source }),
        }

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) => return Self::failed(reference, SyncError::Read { path, source }),
        };

        let content_type = sniff_content_type(&bytes);
        let object_key = build_object_key(&reference.office, &reference.recording_file);
        let url = build_public_url(self.uploader.bucket(), &self.region, &object_key);
        let size = bytes.len() as u64;

        if let Err(e) = self
            .uploader
            .upload(&object_key, bytes, size, content_type)
            .await
        {
            return Self::failed(reference, e.into());
        }

        info!("Uploaded {} ({} bytes, {})", path.display(), size, content_type);

        ItemOutcome::Done(UploadResult::Uploaded {
            reference,
            object_key,
            url,
        })
    }

    fn failed(reference: RecordingReference, error: SyncError) -> ItemOutcome {
        error!("Failed to sync {}: {}", reference.recording_file, error);
        ItemOutcome::Done(UploadResult::Failed { reference, error })
    }
}
