pub mod cdr;
pub mod config;
pub mod recording;
pub mod storage;
pub mod sync;

pub use cdr::{MySqlCdrSource, QueryMode, RecordingSource, SourceError};
pub use config::Config;
pub use recording::{
    build_object_key, build_public_url, sniff_content_type, OfficePathMap, PathResolver,
    RecordingReference, ResolutionError, ResolvedRecording,
};
pub use storage::{
    MetadataTag, ObjectAcl, ObjectStore, PutObjectRequest, S3ObjectStore, StorageError,
    UploadError, Uploader,
};
pub use sync::{SkipReason, SkippedRecording, SyncError, SyncOrchestrator, SyncReport, UploadResult};
