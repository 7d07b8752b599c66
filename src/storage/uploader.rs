use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::backend::{ObjectAcl, ObjectStore, PutObjectRequest, StorageError};

#[derive(Debug, Error)]
#[error("failed to upload {key} to {bucket}: {source}")]
pub struct UploadError {
    pub key: String,
    pub bucket: String,
    #[source]
    pub source: StorageError,
}

/// Fixed metadata tag attached to every uploaded recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTag {
    pub key: String,
    pub value: String,
}

impl Default for MetadataTag {
    fn default() -> Self {
        Self {
            key: "key".to_string(),
            value: "MetadataValue".to_string(),
        }
    }
}

/// Puts recordings into the object store as public-read objects
///
/// One attempt per call; an existing object under the same key is replaced.
#[derive(Clone)]
pub struct Uploader {
    store: Arc<dyn ObjectStore>,
    metadata: MetadataTag,
}

impl Uploader {
    pub fn new(store: Arc<dyn ObjectStore>, metadata: MetadataTag) -> Self {
        Self { store, metadata }
    }

    pub fn bucket(&self) -> &str {
        self.store.bucket()
    }

    pub async fn upload(
        &self,
        object_key: &str,
        bytes: Vec<u8>,
        size: u64,
        content_type: &str,
    ) -> Result<(), UploadError> {
        let fail = |source: StorageError| UploadError {
            key: object_key.to_string(),
            bucket: self.store.bucket().to_string(),
            source,
        };

        let content_length = i64::try_from(size).map_err(|_| {
            fail(StorageError::InvalidRequest(format!(
                "content length {} is too large",
                size
            )))
        })?;

        let request = PutObjectRequest {
            key: object_key.to_string(),
            body: bytes,
            content_length,
            content_type: content_type.to_string(),
            acl: ObjectAcl::PublicRead,
            metadata: HashMap::from([(self.metadata.key.clone(), self.metadata.value.clone())]),
        };

        debug!(
            "Putting {} ({} bytes, {}) via {}",
            object_key,
            size,
            content_type,
            self.store.name()
        );

        self.store.put_object(request).await.map_err(fail)
    }
}
