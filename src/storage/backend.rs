use std::collections::HashMap;
use thiserror::Error;

/// Canned access policy applied to a stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectAcl {
    /// Readable by anyone with the URL
    PublicRead,
}

/// A single put against the object store
#[derive(Debug, Clone)]
pub struct PutObjectRequest {
    /// Object key (may carry a leading '/')
    pub key: String,
    /// Object bytes
    pub body: Vec<u8>,
    /// Explicit Content-Length
    pub content_length: i64,
    /// Sniffed Content-Type
    pub content_type: String,
    /// Access policy
    pub acl: ObjectAcl,
    /// User metadata attached to the object
    pub metadata: HashMap<String, String>,
}

/// Object store failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("object store rejected {key} (status {status}, code {code}): {message}")]
    Rejected {
        key: String,
        status: u16,
        code: String,
        message: String,
    },

    #[error("transport failed: {0}")]
    TransportFailed(String),
}

/// Object storage trait
///
/// Implementations:
/// - S3: AWS SDK client against S3 or an S3-compatible endpoint
/// - Tests: in-memory store recording every put
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object, replacing anything already under the same key
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), StorageError>;

    /// Bucket objects are written to
    fn bucket(&self) -> &str;

    /// Store name for logging
    fn name(&self) -> &str;
}
