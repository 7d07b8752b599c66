pub mod backend;
pub mod s3;
pub mod uploader;

pub use backend::{ObjectAcl, ObjectStore, PutObjectRequest, StorageError};
pub use s3::S3ObjectStore;
pub use uploader::{MetadataTag, UploadError, Uploader};
