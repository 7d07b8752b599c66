use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client as S3Client;
use tracing::info;

use super::backend::{ObjectAcl, ObjectStore, PutObjectRequest, StorageError};
use crate::config::StorageConfig;

/// S3 (or S3-compatible) object store
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client for the configured bucket and region
    ///
    /// Static credentials are used when both keys are configured; otherwise
    /// the default AWS provider chain applies.
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        info!(
            "Connecting to object store: bucket={} region={}",
            config.bucket, config.region
        );

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        match (&config.access_key_id, &config.secret_access_key) {
            (Some(key_id), Some(secret)) => {
                loader = loader.credentials_provider(Credentials::new(
                    key_id,
                    secret,
                    None,
                    None,
                    "cdr-sync-config",
                ));
            }
            (None, None) => {}
            _ => anyhow::bail!(
                "S3 credentials incomplete: both access_key_id and secret_access_key must be set"
            ),
        }

        let sdk_config = loader.load().await;

        let mut builder = S3ConfigBuilder::from(&sdk_config).force_path_style(true);
        if let Some(endpoint) = &config.endpoint {
            info!("Using custom S3 endpoint: {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }

        Ok(Self {
            client: S3Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), StorageError> {
        // Path-style addressing: "/office/file" and "office/file" name the same object
        let key = request.key.trim_start_matches('/');
        if key.is_empty() {
            return Err(StorageError::InvalidRequest("object key is empty".to_string()));
        }

        let acl = match request.acl {
            ObjectAcl::PublicRead => ObjectCannedAcl::PublicRead,
        };

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(request.body))
            .content_length(request.content_length)
            .content_type(request.content_type)
            .acl(acl)
            .set_metadata(Some(request.metadata))
            .send()
            .await
            .map_err(|err| map_put_object_error(err, key))?;

        Ok(())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn name(&self) -> &str {
        "s3"
    }
}

fn map_put_object_error(err: SdkError<PutObjectError>, key: &str) -> StorageError {
    if let SdkError::ServiceError(service_err) = &err {
        return StorageError::Rejected {
            key: key.to_string(),
            status: service_err.raw().status().as_u16(),
            code: service_err.err().code().unwrap_or("unknown").to_string(),
            message: service_err.err().message().unwrap_or_default().to_string(),
        };
    }

    StorageError::TransportFailed(DisplayErrorContext(&err).to_string())
}
