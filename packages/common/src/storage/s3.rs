//! S3-compatible object store using `rust-s3`.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tracing::instrument;

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::{ObjectStore, PutObject};
use crate::config::ObjectStorageConfig;

impl From<S3Error> for StorageError {
    fn from(err: S3Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Object store backed by a single S3 bucket.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    name: String,
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.name)
            .finish_non_exhaustive()
    }
}

impl S3ObjectStore {
    /// Build a client from configuration. Performs no network I/O.
    pub fn new(config: &ObjectStorageConfig) -> Result<Self, StorageError> {
        let access_key = required(config.access_key.as_deref(), "access key")?;
        let secret_key = required(config.secret_key.as_deref(), "secret key")?;
        if config.bucket.trim().is_empty() {
            return Err(StorageError::Config("bucket name is not set".into()));
        }

        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StorageError::Config(format!("invalid credentials: {e}")))?;

        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| StorageError::Config(format!("invalid region: {e}")))?,
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)?;
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            name: config.bucket.clone(),
        })
    }
}

fn required<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str, StorageError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| StorageError::Config(format!("{what} is not set")))
}

fn check_status(status: u16, key: &ObjectKey) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(key.to_string())),
        _ => Err(StorageError::Status {
            status,
            key: key.to_string(),
        }),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, object), fields(key = %key, size = object.body.len()))]
    async fn put(&self, key: &ObjectKey, object: PutObject) -> Result<(), StorageError> {
        let response = self
            .bucket
            .put_object_builder(key.as_str(), &object.body)
            .with_content_type(object.content_type.as_str())
            .with_header("x-amz-acl", object.acl.as_header_value())?
            .execute()
            .await?;
        check_status(response.status_code(), key)
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn get(&self, key: &ObjectKey) -> Result<Vec<u8>, StorageError> {
        let response = self.bucket.get_object(key.as_str()).await?;
        check_status(response.status_code(), key)?;
        Ok(response.bytes().to_vec())
    }

    /// S3 answers 204 whether or not the key existed, so `false` is only seen
    /// from backends that report 404.
    #[instrument(skip(self), fields(key = %key))]
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        let response = self.bucket.delete_object(key.as_str()).await?;
        match check_status(response.status_code(), key) {
            Ok(()) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn bucket(&self) -> &str {
        &self.name
    }
}
