use std::fmt;

use serde::Deserialize;

/// Which object storage implementation to construct at startup.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// S3 or an S3-compatible service.
    #[default]
    S3,
    /// Process-local store for development and tests.
    Memory,
}

/// Object storage configuration.
#[derive(Deserialize, Clone)]
pub struct ObjectStorageConfig {
    /// Backend selector. Default: "s3".
    #[serde(default)]
    pub backend: StorageBackend,
    /// Bucket that holds uploaded documents.
    pub bucket: String,
    /// AWS region. Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services (enables path-style requests).
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Largest accepted upload in bytes. Default: 10 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_region() -> String {
    "us-east-1".into()
}
fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024
}

impl ObjectStorageConfig {
    /// In-memory configuration for the given bucket name.
    pub fn memory(bucket: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::Memory,
            bucket: bucket.into(),
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl fmt::Debug for ObjectStorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStorageConfig")
            .field("backend", &self.backend)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("max_upload_size", &self.max_upload_size)
            .finish()
    }
}
