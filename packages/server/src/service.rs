use std::sync::Arc;

use common::storage::{ObjectAcl, ObjectKey, ObjectStore, PutObject, StorageError};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::entity::integration;
use crate::store::{IntegrationStore, NewIntegration};
use crate::utils::filename::validate_spec_filename;

/// Namespace for uploaded OpenAPI documents within the bucket.
pub const SPEC_KEY_PREFIX: &str = "openapi-specs/";

/// Content type every uploaded document is stored with.
pub const SPEC_CONTENT_TYPE: &str = "text/yaml";

#[derive(Debug, Error)]
pub enum IntegrationError {
    /// Missing or invalid input. Nothing was written.
    #[error("{0}")]
    Validation(String),
    #[error("integration {0} not found")]
    NotFound(i32),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// An uploaded document as received from the form.
#[derive(Debug, Clone)]
pub struct SpecFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub name: String,
    pub description: String,
    pub file: Option<SpecFile>,
}

/// What happened to the blob during a delete. Never blocks record removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobRemoval {
    Removed,
    /// The store reported the object did not exist.
    AlreadyAbsent,
    /// The stored URL does not name an object in the bucket.
    UnknownLocation,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    /// The record as it was before removal.
    pub record: integration::Model,
    pub blob: BlobRemoval,
}

/// Orchestrates the object store and the metadata store.
pub struct IntegrationService {
    objects: Arc<dyn ObjectStore>,
    records: Arc<dyn IntegrationStore>,
    max_upload_size: u64,
}

impl IntegrationService {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        records: Arc<dyn IntegrationStore>,
        max_upload_size: u64,
    ) -> Self {
        Self {
            objects,
            records,
            max_upload_size,
        }
    }

    pub fn max_upload_size(&self) -> u64 {
        self.max_upload_size
    }

    /// Store the document, then record it.
    ///
    /// If the insert fails after the blob was written, the blob is deleted
    /// again on a best-effort basis.
    #[instrument(skip(self, request), fields(name = %request.name.trim()))]
    pub async fn upload(
        &self,
        request: UploadRequest,
    ) -> Result<integration::Model, IntegrationError> {
        let name = request.name.trim();
        let file = match request.file {
            Some(file) if !name.is_empty() => file,
            _ => {
                return Err(IntegrationError::Validation(
                    "Please provide a name and upload a file.".into(),
                ));
            }
        };

        let filename = validate_spec_filename(&file.filename)
            .map_err(|e| IntegrationError::Validation(e.message().into()))?
            .to_string();

        let size = file.bytes.len() as u64;
        if size > self.max_upload_size {
            return Err(IntegrationError::Validation(format!(
                "File exceeds maximum size of {} bytes",
                self.max_upload_size
            )));
        }

        let key = ObjectKey::unique(SPEC_KEY_PREFIX, &filename);
        let object = PutObject::new(file.bytes)
            .with_content_type(SPEC_CONTENT_TYPE)
            .with_acl(ObjectAcl::PublicRead);
        self.objects.put(&key, object).await?;

        let new = NewIntegration {
            name: name.to_string(),
            description: request.description,
            s3_url: self.objects.public_url(&key),
            filename,
        };

        match self.records.insert(new).await {
            Ok(record) => {
                info!(id = record.id, key = %key, size, "Integration uploaded");
                Ok(record)
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Insert failed, removing uploaded blob");
                if let Err(cleanup) = self.objects.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "Orphaned blob left in object store");
                }
                Err(err.into())
            }
        }
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Result<Vec<integration::Model>, IntegrationError> {
        Ok(self.records.list().await?)
    }

    pub async fn get(&self, id: i32) -> Result<integration::Model, IntegrationError> {
        self.records
            .find(id)
            .await?
            .ok_or(IntegrationError::NotFound(id))
    }

    /// Set the RAG inclusion flag. Writes nothing if the flag already has `value`.
    #[instrument(skip(self))]
    pub async fn set_ragged(
        &self,
        id: i32,
        value: bool,
    ) -> Result<integration::Model, IntegrationError> {
        let record = self.get(id).await?;
        if record.is_ragged == value {
            return Ok(record);
        }

        if !self.records.set_ragged(id, value).await? {
            return Err(IntegrationError::NotFound(id));
        }

        info!(id, is_ragged = value, "RAG flag updated");
        Ok(integration::Model {
            is_ragged: value,
            ..record
        })
    }

    /// Remove the blob (best-effort), then the record.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<DeleteOutcome, IntegrationError> {
        let record = self.get(id).await?;
        let blob = self.remove_blob(&record).await;

        if !self.records.delete(id).await? {
            info!(id, "Record already removed by another request");
        }

        info!(id, blob = ?blob, "Integration deleted");
        Ok(DeleteOutcome { record, blob })
    }

    async fn remove_blob(&self, record: &integration::Model) -> BlobRemoval {
        let Some(key) = ObjectKey::from_public_url(&record.s3_url) else {
            warn!(id = record.id, url = %record.s3_url, "Stored URL does not name an object");
            return BlobRemoval::UnknownLocation;
        };

        match self.objects.delete(&key).await {
            Ok(true) => BlobRemoval::Removed,
            Ok(false) => BlobRemoval::AlreadyAbsent,
            Err(e) => {
                warn!(id = record.id, key = %key, error = %e, "Blob removal failed");
                BlobRemoval::Failed(e.to_string())
            }
        }
    }
}
