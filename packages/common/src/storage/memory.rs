use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::{ObjectAcl, ObjectStore, PutObject};

/// An object held by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
    pub acl: ObjectAcl,
}

/// In-process object store. Nothing survives the process.
pub struct MemoryObjectStore {
    bucket: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch an object together with its metadata.
    pub async fn object(&self, key: &ObjectKey) -> Option<StoredObject> {
        self.objects.read().await.get(key.as_str()).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &ObjectKey, object: PutObject) -> Result<(), StorageError> {
        let stored = StoredObject {
            body: object.body,
            content_type: object.content_type,
            acl: object.acl,
        };
        self.objects
            .write()
            .await
            .insert(key.as_str().to_owned(), stored);
        Ok(())
    }

    async fn get(&self, key: &ObjectKey) -> Result<Vec<u8>, StorageError> {
        self.objects
            .read()
            .await
            .get(key.as_str())
            .map(|o| o.body.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        Ok(self.objects.write().await.remove(key.as_str()).is_some())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
