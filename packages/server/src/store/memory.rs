use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::{IntegrationStore, NewIntegration};
use crate::entity::integration;

#[derive(Default)]
struct Inner {
    next_id: i32,
    records: BTreeMap<i32, integration::Model>,
}

/// Process-local metadata store. Ids are assigned sequentially from 1.
#[derive(Default)]
pub struct MemoryIntegrationStore {
    inner: RwLock<Inner>,
}

impl MemoryIntegrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite `isVectorized`, as the embedding pipeline would.
    pub async fn mark_vectorized(&self, id: i32, value: bool) -> bool {
        match self.inner.write().await.records.get_mut(&id) {
            Some(record) => {
                record.is_vectorized = value;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl IntegrationStore for MemoryIntegrationStore {
    async fn insert(&self, new: NewIntegration) -> Result<integration::Model, DbErr> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let model = integration::Model {
            id: inner.next_id,
            name: new.name,
            description: new.description,
            s3_url: new.s3_url,
            filename: new.filename,
            is_vectorized: false,
            is_ragged: false,
            created_at: Utc::now(),
        };
        inner.records.insert(model.id, model.clone());
        Ok(model)
    }

    async fn list(&self) -> Result<Vec<integration::Model>, DbErr> {
        Ok(self.inner.read().await.records.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<integration::Model>, DbErr> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn set_ragged(&self, id: i32, value: bool) -> Result<bool, DbErr> {
        match self.inner.write().await.records.get_mut(&id) {
            Some(record) => {
                record.is_ragged = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.inner.write().await.records.remove(&id).is_some())
    }
}
