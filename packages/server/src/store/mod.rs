mod memory;
mod postgres;

pub use memory::MemoryIntegrationStore;
pub use postgres::SeaOrmIntegrationStore;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::entity::integration;

/// Fields supplied when a record is first written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIntegration {
    pub name: String,
    pub description: String,
    pub s3_url: String,
    pub filename: String,
}

/// Metadata store for integration records.
#[async_trait]
pub trait IntegrationStore: Send + Sync {
    /// Insert a record with both flags false and return it with its new id.
    async fn insert(&self, new: NewIntegration) -> Result<integration::Model, DbErr>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<integration::Model>, DbErr>;

    async fn find(&self, id: i32) -> Result<Option<integration::Model>, DbErr>;

    /// Set `isRagged`. Returns `false` if no record has this id.
    async fn set_ragged(&self, id: i32, value: bool) -> Result<bool, DbErr>;

    /// Returns `false` if no record has this id.
    async fn delete(&self, id: i32) -> Result<bool, DbErr>;
}
