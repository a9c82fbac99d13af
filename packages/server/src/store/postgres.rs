use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{IntegrationStore, NewIntegration};
use crate::entity::integration;

/// sea-orm backed store over the `integrations` table.
#[derive(Clone)]
pub struct SeaOrmIntegrationStore {
    conn: DatabaseConnection,
}

impl SeaOrmIntegrationStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl IntegrationStore for SeaOrmIntegrationStore {
    async fn insert(&self, new: NewIntegration) -> Result<integration::Model, DbErr> {
        let model = integration::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            s3_url: Set(new.s3_url),
            filename: Set(new.filename),
            is_vectorized: Set(false),
            is_ragged: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model.insert(&self.conn).await
    }

    async fn list(&self) -> Result<Vec<integration::Model>, DbErr> {
        integration::Entity::find()
            .order_by_asc(integration::Column::Id)
            .all(&self.conn)
            .await
    }

    async fn find(&self, id: i32) -> Result<Option<integration::Model>, DbErr> {
        integration::Entity::find_by_id(id).one(&self.conn).await
    }

    async fn set_ragged(&self, id: i32, value: bool) -> Result<bool, DbErr> {
        let result = integration::Entity::update_many()
            .col_expr(
                integration::Column::IsRagged,
                sea_orm::sea_query::Expr::value(value),
            )
            .filter(integration::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = integration::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
