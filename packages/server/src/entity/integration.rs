use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "integrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub description: String,

    /// Public URL of the uploaded document.
    #[serde(rename = "fileUrl")]
    pub s3_url: String,

    /// Original upload filename.
    pub filename: String,

    /// Written only by the external embedding pipeline.
    #[sea_orm(column_name = "isVectorized")]
    #[serde(rename = "isVectorized")]
    pub is_vectorized: bool,

    /// Whether the document is part of the retrieval set.
    #[sea_orm(column_name = "isRagged")]
    #[serde(rename = "isRagged")]
    pub is_ragged: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
