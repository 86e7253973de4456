use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One image record. The `category` column plays the role of the parent path
/// and `id` the generated child key.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image_record")]
pub struct Model {
    /// UUIDv7 key, time ordered.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub category: String,

    #[sea_orm(indexed)]
    pub file_name: String,

    #[sea_orm(column_type = "Text")]
    pub url: String,

    #[sea_orm(column_type = "Text")]
    pub text: String,

    #[sea_orm(column_name = "order")]
    pub order: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for common::ImageRecord {
    fn from(model: Model) -> Self {
        Self {
            file_name: model.file_name,
            url: model.url,
            text: model.text,
            order: model.order,
        }
    }
}
