use async_trait::async_trait;
use chrono::Utc;
use common::record::sort_records;
use common::store::{RecordSource, RecordStore, StoreError};
use common::{ImageRecord, RecordKey};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::image_record;

fn backend(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Record store backed by the `image_record` table.
#[derive(Clone)]
pub struct DbRecordStore {
    db: DatabaseConnection,
}

impl DbRecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordSource for DbRecordStore {
    async fn lookup_by_category(
        &self,
        category: &str,
    ) -> Result<Option<Vec<ImageRecord>>, StoreError> {
        // Fetched in key order; the stable sort below then keeps arrival
        // order among equal `order` values, independent of DB collation.
        let models = image_record::Entity::find()
            .filter(image_record::Column::Category.eq(category))
            .order_by_asc(image_record::Column::Id)
            .all(&self.db)
            .await
            .map_err(backend)?;

        if models.is_empty() {
            return Ok(None);
        }

        let mut records: Vec<ImageRecord> = models.into_iter().map(Into::into).collect();
        sort_records(&mut records);
        Ok(Some(records))
    }
}

#[async_trait]
impl RecordStore for DbRecordStore {
    async fn append(&self, category: &str, record: ImageRecord) -> Result<RecordKey, StoreError> {
        let key = Uuid::now_v7();
        let model = image_record::ActiveModel {
            id: Set(key),
            category: Set(category.to_string()),
            file_name: Set(record.file_name),
            url: Set(record.url),
            text: Set(record.text),
            order: Set(record.order),
            created_at: Set(Utc::now()),
        };

        image_record::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(backend)?;

        debug!(category, %key, "Appended image record");
        Ok(key)
    }

    async fn find_by_file_name(
        &self,
        category: &str,
        file_name: &str,
    ) -> Result<Vec<RecordKey>, StoreError> {
        let models = image_record::Entity::find()
            .filter(image_record::Column::Category.eq(category))
            .filter(image_record::Column::FileName.eq(file_name))
            .order_by_asc(image_record::Column::Id)
            .all(&self.db)
            .await
            .map_err(backend)?;

        Ok(models.into_iter().map(|m| m.id).collect())
    }

    async fn remove(&self, category: &str, key: RecordKey) -> Result<(), StoreError> {
        let result = image_record::Entity::delete_many()
            .filter(image_record::Column::Id.eq(key))
            .filter(image_record::Column::Category.eq(category))
            .exec(&self.db)
            .await
            .map_err(backend)?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound {
                category: category.to_string(),
                key,
            });
        }
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        image_record::Entity::find()
            .select_only()
            .column(image_record::Column::Category)
            .distinct()
            .order_by_asc(image_record::Column::Category)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(backend)
    }
}
