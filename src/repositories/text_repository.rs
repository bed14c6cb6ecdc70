use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    config::Config,
    db::Database,
    errors::{AppError, AppResult},
    models::domain::SourceText,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextRepository: Send + Sync {
    async fn create(&self, text: SourceText) -> AppResult<SourceText>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<SourceText>>;
    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<SourceText>, i64)>;
    async fn update(&self, text: SourceText) -> AppResult<SourceText>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoTextRepository {
    collection: Collection<SourceText>,
}

impl MongoTextRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.get_collection(&config.texts_collection);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for {} collection", self.collection.name());

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        Ok(())
    }
}

#[async_trait]
impl TextRepository for MongoTextRepository {
    async fn create(&self, text: SourceText) -> AppResult<SourceText> {
        self.collection.insert_one(&text).await?;
        Ok(text)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<SourceText>> {
        let text = self.collection.find_one(doc! { "id": id }).await?;
        Ok(text)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<SourceText>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self.collection.find(doc! {}).with_options(find_options).await?;
        let items: Vec<SourceText> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn update(&self, text: SourceText) -> AppResult<SourceText> {
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "id": &text.id }, &text)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Text with id '{}' not found",
                text.id
            )));
        }

        Ok(text)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Text with id '{}' not found", id)));
        }

        Ok(())
    }
}
