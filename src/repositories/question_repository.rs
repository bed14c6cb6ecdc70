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
    models::domain::{ItemType, StoredQuestion},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: StoredQuestion) -> AppResult<StoredQuestion>;
    async fn find_by_id(&self, item_type: ItemType, id: &str) -> AppResult<Option<StoredQuestion>>;
    async fn list_by_type(
        &self,
        item_type: ItemType,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<StoredQuestion>, i64)>;
    async fn update(&self, question: StoredQuestion) -> AppResult<StoredQuestion>;
    async fn delete(&self, item_type: ItemType, id: &str) -> AppResult<()>;
}

/// Questions live in one collection per item type.
pub struct MongoQuestionRepository {
    mcq: Collection<StoredQuestion>,
    fill_blank: Collection<StoredQuestion>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        Self {
            mcq: db.get_collection(config.questions_collection(ItemType::Mcq)),
            fill_blank: db.get_collection(config.questions_collection(ItemType::FillBlank)),
        }
    }

    fn collection(&self, item_type: ItemType) -> &Collection<StoredQuestion> {
        match item_type {
            ItemType::Mcq => &self.mcq,
            ItemType::FillBlank => &self.fill_blank,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        for item_type in ItemType::ALL {
            let collection = self.collection(item_type);
            log::info!("Creating indexes for {} collection", collection.name());

            let id_index = IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("id_unique".to_string())
                        .build(),
                )
                .build();

            collection.create_index(id_index).await?;
        }

        log::info!("Successfully created indexes for question collections");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, question: StoredQuestion) -> AppResult<StoredQuestion> {
        self.collection(question.item_type)
            .insert_one(&question)
            .await?;
        Ok(question)
    }

    async fn find_by_id(&self, item_type: ItemType, id: &str) -> AppResult<Option<StoredQuestion>> {
        let question = self
            .collection(item_type)
            .find_one(doc! { "id": id })
            .await?;
        Ok(question)
    }

    async fn list_by_type(
        &self,
        item_type: ItemType,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<StoredQuestion>, i64)> {
        let collection = self.collection(item_type);
        let total = collection.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = collection.find(doc! {}).with_options(find_options).await?;
        let items: Vec<StoredQuestion> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn update(&self, question: StoredQuestion) -> AppResult<StoredQuestion> {
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection(question.item_type)
            .replace_one(doc! { "id": &question.id }, &question)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        }

        Ok(question)
    }

    async fn delete(&self, item_type: ItemType, id: &str) -> AppResult<()> {
        let result = self
            .collection(item_type)
            .delete_one(doc! { "id": id })
            .await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
