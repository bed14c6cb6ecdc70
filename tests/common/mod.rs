#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizgen_server::{
    app_state::AppState,
    config::Config,
    engine::{CompletionRequest, EventStream, FinishReason, InferenceEngine, StreamEvent},
    errors::{AppError, AppResult},
    models::domain::{ItemType, SourceText, StoredQuestion},
    repositories::{QuestionRepository, TextRepository},
};

#[path = "../../src/test_utils/engines.rs"]
mod engines;
#[path = "../../src/test_utils/fixtures.rs"]
mod fixtures;

pub use engines::ScriptedEngine;
pub use fixtures::*;

fn page<T: Clone>(mut items: Vec<T>, offset: i64, limit: i64) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let start = (offset.max(0) as usize).min(items.len());
    let end = (start + limit.max(0) as usize).min(items.len());
    (items.drain(start..end).collect(), total)
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<String, StoredQuestion>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.questions.read().await.len()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, question: StoredQuestion) -> AppResult<StoredQuestion> {
        let mut questions = self.questions.write().await;
        if questions.contains_key(&question.id) {
            return Err(AppError::DatabaseError(format!(
                "duplicate key '{}'",
                question.id
            )));
        }
        questions.insert(question.id.clone(), question.clone());
        Ok(question)
    }

    async fn find_by_id(&self, item_type: ItemType, id: &str) -> AppResult<Option<StoredQuestion>> {
        let questions = self.questions.read().await;
        Ok(questions
            .get(id)
            .filter(|q| q.item_type == item_type)
            .cloned())
    }

    async fn list_by_type(
        &self,
        item_type: ItemType,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<StoredQuestion>, i64)> {
        let questions = self.questions.read().await;
        let mut items: Vec<_> = questions
            .values()
            .filter(|q| q.item_type == item_type)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(page(items, offset, limit))
    }

    async fn update(&self, question: StoredQuestion) -> AppResult<StoredQuestion> {
        let mut questions = self.questions.write().await;
        match questions.get_mut(&question.id) {
            Some(existing) if existing.item_type == question.item_type => {
                *existing = question.clone();
                Ok(question)
            }
            _ => Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            ))),
        }
    }

    async fn delete(&self, item_type: ItemType, id: &str) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        match questions.get(id) {
            Some(q) if q.item_type == item_type => {
                questions.remove(id);
                Ok(())
            }
            _ => Err(AppError::NotFound(format!("Question with id '{}' not found", id))),
        }
    }
}

#[derive(Default)]
pub struct InMemoryTextRepository {
    texts: Arc<RwLock<HashMap<String, SourceText>>>,
}

impl InMemoryTextRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TextRepository for InMemoryTextRepository {
    async fn create(&self, text: SourceText) -> AppResult<SourceText> {
        self.texts.write().await.insert(text.id.clone(), text.clone());
        Ok(text)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<SourceText>> {
        Ok(self.texts.read().await.get(id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<SourceText>, i64)> {
        let mut items: Vec<_> = self.texts.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(page(items, offset, limit))
    }

    async fn update(&self, text: SourceText) -> AppResult<SourceText> {
        let mut texts = self.texts.write().await;
        match texts.get_mut(&text.id) {
            Some(existing) => {
                *existing = text.clone();
                Ok(text)
            }
            None => Err(AppError::NotFound(format!("Text with id '{}' not found", text.id))),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        match self.texts.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Text with id '{}' not found", id))),
        }
    }
}

pub fn test_config() -> Config {
    let mut config = Config::from_env();
    config.mongo_db_name = "quizgen-integration".to_string();
    config.generation.max_tokens = 10_000;
    config
}

pub struct TestContext {
    pub state: AppState,
    pub engine: Arc<ScriptedEngine>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub texts: Arc<InMemoryTextRepository>,
}

pub fn context(engine: ScriptedEngine) -> TestContext {
    let engine = Arc::new(engine);
    let questions = Arc::new(InMemoryQuestionRepository::new());
    let texts = Arc::new(InMemoryTextRepository::new());
    let state = AppState::with_components(
        test_config(),
        engine.clone(),
        questions.clone(),
        texts.clone(),
    );

    TestContext {
        state,
        engine,
        questions,
        texts,
    }
}
