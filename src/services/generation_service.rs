use std::{sync::Arc, time::Duration};

use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{GeneratedItem, ItemType, StoredQuestion},
        dto::response::{SaveOutcome, SessionDto},
    },
    repositories::QuestionRepository,
    services::{
        completion_service::CompletionService, extractor, prompt_compiler, segmenter,
        session_store::SessionStore,
    },
};

/// Drives chunk-by-chunk generation: compile, consume, extract, and save.
pub struct GenerationService {
    completion: Arc<CompletionService>,
    questions: Arc<dyn QuestionRepository>,
    sessions: SessionStore,
}

impl GenerationService {
    pub fn new(completion: Arc<CompletionService>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            completion,
            questions,
            sessions: SessionStore::new(),
        }
    }

    /// Sessions left untouched for `ttl` are dropped.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = SessionStore::with_ttl(ttl);
        self
    }

    /// One-shot generation for a context string, outside any session.
    pub async fn generate(&self, context: &str, item_type: ItemType) -> AppResult<GeneratedItem> {
        let context = context.trim();
        if context.is_empty() {
            return Err(AppError::EmptyInput(
                "Le champ 'texte' est requis".to_string(),
            ));
        }
        self.generate_for(context, item_type).await
    }

    async fn generate_for(&self, context: &str, item_type: ItemType) -> AppResult<GeneratedItem> {
        let prompt = prompt_compiler::compile_context(context, item_type);
        let raw = self.completion.complete(&prompt).await?;
        let item = extractor::extract(&raw.text);

        Ok(GeneratedItem {
            item,
            truncated: raw.truncated,
        })
    }

    pub async fn create_session(&self, item_type: ItemType) -> SessionDto {
        let handle = self.sessions.create(item_type).await;
        let session = handle.lock().await;
        SessionDto::from(&*session)
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<SessionDto> {
        let handle = self.sessions.get(id).await?;
        let session = handle.lock().await;
        Ok(SessionDto::from(&*session))
    }

    pub async fn reset_session(&self, id: &Uuid) -> AppResult<()> {
        self.sessions.remove(id).await
    }

    /// Segments `document` into the session, replacing any previous chunks.
    pub async fn prepare(&self, id: &Uuid, document: &str) -> AppResult<SessionDto> {
        let chunks = segmenter::segment(document);
        if chunks.is_empty() {
            return Err(AppError::EmptyInput(
                "Le document ne contient aucun paragraphe".to_string(),
            ));
        }

        let handle = self.sessions.get(id).await?;
        let mut session = handle.lock().await;
        log::info!("Session {} prepared with {} chunks", id, chunks.len());
        session.load_chunks(document, chunks);

        Ok(SessionDto::from(&*session))
    }

    /// Generates for the next chunk. The session lock is held for the whole
    /// generation; the cursor only moves once a result exists.
    pub async fn advance(&self, id: &Uuid) -> AppResult<SessionDto> {
        let handle = self.sessions.get(id).await?;
        let mut session = handle.lock().await;

        let index = session.next_index()?;
        let item_type = session.item_type();
        let context = session
            .chunk(index)
            .map(|chunk| chunk.text.clone())
            .ok_or_else(|| AppError::InternalError(format!("chunk {} is missing", index)))?;

        let generated = match self.generate_for(&context, item_type).await {
            Ok(generated) => generated,
            Err(err) => {
                log::error!("Generation for session {} chunk {} failed: {}", id, index, err);
                return Err(err);
            }
        };

        session.commit_advance(index, generated)?;
        Ok(SessionDto::from(&*session))
    }

    /// Generates again for the chunk under the cursor with the session's
    /// current item type. The cursor does not move.
    pub async fn regenerate(&self, id: &Uuid) -> AppResult<SessionDto> {
        let handle = self.sessions.get(id).await?;
        let mut session = handle.lock().await;

        let (index, context) = session
            .current_chunk()
            .map(|chunk| (chunk.index, chunk.text.clone()))
            .ok_or_else(|| {
                AppError::NoCurrentItem(format!("session {} has no current chunk", id))
            })?;

        let generated = self
            .generate_for(&context, session.item_type())
            .await
            .inspect_err(|err| {
                log::error!("Regeneration for session {} chunk {} failed: {}", id, index, err)
            })?;

        session.replace_current(generated)?;
        Ok(SessionDto::from(&*session))
    }

    pub async fn save(&self, id: &Uuid) -> AppResult<SaveOutcome> {
        let handle = self.sessions.get(id).await?;
        let mut session = handle.lock().await;

        let (key, record) = {
            let (Some(key), Some(generated), Some(chunk)) =
                (session.current_key(), session.current(), session.current_chunk())
            else {
                return Err(AppError::NoCurrentItem(format!(
                    "session {} has no generated item to save",
                    id
                )));
            };

            if let Some(saved_id) = session.saved_id(&key) {
                log::info!(
                    "Chunk {} ({}) already saved as {}",
                    key.chunk_index,
                    key.item_type,
                    saved_id
                );
                return Ok(SaveOutcome::AlreadySaved {
                    id: saved_id.to_string(),
                });
            }

            let record = StoredQuestion::from_parsed(&generated.item, &chunk.text, key.item_type)?;
            (key, record)
        };

        let stored = self.questions.create(record).await?;
        session.mark_saved(key, stored.id.clone());
        log::info!(
            "Saved {} question {} for chunk {}",
            key.item_type,
            stored.id,
            key.chunk_index
        );

        Ok(SaveOutcome::Saved { id: stored.id })
    }

    pub async fn set_item_type(&self, id: &Uuid, item_type: ItemType) -> AppResult<SessionDto> {
        let handle = self.sessions.get(id).await?;
        let mut session = handle.lock().await;
        session.set_item_type(item_type);
        Ok(SessionDto::from(&*session))
    }

    pub fn completion(&self) -> &Arc<CompletionService> {
        &self.completion
    }
}
