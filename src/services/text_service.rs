use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    constants::sample_texts::SAMPLE_TEXTS,
    errors::{AppError, AppResult},
    models::{
        domain::SourceText,
        dto::{
            request::{CreateTextRequest, PaginationParams, UpdateTextRequest},
            response::{DeleteResponse, ListResponse},
        },
    },
    repositories::TextRepository,
};

/// Library of source documents that sessions can be prepared from.
pub struct TextService {
    repository: Arc<dyn TextRepository>,
}

impl TextService {
    pub fn new(repository: Arc<dyn TextRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_texts(&self, pagination: &PaginationParams) -> AppResult<ListResponse<SourceText>> {
        let (offset, limit) = (pagination.offset(), pagination.limit());
        let (items, total) = self.repository.list(offset, limit).await?;

        Ok(ListResponse {
            items,
            total,
            offset,
            limit,
        })
    }

    pub async fn get_text(&self, id: &str) -> AppResult<SourceText> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Text with id '{}' not found", id)))
    }

    pub async fn create_text(&self, request: CreateTextRequest) -> AppResult<SourceText> {
        request.validate()?;

        let text = SourceText::new(
            request.content.trim(),
            request.level.trim(),
            request.difficulty.trim(),
        );
        let created = self.repository.create(text).await?;
        log::info!("Added text {} ({})", created.id, created.preview(40));
        Ok(created)
    }

    pub async fn update_text(&self, id: &str, request: UpdateTextRequest) -> AppResult<SourceText> {
        request.validate()?;

        let mut text = self.get_text(id).await?;
        if let Some(content) = request.content {
            text.content = content.trim().to_string();
        }
        if let Some(level) = request.level {
            text.level = level;
        }
        if let Some(difficulty) = request.difficulty {
            text.difficulty = difficulty;
        }
        text.modified_at = Some(Utc::now());

        self.repository.update(text).await
    }

    /// Fills an empty library with the bundled sample texts. A library that
    /// already holds texts is left alone. Returns how many were inserted.
    pub async fn seed_samples(&self) -> AppResult<usize> {
        let (_, total) = self.repository.list(0, 1).await?;
        if total > 0 {
            log::info!("Text library already holds {} texts, skipping seed", total);
            return Ok(0);
        }

        for sample in SAMPLE_TEXTS {
            self.create_text(CreateTextRequest {
                content: sample.content.to_string(),
                level: sample.level.to_string(),
                difficulty: sample.difficulty.to_string(),
            })
            .await?;
        }

        log::info!("Seeded text library with {} sample texts", SAMPLE_TEXTS.len());
        Ok(SAMPLE_TEXTS.len())
    }

    pub async fn delete_text(&self, id: &str) -> AppResult<DeleteResponse> {
        self.repository.delete(id).await?;

        Ok(DeleteResponse {
            message: format!("Text '{}' deleted", id),
        })
    }
}
