use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{ItemType, StoredQuestion},
        dto::{
            request::{PaginationParams, UpdateQuestionRequest},
            response::{DeleteResponse, ListResponse},
        },
    },
    repositories::QuestionRepository,
};

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_questions(
        &self,
        item_type: ItemType,
        pagination: &PaginationParams,
    ) -> AppResult<ListResponse<StoredQuestion>> {
        let (offset, limit) = (pagination.offset(), pagination.limit());
        let (items, total) = self
            .repository
            .list_by_type(item_type, offset, limit)
            .await?;

        Ok(ListResponse {
            items,
            total,
            offset,
            limit,
        })
    }

    pub async fn get_question(&self, item_type: ItemType, id: &str) -> AppResult<StoredQuestion> {
        self.repository
            .find_by_id(item_type, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    pub async fn update_question(
        &self,
        item_type: ItemType,
        id: &str,
        request: UpdateQuestionRequest,
    ) -> AppResult<StoredQuestion> {
        request.validate()?;

        let mut question = self.get_question(item_type, id).await?;
        question.question = request.question.trim().to_string();
        question.option_a = Some(request.option_a.trim().to_string());
        question.option_b = Some(request.option_b.trim().to_string());
        question.option_c = Some(request.option_c.trim().to_string());
        question.option_d = Some(request.option_d.trim().to_string());
        question.correct_option = Some(request.correct_option);
        question.modified_at = Some(Utc::now());

        let updated = self.repository.update(question).await?;
        log::info!("Updated {} question {}", item_type, id);
        Ok(updated)
    }

    pub async fn delete_question(&self, item_type: ItemType, id: &str) -> AppResult<DeleteResponse> {
        self.repository.delete(item_type, id).await?;
        log::info!("Deleted {} question {}", item_type, id);

        Ok(DeleteResponse {
            message: format!("Question '{}' deleted", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{AnswerLetter, Field, ParsedItem},
        repositories::MockQuestionRepository,
    };

    fn stored() -> StoredQuestion {
        let item = ParsedItem {
            stem: Field::Parsed("Q ?".to_string()),
            options: [
                Field::Parsed("a".to_string()),
                Field::Parsed("b".to_string()),
                Field::Unparsed,
                Field::Parsed("d".to_string()),
            ],
            answer: Field::Parsed(AnswerLetter::A),
            raw: "raw".to_string(),
        };
        StoredQuestion::from_parsed(&item, "ctx", ItemType::Mcq).expect("consistent")
    }

    fn update_request(option_c: &str) -> UpdateQuestionRequest {
        UpdateQuestionRequest {
            question: " Q modifiée ? ".to_string(),
            option_a: "a".to_string(),
            option_b: "b".to_string(),
            option_c: option_c.to_string(),
            option_d: "d".to_string(),
            correct_option: AnswerLetter::C,
        }
    }

    #[tokio::test]
    async fn test_get_missing_question_is_not_found() {
        let mut repository = MockQuestionRepository::new();
        repository.expect_find_by_id().returning(|_, _| Ok(None));
        let service = QuestionService::new(Arc::new(repository));

        let result = service.get_question(ItemType::Mcq, "missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_fills_missing_option_and_answer() {
        let original = stored();
        let id = original.id.clone();
        let mut repository = MockQuestionRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_, _| Ok(Some(original.clone())));
        repository
            .expect_update()
            .times(1)
            .returning(|question| Ok(question));
        let service = QuestionService::new(Arc::new(repository));

        let updated = service
            .update_question(ItemType::Mcq, &id, update_request("c"))
            .await
            .expect("update succeeds");

        assert_eq!(updated.question, "Q modifiée ?");
        assert_eq!(updated.option(AnswerLetter::C), Some("c"));
        assert_eq!(updated.correct_option, Some(AnswerLetter::C));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_option_without_touching_repository() {
        let mut repository = MockQuestionRepository::new();
        repository.expect_find_by_id().never();
        repository.expect_update().never();
        let service = QuestionService::new(Arc::new(repository));

        let result = service
            .update_question(ItemType::Mcq, "id", update_request("  "))
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_list_passes_pagination() {
        let mut repository = MockQuestionRepository::new();
        repository
            .expect_list_by_type()
            .withf(|item_type, offset, limit| {
                *item_type == ItemType::FillBlank && *offset == 0 && *limit == 20
            })
            .returning(|_, _, _| Ok((vec![], 0)));
        let service = QuestionService::new(Arc::new(repository));

        let page = service
            .list_questions(ItemType::FillBlank, &PaginationParams::default())
            .await
            .expect("list succeeds");
        assert_eq!(page.total, 0);
        assert_eq!(page.limit, 20);
    }
}
