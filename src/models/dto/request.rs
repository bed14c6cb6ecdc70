use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::domain::{AnswerLetter, ItemType};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Body of the stateless generation endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, alias = "context")]
    pub texte: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub item_type: Option<ItemType>,
}

/// Either an inline document or a reference to a stored text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrepareSessionRequest {
    pub document: Option<String>,
    pub text_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetItemTypeRequest {
    pub item_type: ItemType,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTextRequest {
    #[serde(alias = "texte")]
    #[validate(custom(function = "not_blank"))]
    pub content: String,

    #[serde(alias = "niveau")]
    #[validate(length(min = 1, max = 50))]
    pub level: String,

    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTextRequest {
    #[serde(alias = "texte")]
    #[validate(custom(function = "not_blank"))]
    pub content: Option<String>,

    #[serde(alias = "niveau")]
    #[validate(length(min = 1, max = 50))]
    pub level: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub difficulty: Option<String>,
}

/// Full replacement of an edited question; every text must be present.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(custom(function = "not_blank"))]
    pub question: String,

    #[serde(rename = "option_A")]
    #[validate(custom(function = "not_blank"))]
    pub option_a: String,

    #[serde(rename = "option_B")]
    #[validate(custom(function = "not_blank"))]
    pub option_b: String,

    #[serde(rename = "option_C")]
    #[validate(custom(function = "not_blank"))]
    pub option_c: String,

    #[serde(rename = "option_D")]
    #[validate(custom(function = "not_blank"))]
    pub option_d: String,

    pub correct_option: AnswerLetter,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
