use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{
    AnswerLetter, GeneratedItem, GenerationSession, ItemType, Progress, SessionState, SourceChunk,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    Complete,
    Partial,
}

/// Flat wire shape of a generated item; unparsed fields are `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedItemDto {
    pub question: Option<String>,
    #[serde(rename = "A")]
    pub option_a: Option<String>,
    #[serde(rename = "B")]
    pub option_b: Option<String>,
    #[serde(rename = "C")]
    pub option_c: Option<String>,
    #[serde(rename = "D")]
    pub option_d: Option<String>,
    pub reponse: Option<AnswerLetter>,
    pub raw_output: String,
    pub truncated: bool,
    pub status: ParseStatus,
    pub unparsed_fields: Vec<String>,
}

impl From<&GeneratedItem> for ParsedItemDto {
    fn from(generated: &GeneratedItem) -> Self {
        let item = &generated.item;
        let option = |letter: AnswerLetter| item.option(letter).as_option().cloned();

        ParsedItemDto {
            question: item.stem.as_option().cloned(),
            option_a: option(AnswerLetter::A),
            option_b: option(AnswerLetter::B),
            option_c: option(AnswerLetter::C),
            option_d: option(AnswerLetter::D),
            reponse: item.answer.as_option().copied(),
            raw_output: item.raw.clone(),
            truncated: generated.truncated,
            status: if item.is_complete() {
                ParseStatus::Complete
            } else {
                ParseStatus::Partial
            },
            unparsed_fields: item
                .unparsed_fields()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub id: Uuid,
    pub state: SessionState,
    pub item_type: ItemType,
    pub progress: Progress,
    pub current_chunk: Option<SourceChunk>,
    pub current_item: Option<ParsedItemDto>,
    pub current_saved: bool,
    pub saved_count: usize,
}

impl From<&GenerationSession> for SessionDto {
    fn from(session: &GenerationSession) -> Self {
        SessionDto {
            id: session.id(),
            state: session.state(),
            item_type: session.item_type(),
            progress: session.progress(),
            current_chunk: session.current_chunk().cloned(),
            current_item: session.current().map(ParsedItemDto::from),
            current_saved: session.is_current_saved(),
            saved_count: session.saved_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved { id: String },
    AlreadySaved { id: String },
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
