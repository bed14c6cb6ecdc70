use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::AppResult,
    models::domain::{
        item_type::ItemType,
        parsed_item::{AnswerLetter, ParsedItem},
    },
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredQuestion {
    pub id: String,
    pub item_type: ItemType,
    pub question: String,
    #[serde(rename = "option_A")]
    pub option_a: Option<String>,
    #[serde(rename = "option_B")]
    pub option_b: Option<String>,
    #[serde(rename = "option_C")]
    pub option_c: Option<String>,
    #[serde(rename = "option_D")]
    pub option_d: Option<String>,
    pub correct_option: Option<AnswerLetter>,
    pub source_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl StoredQuestion {
    /// Builds the record for a freshly generated item. Fails when the item
    /// would violate the persistence invariants.
    pub fn from_parsed(item: &ParsedItem, source_text: &str, item_type: ItemType) -> AppResult<Self> {
        item.check_persistable()?;

        let option = |letter: AnswerLetter| item.option(letter).as_option().cloned();
        let question = item.stem.as_option().cloned().unwrap_or_default();

        Ok(StoredQuestion {
            id: Uuid::new_v4().to_string(),
            item_type,
            question,
            option_a: option(AnswerLetter::A),
            option_b: option(AnswerLetter::B),
            option_c: option(AnswerLetter::C),
            option_d: option(AnswerLetter::D),
            correct_option: item.answer.as_option().copied(),
            source_text: source_text.to_string(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        })
    }

    pub fn option(&self, letter: AnswerLetter) -> Option<&str> {
        match letter {
            AnswerLetter::A => self.option_a.as_deref(),
            AnswerLetter::B => self.option_b.as_deref(),
            AnswerLetter::C => self.option_c.as_deref(),
            AnswerLetter::D => self.option_d.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::AppError, models::domain::parsed_item::Field};

    fn item_with_missing_c() -> ParsedItem {
        ParsedItem {
            stem: Field::Parsed("Le soleil chauffe ______ des océans.".to_string()),
            options: [
                Field::Parsed("l'eau".to_string()),
                Field::Parsed("le sable".to_string()),
                Field::Unparsed,
                Field::Parsed("la glace".to_string()),
            ],
            answer: Field::Parsed(AnswerLetter::A),
            raw: "raw".to_string(),
        }
    }

    #[test]
    fn from_parsed_keeps_unparsed_options_as_none() {
        let stored = StoredQuestion::from_parsed(&item_with_missing_c(), "context", ItemType::FillBlank)
            .expect("answer A is parsed, record is consistent");

        assert_eq!(stored.option(AnswerLetter::A), Some("l'eau"));
        assert_eq!(stored.option(AnswerLetter::C), None);
        assert_eq!(stored.correct_option, Some(AnswerLetter::A));
        assert_eq!(stored.source_text, "context");
        assert_eq!(stored.item_type, ItemType::FillBlank);
    }

    #[test]
    fn from_parsed_rejects_answer_on_missing_option() {
        let mut item = item_with_missing_c();
        item.answer = Field::Parsed(AnswerLetter::C);

        let result = StoredQuestion::from_parsed(&item, "context", ItemType::FillBlank);
        assert!(matches!(result, Err(AppError::InvariantViolation(_))));
    }

    #[test]
    fn stored_question_uses_collection_field_names() {
        let stored = StoredQuestion::from_parsed(&item_with_missing_c(), "ctx", ItemType::Mcq)
            .expect("consistent");
        let json = serde_json::to_value(&stored).expect("should serialize");

        assert_eq!(json["option_A"], "l'eau");
        assert!(json["option_C"].is_null());
        assert_eq!(json["correct_option"], "A");
        assert_eq!(json["item_type"], "mcq");
    }
}
