use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// A field recovered from model output, or the explicit `Unparsed` sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    Parsed(T),
    Unparsed,
}

impl<T> Field<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Field::Parsed(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Field::Parsed(value) => Some(value),
            Field::Unparsed => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Parsed(value) => Some(value),
            Field::Unparsed => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Unparsed, Field::Parsed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum AnswerLetter {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
    #[serde(alias = "d")]
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; 4] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(AnswerLetter::A),
            'B' => Some(AnswerLetter::B),
            'C' => Some(AnswerLetter::C),
            'D' => Some(AnswerLetter::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            AnswerLetter::A => 'A',
            AnswerLetter::B => 'B',
            AnswerLetter::C => 'C',
            AnswerLetter::D => 'D',
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for AnswerLetter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => AnswerLetter::from_char(c)
                .ok_or_else(|| AppError::ValidationError(format!("'{}' is not one of A-D", s))),
            _ => Err(AppError::ValidationError(format!(
                "'{}' is not a single answer letter",
                s
            ))),
        }
    }
}

/// Structured view of one raw completion. Every field is always populated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParsedItem {
    pub stem: Field<String>,
    pub options: [Field<String>; 4],
    pub answer: Field<AnswerLetter>,
    pub raw: String,
}

impl ParsedItem {
    pub fn unparsed(raw: &str) -> Self {
        ParsedItem {
            stem: Field::Unparsed,
            options: [
                Field::Unparsed,
                Field::Unparsed,
                Field::Unparsed,
                Field::Unparsed,
            ],
            answer: Field::Unparsed,
            raw: raw.to_string(),
        }
    }

    pub fn option(&self, letter: AnswerLetter) -> &Field<String> {
        &self.options[letter.index()]
    }

    pub fn is_complete(&self) -> bool {
        self.unparsed_fields().is_empty()
    }

    /// Names of the fields that fell back to the sentinel, in wire naming.
    pub fn unparsed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.stem.is_parsed() {
            fields.push("question");
        }
        for (letter, name) in AnswerLetter::ALL.iter().zip(["A", "B", "C", "D"]) {
            if !self.option(*letter).is_parsed() {
                fields.push(name);
            }
        }
        if !self.answer.is_parsed() {
            fields.push("reponse");
        }
        fields
    }

    /// A record is only written when its stem exists and its answer, if any,
    /// names an option that was actually recovered.
    pub fn check_persistable(&self) -> AppResult<()> {
        if !self.stem.is_parsed() {
            return Err(AppError::InvariantViolation(
                "question stem could not be parsed".to_string(),
            ));
        }

        if let Field::Parsed(letter) = self.answer {
            if !self.option(letter).is_parsed() {
                return Err(AppError::InvariantViolation(format!(
                    "answer {} points at an unparsed option",
                    letter
                )));
            }
        }

        Ok(())
    }
}

/// The outcome of one generation step: the parsed item plus consumer metadata.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedItem {
    pub item: ParsedItem,
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_item() -> ParsedItem {
        ParsedItem {
            stem: Field::Parsed("Quelle est la première étape ?".to_string()),
            options: [
                Field::Parsed("La condensation".to_string()),
                Field::Parsed("La précipitation".to_string()),
                Field::Parsed("L'évaporation".to_string()),
                Field::Parsed("Le ruissellement".to_string()),
            ],
            answer: Field::Parsed(AnswerLetter::C),
            raw: "raw".to_string(),
        }
    }

    #[test]
    fn answer_letter_parses_case_insensitively() {
        assert_eq!(AnswerLetter::from_char('b'), Some(AnswerLetter::B));
        assert_eq!(AnswerLetter::from_char('E'), None);
        assert_eq!("d".parse::<AnswerLetter>().ok(), Some(AnswerLetter::D));
        assert!("AB".parse::<AnswerLetter>().is_err());
        assert!("".parse::<AnswerLetter>().is_err());
    }

    #[test]
    fn unparsed_item_reports_every_field() {
        let item = ParsedItem::unparsed("garbage");

        assert_eq!(item.raw, "garbage");
        assert_eq!(
            item.unparsed_fields(),
            vec!["question", "A", "B", "C", "D", "reponse"]
        );
        assert!(!item.is_complete());
    }

    #[test]
    fn complete_item_is_persistable() {
        let item = complete_item();
        assert!(item.is_complete());
        assert!(item.check_persistable().is_ok());
    }

    #[test]
    fn answer_pointing_at_unparsed_option_is_rejected() {
        let mut item = complete_item();
        item.options[1] = Field::Unparsed;
        item.answer = Field::Parsed(AnswerLetter::B);

        assert!(matches!(
            item.check_persistable(),
            Err(AppError::InvariantViolation(_))
        ));
    }

    #[test]
    fn unparsed_answer_alone_does_not_block_persistence() {
        let mut item = complete_item();
        item.answer = Field::Unparsed;
        assert!(item.check_persistable().is_ok());
    }

    #[test]
    fn field_serializes_with_explicit_status() {
        let parsed = serde_json::to_value(Field::Parsed("x".to_string())).expect("serialize");
        let unparsed = serde_json::to_value(Field::<String>::Unparsed).expect("serialize");

        assert_eq!(parsed, serde_json::json!({ "status": "parsed", "value": "x" }));
        assert_eq!(unparsed, serde_json::json!({ "status": "unparsed" }));
    }
}
