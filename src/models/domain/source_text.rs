use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document in the text library, usable as input for a session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceText {
    pub id: String,
    #[serde(rename = "texte")]
    pub content: String,
    #[serde(rename = "niveau")]
    pub level: String,
    pub difficulty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl SourceText {
    pub fn new(content: &str, level: &str, difficulty: &str) -> Self {
        SourceText {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.to_string(),
            level: level.to_string(),
            difficulty: difficulty.to_string(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// Short single-line label used when listing the library.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat: String = self.content.replace('\n', " ");
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
