use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum ItemType {
    #[default]
    #[serde(rename = "mcq", alias = "QCM", alias = "qcm", alias = "MCQ")]
    Mcq, // four options, one correct
    #[serde(rename = "fill_blank", alias = "FITB", alias = "fitb", alias = "FillBlank")]
    FillBlank, // stem carries a visible blank
}

impl ItemType {
    pub const ALL: [ItemType; 2] = [ItemType::Mcq, ItemType::FillBlank];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Mcq => "mcq",
            ItemType::FillBlank => "fill_blank",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment.to_ascii_lowercase().as_str() {
            "mcq" | "qcm" => Some(ItemType::Mcq),
            "fill_blank" | "fill-blank" | "fitb" => Some(ItemType::FillBlank),
            _ => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
