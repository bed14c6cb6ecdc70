use serde::{Deserialize, Serialize};

/// One paragraph of a prepared document. `start..end` is the byte span of
/// `text` inside the document it was cut from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceChunk {
    pub index: usize,
    pub text: String,
    pub start: usize,
    pub end: usize,
}
