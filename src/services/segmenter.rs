use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::SourceChunk;

/// A blank-line paragraph boundary: any whitespace run holding two or more newlines.
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[^\S\n]*\n\s*").expect("PARAGRAPH_BREAK is a valid regex pattern")
});

/// Splits a document into ordered, trimmed, non-empty paragraph chunks.
pub fn segment(document: &str) -> Vec<SourceChunk> {
    let mut chunks = Vec::new();
    let mut piece_start = 0;

    let boundaries = PARAGRAPH_BREAK
        .find_iter(document)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((document.len(), document.len())));

    for (break_start, break_end) in boundaries {
        let piece = &document[piece_start..break_start];
        let trimmed = piece.trim();

        if !trimmed.is_empty() {
            let leading = piece.len() - piece.trim_start().len();
            let start = piece_start + leading;
            chunks.push(SourceChunk {
                index: chunks.len(),
                text: trimmed.to_string(),
                start,
                end: start + trimmed.len(),
            });
        }

        piece_start = break_end;
    }

    chunks
}
