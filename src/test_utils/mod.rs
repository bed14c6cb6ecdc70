use crate::{
    engine::{CompletionRequest, EventStream, FinishReason, InferenceEngine, StreamEvent},
    errors::{AppError, AppResult},
};

pub mod engines;
pub mod fixtures;

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::segmenter::segment;

    #[test]
    fn test_sample_document_has_three_paragraphs() {
        let chunks = segment(SAMPLE_DOCUMENT);
        assert_eq!(chunks.len(), 3);
        assert!(chunks[2].text.starts_with("En altitude"));
    }

    #[test]
    fn test_canonical_fixtures_follow_template() {
        for raw in [CANONICAL_MCQ, CANONICAL_FILL_BLANK] {
            assert!(raw.starts_with("Question:"));
            assert!(raw.ends_with("Réponse: B"));
        }
    }
}
