pub mod completion_service;
pub mod extractor;
pub mod generation_service;
pub mod prompt_compiler;
pub mod question_service;
pub mod segmenter;
pub mod session_store;
pub mod text_service;

pub use completion_service::{CompletionService, EngineStatus};
pub use generation_service::GenerationService;
pub use question_service::QuestionService;
pub use text_service::TextService;
