pub mod generation_session;
pub mod item_type;
pub mod parsed_item;
pub mod raw_completion;
pub mod source_chunk;
pub mod source_text;
pub mod stored_question;
pub use generation_session::{GenerationSession, Progress, SaveKey, SessionState};
pub use item_type::ItemType;
pub use parsed_item::{AnswerLetter, Field, GeneratedItem, ParsedItem};
pub use raw_completion::RawCompletion;
pub use source_chunk::SourceChunk;
pub use source_text::SourceText;
pub use stored_question::StoredQuestion;
