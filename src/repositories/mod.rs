pub mod question_repository;
pub mod text_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use text_repository::{MongoTextRepository, TextRepository};

#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use text_repository::MockTextRepository;
