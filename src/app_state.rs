use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    db::Database,
    engine::{InferenceEngine, LlamaServerEngine},
    errors::AppResult,
    repositories::{MongoQuestionRepository, MongoTextRepository, QuestionRepository, TextRepository},
    services::{CompletionService, GenerationService, QuestionService, TextService},
};

#[derive(Clone)]
pub struct AppState {
    pub completion_service: Arc<CompletionService>,
    pub generation_service: Arc<GenerationService>,
    pub question_service: Arc<QuestionService>,
    pub text_service: Arc<TextService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db, &config));
        question_repository.ensure_indexes().await?;
        let text_repository = Arc::new(MongoTextRepository::new(&db, &config));
        text_repository.ensure_indexes().await?;

        let engine = Arc::new(LlamaServerEngine::new(&config)?);

        let mut state = Self::with_components(config, engine, question_repository, text_repository);
        state.db = Some(db);
        Ok(state)
    }

    /// Assembles the services from already-built collaborators, without a
    /// database handle.
    pub fn with_components(
        config: Config,
        engine: Arc<dyn InferenceEngine>,
        questions: Arc<dyn QuestionRepository>,
        texts: Arc<dyn TextRepository>,
    ) -> Self {
        let completion_service = Arc::new(CompletionService::new(engine, config.generation.clone()));
        let generation_service = Arc::new(
            GenerationService::new(completion_service.clone(), questions.clone())
                .with_session_ttl(Duration::from_secs(config.session_ttl_secs)),
        );

        Self {
            completion_service,
            generation_service,
            question_service: Arc::new(QuestionService::new(questions)),
            text_service: Arc::new(TextService::new(texts)),
            db: None,
            config: Arc::new(config),
        }
    }
}
