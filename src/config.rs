use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};
use crate::models::domain::ItemType;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub texts_collection: String,
    pub mcq_collection: String,
    pub fill_blank_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub llama_server_url: String,
    pub llama_api_key: Option<SecretString>,
    pub generation: GenerationSettings,
    pub engine_request_timeout_secs: u64,
    pub engine_load_wait_secs: u64,
    pub session_ttl_secs: u64,
    pub seed_texts: bool,
}

/// Sampling parameters and stop policy handed to the inference engine on every call.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop_markers: Vec<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 350,
            temperature: 0.5,
            top_p: 0.9,
            stop_markers: vec!["<|im_end|>".to_string(), "assistant".to_string()],
        }
    }
}

fn parse_stop_markers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = GenerationSettings::default();

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "projet_lsi".to_string()),
            texts_collection: env::var("TEXTS_COLLECTION").unwrap_or_else(|_| "textes".to_string()),
            mcq_collection: env::var("MCQ_COLLECTION")
                .unwrap_or_else(|_| "qcm_questions".to_string()),
            fill_blank_collection: env::var("FILL_BLANK_COLLECTION")
                .unwrap_or_else(|_| "fitb_questions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            llama_server_url: env::var("LLAMA_SERVER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            llama_api_key: env::var("LLAMA_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            generation: GenerationSettings {
                max_tokens: env::var("GENERATION_MAX_TOKENS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_tokens),
                temperature: env::var("GENERATION_TEMPERATURE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.temperature),
                top_p: env::var("GENERATION_TOP_P")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.top_p),
                stop_markers: env::var("GENERATION_STOP_MARKERS")
                    .map(|raw| parse_stop_markers(&raw))
                    .unwrap_or(defaults.stop_markers),
            },
            engine_request_timeout_secs: env::var("ENGINE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(180),
            engine_load_wait_secs: env::var("ENGINE_LOAD_WAIT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            seed_texts: env::var("SEED_TEXTS")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Collection holding persisted questions of the given item type.
    pub fn questions_collection(&self, item_type: ItemType) -> &str {
        match item_type {
            ItemType::Mcq => &self.mcq_collection,
            ItemType::FillBlank => &self.fill_blank_collection,
        }
    }

    /// Rejects sampling settings the engine would refuse or silently clamp.
    pub fn validate(&self) -> AppResult<()> {
        let settings = &self.generation;

        if settings.max_tokens == 0 {
            return Err(AppError::ValidationError(
                "GENERATION_MAX_TOKENS must be greater than zero".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&settings.temperature) {
            return Err(AppError::ValidationError(format!(
                "GENERATION_TEMPERATURE must be within 0..=2, got {}",
                settings.temperature
            )));
        }

        if settings.top_p <= 0.0 || settings.top_p > 1.0 {
            return Err(AppError::ValidationError(format!(
                "GENERATION_TOP_P must be within (0, 1], got {}",
                settings.top_p
            )));
        }

        if settings.stop_markers.is_empty() {
            return Err(AppError::ValidationError(
                "GENERATION_STOP_MARKERS must name at least one marker".to_string(),
            ));
        }

        if self.session_ttl_secs == 0 {
            return Err(AppError::ValidationError(
                "SESSION_TTL_SECS must be greater than zero".to_string(),
            ));
        }

        if self.mcq_collection == self.fill_blank_collection {
            return Err(AppError::ValidationError(
                "MCQ_COLLECTION and FILL_BLANK_COLLECTION must differ".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizgen-test".to_string(),
            texts_collection: "textes".to_string(),
            mcq_collection: "qcm_questions".to_string(),
            fill_blank_collection: "fitb_questions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            llama_server_url: "http://127.0.0.1:8080".to_string(),
            llama_api_key: None,
            generation: GenerationSettings::default(),
            engine_request_timeout_secs: 5,
            engine_load_wait_secs: 1,
            session_ttl_secs: 3600,
            seed_texts: false,
        }
    }
}
