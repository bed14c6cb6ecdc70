use std::{sync::Arc, time::Instant};

use futures::StreamExt;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    config::GenerationSettings,
    engine::{CompletionRequest, FinishReason, InferenceEngine, StreamEvent},
    errors::{AppError, AppResult},
    models::domain::RawCompletion,
};

#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub engine: String,
    pub loaded: bool,
}

/// Owns the inference engine handle and drives one completion at a time.
pub struct CompletionService {
    engine: Arc<dyn InferenceEngine>,
    settings: GenerationSettings,
    gate: Mutex<()>,
}

impl CompletionService {
    pub fn new(engine: Arc<dyn InferenceEngine>, settings: GenerationSettings) -> Self {
        Self {
            engine,
            settings,
            gate: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            engine: self.engine.describe(),
            loaded: self.engine.is_loaded(),
        }
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.engine.health_check().await
    }

    pub async fn load(&self) -> AppResult<()> {
        let _permit = self.gate.lock().await;
        self.ensure_loaded().await
    }

    pub async fn unload(&self) -> AppResult<()> {
        let _permit = self.gate.lock().await;
        self.engine.unload().await
    }

    /// Runs the prompt with the configured stop markers and token budget.
    pub async fn complete(&self, prompt: &str) -> AppResult<RawCompletion> {
        self.consume(prompt, &self.settings.stop_markers, self.settings.max_tokens)
            .await
    }

    pub async fn consume(
        &self,
        prompt: &str,
        stop_markers: &[String],
        max_units: u32,
    ) -> AppResult<RawCompletion> {
        let _permit = self.gate.lock().await;
        self.ensure_loaded().await?;

        log::debug!("Compiled prompt:\n{}", prompt);
        let started = Instant::now();

        let request = CompletionRequest {
            prompt: prompt.to_string(),
            stop_markers: stop_markers.to_vec(),
            max_tokens: max_units,
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
        };

        let mut stream = self
            .engine
            .stream_completion(request)
            .await
            .map_err(as_generation_failure)?;

        let mut text = String::new();
        let mut units: u32 = 0;
        let mut finish = FinishReason::EndOfStream;

        while let Some(event) = stream.next().await {
            match event.map_err(as_generation_failure)? {
                StreamEvent::Text(fragment) => {
                    text.push_str(&fragment);
                    units += 1;

                    if let Some(cut) = earliest_stop(&text, stop_markers) {
                        text.truncate(cut);
                        finish = FinishReason::Stop;
                        break;
                    }
                    if units >= max_units {
                        finish = FinishReason::Length;
                        break;
                    }
                }
                StreamEvent::Finished(reason) => {
                    finish = reason;
                    break;
                }
            }
        }

        let completion = RawCompletion {
            text: text.trim().to_string(),
            truncated: finish == FinishReason::Length,
        };

        log::debug!("Raw completion:\n{}", completion.text);
        log::info!(
            "Completion finished: {} fragments, {} bytes, truncated={}, {}ms",
            units,
            completion.text.len(),
            completion.truncated,
            started.elapsed().as_millis()
        );

        Ok(completion)
    }

    async fn ensure_loaded(&self) -> AppResult<()> {
        if self.engine.is_loaded() {
            return Ok(());
        }
        self.engine.load().await.map_err(as_generation_failure)
    }
}

fn earliest_stop(text: &str, stop_markers: &[String]) -> Option<usize> {
    stop_markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .filter_map(|marker| text.find(marker.as_str()))
        .min()
}

fn as_generation_failure(err: AppError) -> AppError {
    match err {
        AppError::GenerationFailed(_) => err,
        other => AppError::GenerationFailed(other.to_string()),
    }
}
