use std::{
    collections::VecDeque,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    engine::{CompletionRequest, EventStream, FinishReason, InferenceEngine, StreamEvent},
    errors::{AppError, AppResult},
};

const HEALTH_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Body of `POST /completion` on a llama.cpp server.
#[derive(Debug, Serialize)]
struct LlamaCompletionBody<'a> {
    prompt: &'a str,
    n_predict: u32,
    temperature: f32,
    top_p: f32,
    stop: &'a [String],
    stream: bool,
    cache_prompt: bool,
}

/// One `data:` payload of the streamed response.
#[derive(Debug, Deserialize)]
struct LlamaStreamChunk {
    #[serde(default)]
    content: String,
    #[serde(default)]
    stop: bool,
    #[serde(default)]
    stopped_limit: bool,
}

/// Client for an externally managed `llama-server` process.
pub struct LlamaServerEngine {
    base_url: String,
    api_key: Option<SecretString>,
    http_client: reqwest::Client,
    load_wait: Duration,
    loaded: AtomicBool,
}

impl LlamaServerEngine {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.engine_request_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.llama_server_url.trim_end_matches('/').to_string(),
            api_key: config.llama_api_key.clone(),
            http_client,
            load_wait: Duration::from_secs(config.engine_load_wait_secs),
            loaded: AtomicBool::new(false),
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key.expose_secret()),
            None => request,
        }
    }

    pub async fn is_healthy(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.authorize(self.http_client.get(&url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl InferenceEngine for LlamaServerEngine {
    async fn load(&self) -> AppResult<()> {
        if self.is_loaded() {
            return Ok(());
        }

        log::info!("Waiting for llama-server at {} to become healthy", self.base_url);
        let start = Instant::now();
        loop {
            if self.is_healthy().await {
                self.loaded.store(true, Ordering::SeqCst);
                log::info!("llama-server at {} is ready", self.base_url);
                return Ok(());
            }
            if start.elapsed() >= self.load_wait {
                return Err(AppError::GenerationFailed(format!(
                    "Model could not be loaded: llama-server at {} not healthy after {}s",
                    self.base_url,
                    self.load_wait.as_secs()
                )));
            }
            tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
        }
    }

    async fn unload(&self) -> AppResult<()> {
        if self.loaded.swap(false, Ordering::SeqCst) {
            log::info!("Released llama-server handle at {}", self.base_url);
        }
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    async fn health_check(&self) -> AppResult<()> {
        if self.is_healthy().await {
            Ok(())
        } else {
            Err(AppError::GenerationFailed(format!(
                "llama-server at {} is not healthy",
                self.base_url
            )))
        }
    }

    fn describe(&self) -> String {
        format!("llama-server at {}", self.base_url)
    }

    async fn stream_completion(&self, request: CompletionRequest) -> AppResult<EventStream> {
        let url = format!("{}/completion", self.base_url);
        let body = LlamaCompletionBody {
            prompt: &request.prompt,
            n_predict: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            stop: &request.stop_markers,
            stream: true,
            cache_prompt: true,
        };

        let response = self
            .authorize(self.http_client.post(&url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let state = SseState {
            bytes: response
                .bytes_stream()
                .map(|chunk| chunk.map(|b| b.to_vec()))
                .boxed(),
            lines: SseLineBuffer::default(),
            queue: VecDeque::new(),
            done: false,
        };

        let events = futures::stream::unfold(state, |mut state| async move {
            loop {
                if let Some(event) = state.queue.pop_front() {
                    return Some((event, state));
                }
                if state.done {
                    return None;
                }
                match state.bytes.next().await {
                    Some(Ok(chunk)) => {
                        for line in state.lines.push(&chunk) {
                            state.queue.extend(decode_line(&line));
                        }
                    }
                    Some(Err(err)) => {
                        state.done = true;
                        state.queue.push_back(Err(err.into()));
                    }
                    None => {
                        state.done = true;
                        if let Some(line) = state.lines.finish() {
                            state.queue.extend(decode_line(&line));
                        }
                    }
                }
            }
        });

        Ok(events.boxed())
    }
}

struct SseState {
    bytes: futures::stream::BoxStream<'static, Result<Vec<u8>, reqwest::Error>>,
    lines: SseLineBuffer,
    queue: VecDeque<AppResult<StreamEvent>>,
    done: bool,
}

/// Splits a byte stream into complete text lines, holding back partial ones.
#[derive(Debug, Default)]
struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(String::from_utf8_lossy(&line).trim_end().to_string());
        }
        lines
    }

    fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.pending).trim_end().to_string();
        self.pending.clear();
        Some(line)
    }
}

/// Turns one server-sent-event line into zero or more stream events.
fn decode_line(line: &str) -> Vec<AppResult<StreamEvent>> {
    let Some(payload) = line.trim().strip_prefix("data:") else {
        return Vec::new();
    };
    let payload = payload.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return Vec::new();
    }

    let chunk: LlamaStreamChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            log::debug!("Skipping undecodable stream line: {}", e);
            return Vec::new();
        }
    };

    let mut events = Vec::new();
    if !chunk.content.is_empty() {
        events.push(Ok(StreamEvent::Text(chunk.content)));
    }
    if chunk.stop {
        let reason = if chunk.stopped_limit {
            FinishReason::Length
        } else {
            FinishReason::Stop
        };
        events.push(Ok(StreamEvent::Finished(reason)));
    }
    events
}
