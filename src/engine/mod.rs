//! Inference engine boundary. The rest of the crate only sees a prompt going
//! in and a stream of text fragments coming out.

pub mod llama_server;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::AppResult;

pub use llama_server::LlamaServerEngine;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub stop_markers: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The engine hit a stop marker or an end-of-sequence token.
    Stop,
    /// The token budget ran out.
    Length,
    /// The stream closed without saying why.
    EndOfStream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Text(String),
    Finished(FinishReason),
}

pub type EventStream = BoxStream<'static, AppResult<StreamEvent>>;

#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Brings the engine into a state where completions can be served.
    async fn load(&self) -> AppResult<()>;

    async fn unload(&self) -> AppResult<()>;

    fn is_loaded(&self) -> bool;

    /// Cheap liveness probe that does not change the load state.
    async fn health_check(&self) -> AppResult<()>;

    /// Human readable identity, reported by the status endpoint.
    fn describe(&self) -> String;

    async fn stream_completion(&self, request: CompletionRequest) -> AppResult<EventStream>;
}
