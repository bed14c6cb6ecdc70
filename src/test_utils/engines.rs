//! Scripted inference engine shared by unit and integration tests.
//!
//! Engine and error types come from the including module, so the same file
//! compiles inside the library and inside `tests/common`.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use futures::StreamExt;

use super::{
    AppError, AppResult, CompletionRequest, EventStream, FinishReason, InferenceEngine,
    StreamEvent,
};

type Script = Vec<AppResult<StreamEvent>>;

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Engine that replays prepared event scripts. Each call consumes the
/// next script; the last one is replayed once the queue runs dry.
pub struct ScriptedEngine {
    scripts: Mutex<VecDeque<Script>>,
    loaded: AtomicBool,
    fail_load: bool,
    fragment_delay: Option<Duration>,
    loads: AtomicUsize,
    calls: AtomicUsize,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new(events: Script) -> Self {
        Self::sequence(vec![events])
    }

    pub fn sequence(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            loaded: AtomicBool::new(false),
            fail_load: false,
            fragment_delay: None,
            loads: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_fragments(fragments: &[&str]) -> Self {
        Self::new(text_script(fragments))
    }

    /// Streams `completion` word by word, the way tokens arrive.
    pub fn answering(completion: &str) -> Self {
        let fragments: Vec<&str> = completion.split_inclusive(' ').collect();
        Self::with_fragments(&fragments)
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(AppError::GenerationFailed(message.to_string()))])
    }

    pub fn with_completions(completions: &[&str]) -> Self {
        Self::sequence(completions.iter().map(|c| text_script(&[*c])).collect())
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn with_fragment_delay_ms(mut self, millis: u64) -> Self {
        self.fragment_delay = Some(Duration::from_millis(millis));
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn stream_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_script(&self) -> Script {
        let mut scripts = self.scripts.lock().expect("script lock");
        if scripts.len() > 1 {
            scripts.pop_front().unwrap_or_default()
        } else {
            scripts.front().cloned().unwrap_or_default()
        }
    }
}

pub fn text_script(fragments: &[&str]) -> Script {
    let mut events: Script = fragments
        .iter()
        .map(|f| Ok(StreamEvent::Text(f.to_string())))
        .collect();
    events.push(Ok(StreamEvent::Finished(FinishReason::Stop)));
    events
}

#[async_trait]
impl InferenceEngine for ScriptedEngine {
    async fn load(&self) -> AppResult<()> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_load {
            return Err(AppError::GenerationFailed("Model could not be loaded".to_string()));
        }
        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn unload(&self) -> AppResult<()> {
        self.loaded.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "scripted engine".to_string()
    }

    async fn stream_completion(&self, _request: CompletionRequest) -> AppResult<EventStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let guard = InFlight(self.in_flight.clone());
        let delay = self.fragment_delay;

        let events = futures::stream::iter(self.next_script()).then(move |event| {
            let _held = &guard;
            async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                event
            }
        });

        Ok(events.boxed())
    }
}
