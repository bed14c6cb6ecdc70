use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{GenerationSession, ItemType},
};

pub type SessionHandle = Arc<Mutex<GenerationSession>>;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

struct SessionEntry {
    handle: SessionHandle,
    last_touched: Instant,
}

impl SessionEntry {
    /// A session whose lock is held is mid-operation and never idle.
    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_touched) >= ttl && self.handle.try_lock().is_ok()
    }
}

/// Live generation sessions. Each session sits behind its own mutex so one
/// session's long `advance` never blocks another session.
///
/// Sessions untouched for longer than the TTL are evicted on the next
/// `create` or `get`.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn create(&self, item_type: ItemType) -> SessionHandle {
        let session = GenerationSession::new(item_type);
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));

        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions);
        sessions.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                last_touched: Instant::now(),
            },
        );
        log::info!("Created generation session {}", id);
        handle
    }

    pub async fn get(&self, id: &Uuid) -> AppResult<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions);

        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))?;
        entry.last_touched = Instant::now();
        Ok(entry.handle.clone())
    }

    pub async fn remove(&self, id: &Uuid) -> AppResult<()> {
        match self.sessions.write().await.remove(id) {
            Some(_) => {
                log::info!("Removed generation session {}", id);
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Session '{}' not found", id))),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, SessionEntry>) {
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let idle = entry.is_idle(now, self.ttl);
            if idle {
                log::info!("Evicting idle generation session {}", id);
            }
            !idle
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            log::debug!("{} idle sessions evicted, {} live", evicted, sessions.len());
        }
    }
}
