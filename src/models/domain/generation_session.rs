use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{item_type::ItemType, parsed_item::GeneratedItem, source_chunk::SourceChunk},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Ready,
    AwaitingNext,
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SaveKey {
    pub chunk_index: usize,
    pub item_type: ItemType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Cursor over the chunks of one prepared document.
///
/// The session is a plain state machine; the async work of producing an item
/// lives in the generation service, which only commits into the session once
/// a completion has been fully consumed.
#[derive(Clone, Debug)]
pub struct GenerationSession {
    id: Uuid,
    document: String,
    chunks: Vec<SourceChunk>,
    cursor: Option<usize>,
    item_type: ItemType,
    saved: HashMap<SaveKey, String>,
    current: Option<GeneratedItem>,
}

impl GenerationSession {
    pub fn new(item_type: ItemType) -> Self {
        Self {
            id: Uuid::new_v4(),
            document: String::new(),
            chunks: Vec::new(),
            cursor: None,
            item_type,
            saved: HashMap::new(),
            current: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn chunks(&self) -> &[SourceChunk] {
        &self.chunks
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn state(&self) -> SessionState {
        match self.cursor {
            _ if self.chunks.is_empty() => SessionState::Idle,
            None => SessionState::Ready,
            Some(index) if index + 1 >= self.chunks.len() => SessionState::Exhausted,
            Some(_) => SessionState::AwaitingNext,
        }
    }

    /// Replaces the chunk sequence and forgets everything tied to the old one.
    pub fn load_chunks(&mut self, document: &str, chunks: Vec<SourceChunk>) {
        self.document = document.to_string();
        self.chunks = chunks;
        self.cursor = None;
        self.saved.clear();
        self.current = None;
    }

    /// Index the next `advance` would generate for, without moving the cursor.
    pub fn next_index(&self) -> AppResult<usize> {
        match self.state() {
            SessionState::Idle => Err(AppError::SessionNotPrepared(format!(
                "session {} has no prepared chunks",
                self.id
            ))),
            SessionState::Exhausted => Err(AppError::SessionExhausted(format!(
                "session {} already reached its last chunk",
                self.id
            ))),
            SessionState::Ready => Ok(0),
            SessionState::AwaitingNext => Ok(self.cursor.map_or(0, |c| c + 1)),
        }
    }

    pub fn chunk(&self, index: usize) -> Option<&SourceChunk> {
        self.chunks.get(index)
    }

    pub fn current_chunk(&self) -> Option<&SourceChunk> {
        self.cursor.and_then(|index| self.chunks.get(index))
    }

    /// Moves the cursor onto `index` and records its result. Only called after
    /// a successful generation, so a failed attempt leaves the cursor in place.
    pub fn commit_advance(&mut self, index: usize, generated: GeneratedItem) -> AppResult<()> {
        let expected = self.next_index()?;
        if index != expected {
            return Err(AppError::InternalError(format!(
                "advance committed for chunk {} but the next chunk is {}",
                index, expected
            )));
        }
        self.cursor = Some(index);
        self.current = Some(generated);
        Ok(())
    }

    /// Replaces the result for the chunk under the cursor, e.g. after a type switch.
    pub fn replace_current(&mut self, generated: GeneratedItem) -> AppResult<()> {
        if self.cursor.is_none() {
            return Err(AppError::NoCurrentItem(format!(
                "session {} has not generated any chunk yet",
                self.id
            )));
        }
        self.current = Some(generated);
        Ok(())
    }

    pub fn current(&self) -> Option<&GeneratedItem> {
        self.current.as_ref()
    }

    pub fn current_key(&self) -> Option<SaveKey> {
        self.cursor.map(|chunk_index| SaveKey {
            chunk_index,
            item_type: self.item_type,
        })
    }

    pub fn saved_id(&self, key: &SaveKey) -> Option<&str> {
        self.saved.get(key).map(String::as_str)
    }

    pub fn is_current_saved(&self) -> bool {
        self.current_key()
            .is_some_and(|key| self.saved.contains_key(&key))
    }

    /// Records a persisted key. Returns false, leaving the first id in place,
    /// when the key was already present.
    pub fn mark_saved(&mut self, key: SaveKey, record_id: String) -> bool {
        if self.saved.contains_key(&key) {
            return false;
        }
        self.saved.insert(key, record_id);
        true
    }

    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// Switching type keeps the cursor but drops the result of the other type.
    pub fn set_item_type(&mut self, item_type: ItemType) {
        if self.item_type != item_type {
            self.item_type = item_type;
            self.current = None;
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.cursor.map_or(0, |c| c + 1),
            total: self.chunks.len(),
        }
    }
}
