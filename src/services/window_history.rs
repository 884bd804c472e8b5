use crate::models::{Direction, HistoryEntry, Rect, WindowId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Process-wide record of every window the engine has resized.
///
/// All access goes through one mutex, so reads and writes for a window are
/// totally ordered. Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct WindowHistoryStore {
    entries: Arc<Mutex<HashMap<WindowId, HistoryEntry>>>,
}

impl WindowHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the pre-resize frame the first time a window is seen. Returns
    /// true when a new entry was created.
    pub async fn record_first_if_absent(&self, window: WindowId, frame: Rect) -> bool {
        let mut entries = self.entries.lock().await;
        if entries.contains_key(&window) {
            return false;
        }

        debug!(window = %window, frame = %frame, "Recorded initial frame");
        entries.insert(window, HistoryEntry::new(frame));
        true
    }

    /// Remember a successfully applied directive
    pub async fn record_direction(&self, window: WindowId, direction: Direction) {
        let mut entries = self.entries.lock().await;
        match entries.get_mut(&window) {
            Some(entry) => {
                entry.push_direction(direction);
                debug!(window = %window, direction = %direction, "Recorded direction");
            }
            None => debug!(window = %window, "No history entry, direction not recorded"),
        }
    }

    pub async fn last_direction(&self, window: WindowId) -> Option<Direction> {
        self.entries
            .lock()
            .await
            .get(&window)
            .and_then(|entry| entry.last_direction)
    }

    /// Directive an `undo` resolves to, if any
    pub async fn undo_direction(&self, window: WindowId) -> Option<Direction> {
        self.entries
            .lock()
            .await
            .get(&window)
            .and_then(|entry| entry.replaced_direction)
    }

    /// Make the undone-to directive current again after an undo was applied
    pub async fn commit_undo(&self, window: WindowId) -> bool {
        let mut entries = self.entries.lock().await;
        entries
            .get_mut(&window)
            .map(HistoryEntry::pop_direction)
            .unwrap_or(false)
    }

    pub async fn initial_frame(&self, window: WindowId) -> Option<Rect> {
        self.entries
            .lock()
            .await
            .get(&window)
            .map(|entry| entry.initial_frame)
    }

    /// Drop a window's history once it is gone
    pub async fn remove(&self, window: WindowId) -> Option<HistoryEntry> {
        let removed = self.entries.lock().await.remove(&window);
        if removed.is_some() {
            debug!(window = %window, "Removed window history");
        }
        removed
    }

    pub async fn entry(&self, window: WindowId) -> Option<HistoryEntry> {
        self.entries.lock().await.get(&window).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
