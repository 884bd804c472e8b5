use crate::models::direction::Direction;
use crate::models::geometry::Rect;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of one OS window: owning process plus an element token
/// that stays fixed for the window's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId {
    pub pid: i32,
    pub element: u64,
}

impl WindowId {
    pub fn new(pid: i32, element: u64) -> Self {
        Self { pid, element }
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pid, self.element)
    }
}

/// What the engine remembers about a window between resizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Frame observed before the first resize; never overwritten
    pub initial_frame: Rect,
    /// Most recent successfully applied directive
    pub last_direction: Option<Direction>,
    /// Directive that `last_direction` replaced; what `undo` goes back to
    pub replaced_direction: Option<Direction>,
    pub first_seen: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(initial_frame: Rect) -> Self {
        let now = Utc::now();
        Self {
            initial_frame,
            last_direction: None,
            replaced_direction: None,
            first_seen: now,
            updated_at: now,
        }
    }

    pub fn push_direction(&mut self, direction: Direction) {
        self.replaced_direction = self.last_direction.replace(direction);
        self.updated_at = Utc::now();
    }

    /// Step back one directive. Returns false when there is nothing to go back to.
    pub fn pop_direction(&mut self) -> bool {
        match self.replaced_direction.take() {
            Some(previous) => {
                self.last_direction = Some(previous);
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}
