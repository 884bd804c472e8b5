use crate::models::padding::PaddingConfiguration;
use serde::{Deserialize, Serialize};

/// User preferences the resize engine reads on every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeSettings {
    /// Resize the window under the mouse instead of the frontmost one
    pub resize_window_under_cursor: bool,
    /// Animate frame changes (needs screen recording permission)
    pub animate_window_resizes: bool,
    pub padding: PaddingConfiguration,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            resize_window_under_cursor: false,
            animate_window_resizes: false,
            padding: PaddingConfiguration::default(),
        }
    }
}

impl ResizeSettings {
    /// Gap left between windows and used as the margin when pulling a window back on screen
    pub fn window_gap(&self) -> f64 {
        self.padding.window
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.padding.set_uniform_gap(gap);
        self
    }
}
