use crate::models::direction::Direction;
use crate::models::geometry::{Edge, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest gap the settings accept, in points
pub const MAX_PADDING: f64 = 100.0;

#[derive(Error, Debug, PartialEq)]
pub enum PaddingError {
    #[error("Padding '{field}' must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("Padding '{field}' must be between 0 and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },
}

/// Gap amounts applied around snapped windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingConfiguration {
    /// When set, every edge uses `window`; otherwise the per-edge values apply
    pub uniform: bool,
    /// Gap between windows and, in uniform mode, between windows and the screen
    pub window: f64,
    /// Extra top space for a third-party menu bar
    pub external_bar: f64,
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for PaddingConfiguration {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

impl PaddingConfiguration {
    pub fn uniform(gap: f64) -> Self {
        Self {
            uniform: true,
            window: gap,
            external_bar: 0.0,
            top: gap,
            bottom: gap,
            left: gap,
            right: gap,
        }
    }

    /// Set the shared gap and mirror it onto every screen edge
    pub fn set_uniform_gap(&mut self, gap: f64) {
        self.window = gap;
        self.top = gap;
        self.bottom = gap;
        self.left = gap;
        self.right = gap;
    }

    /// Switch between uniform and per-edge mode. Leaving per-edge mode resets
    /// the edges to the window gap.
    pub fn set_uniform(&mut self, uniform: bool) {
        self.uniform = uniform;
        if uniform {
            let gap = self.window;
            self.set_uniform_gap(gap);
        }
    }

    /// Gap between a window edge and the screen boundary
    pub fn screen_gap(&self, edge: Edge) -> f64 {
        if self.uniform {
            return self.window;
        }

        match edge {
            Edge::Top => self.top + self.external_bar,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }

    /// Inset a frame for `direction`: full gap on screen edges, half gap on shared ones
    pub fn apply(&self, frame: Rect, direction: Direction) -> Rect {
        let mut padded = frame;
        for edge in Edge::ALL {
            let amount = if direction.touches(edge) {
                self.screen_gap(edge)
            } else {
                self.window / 2.0
            };
            padded.inset(edge, amount);
        }
        padded
    }

    pub fn validate(&self) -> Result<(), PaddingError> {
        let fields = [
            ("window", self.window),
            ("external_bar", self.external_bar),
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(PaddingError::NotFinite { field, value });
            }
            if !(0.0..=MAX_PADDING).contains(&value) {
                return Err(PaddingError::OutOfRange {
                    field,
                    value,
                    max: MAX_PADDING,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_get_full_gap() {
        let padding = PaddingConfiguration::uniform(20.0);
        let frame = Rect::from_xywh(0.0, 0.0, 960.0, 1080.0);

        let padded = padding.apply(frame, Direction::LeftHalf);
        assert_eq!(padded, Rect::from_xywh(20.0, 20.0, 930.0, 1040.0));
    }

    #[test]
    fn top_left_quarter_is_asymmetric() {
        let padding = PaddingConfiguration::uniform(20.0);
        let frame = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);

        let padded = padding.apply(frame, Direction::TopLeftQuarter);
        // top/left inset 20, bottom/right inset 10
        assert_eq!(padded.min_x(), 20.0);
        assert_eq!(padded.min_y(), 20.0);
        assert_eq!(padded.max_x(), 90.0);
        assert_eq!(padded.max_y(), 90.0);
    }

    #[test]
    fn per_edge_mode_uses_screen_values_and_external_bar() {
        let padding = PaddingConfiguration {
            uniform: false,
            window: 10.0,
            external_bar: 30.0,
            top: 5.0,
            bottom: 6.0,
            left: 7.0,
            right: 8.0,
        };
        let frame = Rect::from_xywh(0.0, 0.0, 1000.0, 1000.0);

        let padded = padding.apply(frame, Direction::Maximize);
        assert_eq!(padded, Rect::from_xywh(7.0, 35.0, 985.0, 959.0));

        // Shared edges fall back to half the window gap
        let padded = padding.apply(frame, Direction::AlmostMaximize);
        assert_eq!(padded, Rect::from_xywh(5.0, 5.0, 990.0, 990.0));
    }

    #[test]
    fn leaving_per_edge_mode_resets_edges() {
        let mut padding = PaddingConfiguration {
            uniform: false,
            window: 12.0,
            external_bar: 0.0,
            top: 1.0,
            bottom: 2.0,
            left: 3.0,
            right: 4.0,
        };
        padding.set_uniform(true);

        assert_eq!(padding, PaddingConfiguration::uniform(12.0));
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut padding = PaddingConfiguration::uniform(20.0);
        assert!(padding.validate().is_ok());

        padding.left = -1.0;
        assert!(matches!(
            padding.validate(),
            Err(PaddingError::OutOfRange { field: "left", .. })
        ));

        padding.left = 0.0;
        padding.window = f64::INFINITY;
        assert!(matches!(
            padding.validate(),
            Err(PaddingError::NotFinite { field: "window", .. })
        ));
    }
}
