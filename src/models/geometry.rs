use crate::{FrameSnapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Two-dimensional point in screen coordinates (origin top-left, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Window or screen size in display points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Validated constructor for sizes coming from user input or the OS
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(FrameSnapError::ValidationError(format!(
                "Dimensions must be positive, got {width}x{height}"
            ))
            .into());
        }

        Ok(Self { width, height })
    }
}

/// One side of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
        }
    }
}

/// Rectangle describing a window frame or a screen's usable area
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn area(&self) -> f64 {
        self.size.width.max(0.0) * self.size.height.max(0.0)
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let width = self.max_x().min(other.max_x()) - self.min_x().max(other.min_x());
        let height = self.max_y().min(other.max_y()) - self.min_y().max(other.min_y());
        if width <= 0.0 || height <= 0.0 {
            0.0
        } else {
            width * height
        }
    }

    /// Move one edge inward by `amount`, leaving the opposite edge in place
    pub fn inset(&mut self, edge: Edge, amount: f64) {
        match edge {
            Edge::Top => {
                self.origin.y += amount;
                self.size.height -= amount;
            }
            Edge::Left => {
                self.origin.x += amount;
                self.size.width -= amount;
            }
            Edge::Bottom => self.size.height -= amount,
            Edge::Right => self.size.width -= amount,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.origin.x, self.origin.y, self.size.width, self.size.height
        )
    }
}

/// Parses `x,y,width,height` or `widthxheight` (origin at zero)
impl FromStr for Rect {
    type Err = FrameSnapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parse = |value: &str| {
            value.trim().parse::<f64>().map_err(|_| {
                FrameSnapError::ValidationError(format!("Invalid number '{value}' in '{s}'"))
            })
        };

        let parts: Vec<&str> = s.split(',').collect();
        let rect = match parts.as_slice() {
            [x, y, width, height] => {
                Rect::from_xywh(parse(x)?, parse(y)?, parse(width)?, parse(height)?)
            }
            [single] => match single.split_once(|c: char| c == 'x' || c == 'X') {
                Some((width, height)) => Rect::from_xywh(0.0, 0.0, parse(width)?, parse(height)?),
                None => {
                    return Err(FrameSnapError::ValidationError(format!(
                        "Expected 'x,y,width,height' or 'WIDTHxHEIGHT', got '{s}'"
                    )))
                }
            },
            _ => {
                return Err(FrameSnapError::ValidationError(format!(
                    "Expected 'x,y,width,height' or 'WIDTHxHEIGHT', got '{s}'"
                )))
            }
        };

        if rect.size.width <= 0.0 || rect.size.height <= 0.0 {
            return Err(FrameSnapError::ValidationError(format!(
                "Rectangle dimensions must be positive, got '{s}'"
            )));
        }

        Ok(rect)
    }
}
