use crate::models::geometry::{Edge, Rect};
use crate::FrameSnapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Fractions of a screen rectangle that make up a geometric directive's frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMultipliers {
    pub dx: f64,
    pub dy: f64,
    pub dw: f64,
    pub dh: f64,
}

impl FrameMultipliers {
    const fn new(dx: f64, dy: f64, dw: f64, dh: f64) -> Self {
        Self { dx, dy, dw, dh }
    }

    /// Scale the multipliers onto a concrete screen rectangle
    pub fn apply(&self, screen: Rect) -> Rect {
        Rect::from_xywh(
            screen.origin.x + screen.size.width * self.dx,
            screen.origin.y + screen.size.height * self.dy,
            screen.size.width * self.dw,
            screen.size.height * self.dh,
        )
    }
}

/// Every directive a window can be given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    // Special directives, resolved procedurally
    NoAction,
    Fullscreen,
    Hide,
    Minimize,
    Center,
    Undo,
    InitialFrame,

    // Geometric directives
    Maximize,
    AlmostMaximize,
    LeftHalf,
    RightHalf,
    TopHalf,
    BottomHalf,
    TopLeftQuarter,
    TopRightQuarter,
    BottomLeftQuarter,
    BottomRightQuarter,
    LeftThird,
    LeftTwoThirds,
    HorizontalCenterThird,
    RightTwoThirds,
    RightThird,
    TopThird,
    TopTwoThirds,
    VerticalCenterThird,
    BottomTwoThirds,
    BottomThird,
}

impl Direction {
    pub const ALL: [Direction; 27] = [
        Direction::NoAction,
        Direction::Fullscreen,
        Direction::Hide,
        Direction::Minimize,
        Direction::Center,
        Direction::Undo,
        Direction::InitialFrame,
        Direction::Maximize,
        Direction::AlmostMaximize,
        Direction::LeftHalf,
        Direction::RightHalf,
        Direction::TopHalf,
        Direction::BottomHalf,
        Direction::TopLeftQuarter,
        Direction::TopRightQuarter,
        Direction::BottomLeftQuarter,
        Direction::BottomRightQuarter,
        Direction::LeftThird,
        Direction::LeftTwoThirds,
        Direction::HorizontalCenterThird,
        Direction::RightTwoThirds,
        Direction::RightThird,
        Direction::TopThird,
        Direction::TopTwoThirds,
        Direction::VerticalCenterThird,
        Direction::BottomTwoThirds,
        Direction::BottomThird,
    ];

    /// Screen fractions for geometric directives; `None` for every special one
    pub fn multipliers(self) -> Option<FrameMultipliers> {
        use Direction::*;

        let values = match self {
            NoAction | Fullscreen | Hide | Minimize | Center | Undo | InitialFrame => return None,
            Maximize => FrameMultipliers::new(0.0, 0.0, 1.0, 1.0),
            AlmostMaximize => FrameMultipliers::new(0.1, 0.1, 0.8, 0.8),
            LeftHalf => FrameMultipliers::new(0.0, 0.0, 0.5, 1.0),
            RightHalf => FrameMultipliers::new(0.5, 0.0, 0.5, 1.0),
            TopHalf => FrameMultipliers::new(0.0, 0.0, 1.0, 0.5),
            BottomHalf => FrameMultipliers::new(0.0, 0.5, 1.0, 0.5),
            TopLeftQuarter => FrameMultipliers::new(0.0, 0.0, 0.5, 0.5),
            TopRightQuarter => FrameMultipliers::new(0.5, 0.0, 0.5, 0.5),
            BottomLeftQuarter => FrameMultipliers::new(0.0, 0.5, 0.5, 0.5),
            BottomRightQuarter => FrameMultipliers::new(0.5, 0.5, 0.5, 0.5),
            LeftThird => FrameMultipliers::new(0.0, 0.0, THIRD, 1.0),
            LeftTwoThirds => FrameMultipliers::new(0.0, 0.0, TWO_THIRDS, 1.0),
            HorizontalCenterThird => FrameMultipliers::new(THIRD, 0.0, THIRD, 1.0),
            RightTwoThirds => FrameMultipliers::new(THIRD, 0.0, TWO_THIRDS, 1.0),
            RightThird => FrameMultipliers::new(TWO_THIRDS, 0.0, THIRD, 1.0),
            TopThird => FrameMultipliers::new(0.0, 0.0, 1.0, THIRD),
            TopTwoThirds => FrameMultipliers::new(0.0, 0.0, 1.0, TWO_THIRDS),
            VerticalCenterThird => FrameMultipliers::new(0.0, THIRD, 1.0, THIRD),
            BottomTwoThirds => FrameMultipliers::new(0.0, THIRD, 1.0, TWO_THIRDS),
            BottomThird => FrameMultipliers::new(0.0, TWO_THIRDS, 1.0, THIRD),
        };

        Some(values)
    }

    /// Screen edges a directive's frame is defined to touch; these get the full gap
    pub fn edges_touching_screen(self) -> &'static [Edge] {
        use Direction::*;
        use Edge::{Bottom, Left, Right, Top};

        match self {
            NoAction | Fullscreen | Hide | Minimize | Center | Undo | InitialFrame => &[],
            AlmostMaximize => &[],
            Maximize => &[Top, Bottom, Left, Right],
            LeftHalf | LeftThird | LeftTwoThirds => &[Top, Bottom, Left],
            RightHalf | RightThird | RightTwoThirds => &[Top, Bottom, Right],
            HorizontalCenterThird => &[Top, Bottom],
            TopHalf | TopThird | TopTwoThirds => &[Top, Left, Right],
            BottomHalf | BottomThird | BottomTwoThirds => &[Bottom, Left, Right],
            VerticalCenterThird => &[Left, Right],
            TopLeftQuarter => &[Top, Left],
            TopRightQuarter => &[Top, Right],
            BottomLeftQuarter => &[Bottom, Left],
            BottomRightQuarter => &[Bottom, Right],
        }
    }

    pub fn touches(self, edge: Edge) -> bool {
        self.edges_touching_screen().contains(&edge)
    }

    pub fn is_special(self) -> bool {
        self.multipliers().is_none()
    }

    /// Directives whose frame comes from the window's own geometry rather than the screen grid
    pub fn is_window_relative(self) -> bool {
        matches!(self, Direction::Center | Direction::InitialFrame)
    }

    pub fn name(self) -> &'static str {
        use Direction::*;

        match self {
            NoAction => "no-action",
            Fullscreen => "fullscreen",
            Hide => "hide",
            Minimize => "minimize",
            Center => "center",
            Undo => "undo",
            InitialFrame => "initial-frame",
            Maximize => "maximize",
            AlmostMaximize => "almost-maximize",
            LeftHalf => "left-half",
            RightHalf => "right-half",
            TopHalf => "top-half",
            BottomHalf => "bottom-half",
            TopLeftQuarter => "top-left-quarter",
            TopRightQuarter => "top-right-quarter",
            BottomLeftQuarter => "bottom-left-quarter",
            BottomRightQuarter => "bottom-right-quarter",
            LeftThird => "left-third",
            LeftTwoThirds => "left-two-thirds",
            HorizontalCenterThird => "horizontal-center-third",
            RightTwoThirds => "right-two-thirds",
            RightThird => "right-third",
            TopThird => "top-third",
            TopTwoThirds => "top-two-thirds",
            VerticalCenterThird => "vertical-center-third",
            BottomTwoThirds => "bottom-two-thirds",
            BottomThird => "bottom-third",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = FrameSnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Direction::ALL
            .iter()
            .copied()
            .find(|direction| direction.name() == normalized)
            .ok_or_else(|| FrameSnapError::ValidationError(format!("Unknown direction: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_xywh(0.0, 0.0, 1920.0, 1080.0)
    }

    #[test]
    fn special_directions_have_no_geometry() {
        for direction in Direction::ALL {
            let special = matches!(
                direction,
                Direction::NoAction
                    | Direction::Fullscreen
                    | Direction::Hide
                    | Direction::Minimize
                    | Direction::Center
                    | Direction::Undo
                    | Direction::InitialFrame
            );
            assert_eq!(direction.is_special(), special, "{direction}");
            if special {
                assert!(direction.edges_touching_screen().is_empty());
            }
        }
    }

    #[test]
    fn multipliers_stay_within_unit_square() {
        for direction in Direction::ALL {
            if let Some(m) = direction.multipliers() {
                assert!(m.dx + m.dw <= 1.0 + 1e-9, "{direction}");
                assert!(m.dy + m.dh <= 1.0 + 1e-9, "{direction}");
            }
        }
    }

    #[test]
    fn edges_match_geometry() {
        // A frame touches a screen edge exactly when it reaches it
        for direction in Direction::ALL {
            let Some(m) = direction.multipliers() else {
                continue;
            };
            assert_eq!(direction.touches(Edge::Left), m.dx == 0.0, "{direction} left");
            assert_eq!(direction.touches(Edge::Top), m.dy == 0.0, "{direction} top");
            assert_eq!(
                direction.touches(Edge::Right),
                (m.dx + m.dw - 1.0).abs() < 1e-9,
                "{direction} right"
            );
            assert_eq!(
                direction.touches(Edge::Bottom),
                (m.dy + m.dh - 1.0).abs() < 1e-9,
                "{direction} bottom"
            );
        }
    }

    #[test]
    fn left_half_covers_left_of_screen() {
        let frame = Direction::LeftHalf.multipliers().unwrap().apply(screen());
        assert_eq!(frame, Rect::from_xywh(0.0, 0.0, 960.0, 1080.0));
    }

    #[test]
    fn thirds_are_contiguous() {
        let left = Direction::LeftThird.multipliers().unwrap().apply(screen());
        let center = Direction::HorizontalCenterThird
            .multipliers()
            .unwrap()
            .apply(screen());
        let right = Direction::RightThird.multipliers().unwrap().apply(screen());

        assert!((left.max_x() - center.min_x()).abs() < 1e-9);
        assert!((center.max_x() - right.min_x()).abs() < 1e-9);
        assert!((right.max_x() - 1920.0).abs() < 1e-9);
    }

    #[test]
    fn names_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(direction.name().parse::<Direction>().unwrap(), direction);
        }
        assert_eq!(
            "Top_Left_Quarter".parse::<Direction>().unwrap(),
            Direction::TopLeftQuarter
        );
        assert!("sideways".parse::<Direction>().is_err());
    }
}
