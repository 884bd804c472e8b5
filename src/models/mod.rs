//! Value types shared by the framesnap services

pub mod direction;
pub mod geometry;
pub mod padding;
pub mod window_history;

pub use direction::*;
pub use geometry::*;
pub use padding::*;
pub use window_history::*;
