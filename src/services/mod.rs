//! Core services for framesnap

pub mod resize_engine;
pub mod window_history;

pub use resize_engine::*;
pub use window_history::*;
