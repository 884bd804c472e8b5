//! framesnap - keyboard-driven window snapping engine
//!
//! framesnap turns discrete directives ("left half", "center", "undo", ...)
//! into target window frames, applies configurable gaps, and remembers each
//! window's first-seen frame and most recent directive so a change can be
//! undone or reverted.

pub mod cli;
pub mod config;
pub mod logging;
pub mod macos;
pub mod models;
pub mod services;

pub use models::*;
pub use services::*;

/// Result type alias for framesnap operations
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to framesnap operations
#[derive(thiserror::Error, Debug)]
pub enum FrameSnapError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Window not found: {0}")]
    WindowNotFound(WindowId),

    #[error("Window is no longer valid: {0}")]
    WindowInvalid(WindowId),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("macOS API error: {0}")]
    MacOSAPIError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
