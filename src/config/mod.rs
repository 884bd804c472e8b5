//! Configuration management for framesnap

pub mod persistence;
pub mod settings;
pub mod validator;

pub use persistence::{SettingsError, SettingsStore, SettingsStoreConfig};
pub use settings::ResizeSettings;
pub use validator::{SettingsValidator, ValidationResult, ValidationSeverity};
