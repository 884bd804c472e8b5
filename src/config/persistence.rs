use crate::config::settings::ResizeSettings;
use crate::config::validator::{SettingsValidator, ValidationResult};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {0:?}")]
    Validation(Vec<ValidationResult>),
}

#[derive(Debug, Clone)]
pub struct SettingsStoreConfig {
    pub config_dir: PathBuf,
}

impl Default for SettingsStoreConfig {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("framesnap");

        Self { config_dir }
    }
}

/// Loads and saves `settings.toml`
pub struct SettingsStore {
    config: SettingsStoreConfig,
    validator: SettingsValidator,
}

impl SettingsStore {
    pub fn new(config: SettingsStoreConfig) -> Self {
        Self {
            config,
            validator: SettingsValidator::new(),
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config.config_dir.join(SETTINGS_FILE)
    }

    /// Create the config directory and a default settings file if missing
    pub fn initialize(&self) -> Result<PathBuf, SettingsError> {
        if !self.config.config_dir.exists() {
            fs::create_dir_all(&self.config.config_dir)?;
        }

        let path = self.settings_path();
        if !path.exists() {
            self.save(&ResizeSettings::default())?;
            info!("Created default settings at {}", path.display());
        }

        Ok(path)
    }

    /// Load settings, falling back to defaults when no file exists yet
    pub fn load(&self) -> Result<ResizeSettings, SettingsError> {
        let path = self.settings_path();
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(ResizeSettings::default());
        }

        let content = fs::read_to_string(&path)?;
        let settings: ResizeSettings = toml::from_str(&content)?;
        self.check(&settings)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &ResizeSettings) -> Result<(), SettingsError> {
        self.check(settings)?;
        fs::create_dir_all(&self.config.config_dir)?;

        let path = self.settings_path();
        let content = toml::to_string_pretty(settings)?;

        // Atomic write
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(temp_path, &path)?;

        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// All findings for the settings file, warnings included
    pub fn validate_file(&self) -> Result<Vec<ValidationResult>, SettingsError> {
        let path = self.settings_path();
        let settings = if path.exists() {
            toml::from_str(&fs::read_to_string(&path)?)?
        } else {
            ResizeSettings::default()
        };
        Ok(self.validator.validate(&settings))
    }

    fn check(&self, settings: &ResizeSettings) -> Result<(), SettingsError> {
        let results = self.validator.validate(settings);
        if SettingsValidator::has_errors(&results) {
            return Err(SettingsError::Validation(results));
        }
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(SettingsStoreConfig::default())
    }
}
