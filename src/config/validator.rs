use crate::config::settings::ResizeSettings;
use crate::models::padding::{PaddingError, MAX_PADDING};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub severity: ValidationSeverity,
    pub field: String,
    pub message: String,
}

impl ValidationResult {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Checks a settings snapshot before it reaches the engine
#[derive(Debug, Default)]
pub struct SettingsValidator;

impl SettingsValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, settings: &ResizeSettings) -> Vec<ValidationResult> {
        let mut results = Vec::new();
        let padding = &settings.padding;

        if let Err(err) = padding.validate() {
            let field = match &err {
                PaddingError::NotFinite { field, .. } | PaddingError::OutOfRange { field, .. } => {
                    format!("padding.{field}")
                }
            };
            results.push(ValidationResult::error(field, err.to_string()));
        }

        if padding.uniform {
            let edges = [
                ("top", padding.top),
                ("bottom", padding.bottom),
                ("left", padding.left),
                ("right", padding.right),
            ];
            for (edge, value) in edges {
                if value != padding.window {
                    results.push(ValidationResult::warning(
                        format!("padding.{edge}"),
                        format!(
                            "Ignored in uniform mode: window gap {} is used instead of {}",
                            padding.window, value
                        ),
                    ));
                }
            }
            if padding.external_bar != 0.0 {
                results.push(ValidationResult::warning(
                    "padding.external_bar",
                    "Ignored in uniform mode",
                ));
            }
        }

        if padding.window > MAX_PADDING / 2.0 {
            results.push(ValidationResult::warning(
                "padding.window",
                format!(
                    "A window gap of {} leaves little room for thirds on small screens",
                    padding.window
                ),
            ));
        }

        results
    }

    pub fn has_errors(results: &[ValidationResult]) -> bool {
        results
            .iter()
            .any(|result| result.severity == ValidationSeverity::Error)
    }
}
