use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectorySettings {
    /// Supported language codes, in column order.
    ///
    /// Every entry gets a field per language, whether or not the stored
    /// document has translations for it. Import files are matched against
    /// this list by name.
    pub languages: Vec<String>,

    /// Joins nested keys when import files are flattened.
    pub key_separator: String,

    pub artifact: ArtifactConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtifactConfig {
    /// Artifact file, relative to the workspace root.
    pub path: String,

    /// Property of the options object holding the document (`i18nExtra` by
    /// default). Set to `null` when the artifact is the bare document.
    pub options_field: Option<String>,
}

impl DirectorySettings {
    /// # Errors
    /// - Required field is empty
    /// - Blank or duplicate language code
    /// - Invalid separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.languages.is_empty() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: [\"de\", \"en\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, code) in self.languages.iter().enumerate() {
            if code.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    "The language code cannot be empty",
                ));
            } else if !seen.insert(code.as_str()) {
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    format!("Duplicate language code '{code}'"),
                ));
            }
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.artifact.path.trim().is_empty() {
            errors.push(ValidationError::new(
                "artifact.path",
                "The path cannot be empty. Example: \"options.json\"",
            ));
        }

        if let Some(field) = &self.artifact.options_field
            && field.is_empty()
        {
            errors.push(ValidationError::new(
                "artifact.optionsField",
                "The field cannot be empty. Please specify a property (e.g., \"i18nExtra\"), or null for a bare document",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self { path: "options.json".to_string(), options_field: Some("i18nExtra".to_string()) }
    }
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            languages: [
                "de", "en", "es", "fr", "ja_JP", "ko", "nl", "pl", "pt_BR", "ru", "zh_CN", "zh_TW",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            key_separator: ".".to_string(),
            artifact: ArtifactConfig::default(),
        }
    }
}
