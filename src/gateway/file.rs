//! Gateway storing the document in a JSON file.

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};

use super::{
    GatewayError,
    PersistenceGateway,
};
use crate::config::DirectorySettings;
use crate::types::StorageDocument;

/// Stores the document in a JSON file.
///
/// Without an options field the file holds the bare document. With one, the
/// file is an options object and the document lives under that property; all
/// other properties are kept as they are on write.
#[derive(Debug, Clone)]
pub struct FileGateway {
    /// Location of the artifact
    path: PathBuf,
    /// Property of the options object holding the document
    options_field: Option<String>,
}

impl FileGateway {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), options_field: None }
    }

    #[must_use]
    pub fn with_options_field(mut self, field: impl Into<String>) -> Self {
        self.options_field = Some(field.into());
        self
    }

    /// Builds the gateway described by `settings`, resolving the artifact
    /// path against `workspace_root`.
    #[must_use]
    pub fn from_settings(workspace_root: &Path, settings: &DirectorySettings) -> Self {
        Self {
            path: workspace_root.join(&settings.artifact.path),
            options_field: settings.artifact.options_field.clone(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the artifact as an empty JSON object when it does not exist yet.
    ///
    /// Returns whether the file was created.
    ///
    /// # Errors
    /// I/O errors other than the file being absent.
    pub async fn ensure_artifact(&self) -> Result<bool, GatewayError> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(false);
        }
        tracing::debug!(path = %self.path.display(), "Creating empty translation artifact");
        self.write_json(&Value::Object(Map::new())).await?;
        Ok(true)
    }

    /// Parsed artifact content, `None` when the file does not exist.
    async fn read_json(&self) -> Result<Option<Value>, GatewayError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Translation artifact not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes `json` pretty-printed, creating parent directories.
    async fn write_json(&self, json: &Value) -> Result<(), GatewayError> {
        let text = serde_json::to_string_pretty(json)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

impl PersistenceGateway for FileGateway {
    async fn read(&self) -> Result<StorageDocument, GatewayError> {
        let Some(json) = self.read_json().await? else {
            return Ok(StorageDocument::new());
        };

        let document = match &self.options_field {
            Some(field) => json.get(field).cloned().unwrap_or(Value::Null),
            None => json,
        };
        if document.is_null() {
            return Ok(StorageDocument::new());
        }

        let document: StorageDocument = serde_json::from_value(document)?;
        tracing::debug!(path = %self.path.display(), languages = document.len(), "Read translation artifact");
        Ok(document)
    }

    async fn write(&self, document: &StorageDocument) -> Result<(), GatewayError> {
        let document_json = serde_json::to_value(document)?;
        let json = match &self.options_field {
            None => document_json,
            Some(field) => {
                let mut options = match self.read_json().await? {
                    Some(Value::Object(options)) => options,
                    Some(_) => {
                        return Err(GatewayError::Malformed(format!(
                            "'{}' is not a JSON object",
                            self.path.display()
                        )));
                    }
                    None => Map::new(),
                };
                options.insert(field.clone(), document_json);
                Value::Object(options)
            }
        };

        self.write_json(&json).await?;
        tracing::debug!(path = %self.path.display(), "Wrote translation artifact");
        Ok(())
    }
}
