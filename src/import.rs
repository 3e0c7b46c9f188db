//! Import of single-language translation files into the edit store.

use indexmap::IndexMap;
use jsonc_parser::ParseOptions;
use serde_json::Value;

use crate::error::DirectoryError;
use crate::flatten::flatten_json;
use crate::store::LocalEditStore;
use crate::types::TranslationEntry;

/// A dropped translation file: its original name and parsed content.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFile {
    pub name: String,
    pub json: Value,
}

impl ImportFile {
    #[must_use]
    pub fn new(name: impl Into<String>, json: Value) -> Self {
        Self { name: name.into(), json }
    }

    /// Parses `text` as the content of a file named `name`.
    ///
    /// # Errors
    /// See [`parse_import_text`].
    pub fn from_text(name: impl Into<String>, text: &str) -> Result<Self, DirectoryError> {
        Ok(Self::new(name, parse_import_text(text)?))
    }
}

/// Flattened content of an import file together with its detected language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImport {
    pub language: String,
    pub translations: IndexMap<String, String>,
}

/// Parses import file text. Comments and trailing commas are tolerated.
///
/// # Errors
/// [`DirectoryError::MalformedImport`] when the text is not JSON or is blank,
/// [`DirectoryError::EmptyImport`] when the root is an empty object.
pub fn parse_import_text(text: &str) -> Result<Value, DirectoryError> {
    let json = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| DirectoryError::MalformedImport(e.to_string()))?
        .ok_or_else(|| DirectoryError::MalformedImport("file is empty".to_string()))?;
    ensure_non_empty_object(&json)?;
    Ok(json)
}

/// Only a non-empty JSON object can hold translations.
fn ensure_non_empty_object(json: &Value) -> Result<(), DirectoryError> {
    match json {
        Value::Object(map) if map.is_empty() => Err(DirectoryError::EmptyImport),
        Value::Object(_) => Ok(()),
        _ => Err(DirectoryError::MalformedImport("expected a JSON object".to_string())),
    }
}

/// Returns the first of `languages` that occurs in `file_name`.
#[must_use]
pub fn detect_language<'a>(file_name: &str, languages: &'a [String]) -> Option<&'a str> {
    languages.iter().find(|code| file_name.contains(code.as_str())).map(String::as_str)
}

/// Accepts exactly one file.
///
/// # Errors
/// [`DirectoryError::NoImportFile`] or [`DirectoryError::MultipleImportFiles`].
pub fn single_file(files: Vec<ImportFile>) -> Result<ImportFile, DirectoryError> {
    let count = files.len();
    let mut files = files.into_iter();
    match (files.next(), count) {
        (Some(file), 1) => Ok(file),
        (None, _) => Err(DirectoryError::NoImportFile),
        (Some(_), count) => Err(DirectoryError::MultipleImportFiles(count)),
    }
}

/// Validates an import file and flattens it.
///
/// Keys whose value is blank are left out.
///
/// # Errors
/// - [`DirectoryError::MalformedImport`] / [`DirectoryError::EmptyImport`] for unusable content
/// - [`DirectoryError::UnknownImportLanguage`] when the file name names no supported language
pub fn prepare(
    file: &ImportFile,
    languages: &[String],
    separator: &str,
) -> Result<PreparedImport, DirectoryError> {
    ensure_non_empty_object(&file.json)?;

    let language = detect_language(&file.name, languages)
        .ok_or_else(|| DirectoryError::UnknownImportLanguage(file.name.clone()))?
        .to_string();

    let translations: IndexMap<String, String> = flatten_json(&file.json, separator)
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();
    if translations.is_empty() {
        return Err(DirectoryError::EmptyImport);
    }

    tracing::debug!(file = %file.name, language = %language, keys = translations.len(), "Prepared import");
    Ok(PreparedImport { language, translations })
}

/// Converts flat translations of one language into entries over `languages`.
#[must_use]
pub fn to_language_entries(
    translations: &IndexMap<String, String>,
    language: &str,
    languages: &[String],
) -> Vec<TranslationEntry> {
    translations
        .iter()
        .map(|(key, value)| TranslationEntry::new(key.as_str(), languages).with_value(language, value.as_str()))
        .collect()
}

/// Merges flat translations of `language` into `store`.
///
/// An entry with the same translation key gets only `language` overwritten and
/// keeps its position; other keys are appended as new entries. Returns the
/// affected entries as they are after the merge.
pub fn import_merge(
    translations: &IndexMap<String, String>,
    language: &str,
    store: &mut LocalEditStore,
    languages: &[String],
) -> Vec<TranslationEntry> {
    let mut affected = Vec::with_capacity(translations.len());
    for imported in to_language_entries(translations, language, languages) {
        let value = imported.value(language).map(ToString::to_string);
        let merged = if let Some(existing) = store.get_mut(imported.key()) {
            existing.set_value(language, value);
            existing.clone()
        } else {
            store.append(imported.clone());
            imported
        };
        affected.push(merged);
    }
    affected
}
