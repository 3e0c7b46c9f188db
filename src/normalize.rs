//! Normalization and validation applied before an entry is saved.

use crate::error::DirectoryError;
use crate::types::TranslationEntry;

/// Trims the key and every language value; values that end up empty become `None`.
///
/// The returned entry is the canonical form callers should keep.
#[must_use]
pub fn normalize(mut entry: TranslationEntry) -> TranslationEntry {
    entry.id = entry.id.trim().to_string();
    entry.translation_key = entry.translation_key.trim().to_string();
    for value in entry.languages.values_mut() {
        *value = value.take().and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
        });
    }
    entry
}

/// Whether at least one language value is non-empty after trimming.
///
/// Entries failing this check must not be saved; callers offer deleting the
/// key instead.
#[must_use]
pub fn has_content(entry: &TranslationEntry) -> bool {
    entry.languages.values().flatten().any(|value| !value.trim().is_empty())
}

/// Exact match of `candidate` against the key of every known entry.
#[must_use]
pub fn is_duplicate_key(candidate: &str, existing: &[TranslationEntry]) -> bool {
    existing.iter().any(|entry| entry.translation_key == candidate || entry.id == candidate)
}

/// Validates the key of an entry about to be created.
///
/// Returns the trimmed key.
///
/// # Errors
/// - [`DirectoryError::BlankKey`] when the key is empty or whitespace only
/// - [`DirectoryError::DuplicateKey`] when another entry already uses the trimmed key
pub fn validate_new_key(candidate: &str, existing: &[TranslationEntry]) -> Result<String, DirectoryError> {
    let key = candidate.trim();
    if key.is_empty() {
        return Err(DirectoryError::BlankKey);
    }
    if is_duplicate_key(key, existing) {
        return Err(DirectoryError::DuplicateKey(key.to_string()));
    }
    Ok(key.to_string())
}
