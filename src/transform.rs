//! Conversion between the per-language storage document and translation entries.

use indexmap::IndexSet;

use crate::types::{
    StorageDocument,
    TranslationEntry,
};

/// Builds one entry per translation key found in `document`.
///
/// Keys are collected over `languages` (in that order, skipping languages the
/// document does not contain), keeping the first-seen order and collapsing
/// duplicates. Every entry carries a field for each of `languages`.
#[must_use]
pub fn to_entries(document: &StorageDocument, languages: &[String]) -> Vec<TranslationEntry> {
    let keys: IndexSet<&String> = languages
        .iter()
        .filter_map(|code| document.get(code))
        .flat_map(|translations| translations.keys())
        .collect();

    keys.into_iter().map(|key| entry_from_document(document, key, languages)).collect()
}

/// Entry for `key` with each language's value looked up in `document`.
fn entry_from_document(
    document: &StorageDocument,
    key: &str,
    languages: &[String],
) -> TranslationEntry {
    let mut entry = TranslationEntry::new(key, languages);
    for (code, value) in &mut entry.languages {
        *value = document.get(code).and_then(|translations| translations.get(key)).cloned();
    }
    entry
}

/// Writes one entry back into `document`, language by language.
///
/// A language whose value is missing or empty has the key removed from its
/// map; so does every language when `remove` is set. Other languages get the
/// value set, creating their map when needed.
pub fn project_entry(document: &mut StorageDocument, entry: &TranslationEntry, remove: bool) {
    let key = entry.key();
    for (code, value) in &entry.languages {
        match value.as_deref() {
            Some(value) if !value.is_empty() && !remove => {
                document.entry(code.clone()).or_default().insert(key.to_string(), value.to_string());
            }
            _ => {
                document.entry(code.clone()).or_default().shift_remove(key);
            }
        }
    }
}
