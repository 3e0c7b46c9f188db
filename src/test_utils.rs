//! Test helpers shared across the unit test modules.
#![cfg(test)]

use indexmap::IndexMap;

use crate::types::{
    StorageDocument,
    TranslationEntry,
};

/// Builds an owned language list from string literals.
pub(crate) fn langs(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|code| (*code).to_string()).collect()
}

/// Builds an entry for `key` over `languages` with the given values set.
pub(crate) fn entry(key: &str, languages: &[&str], values: &[(&str, &str)]) -> TranslationEntry {
    values
        .iter()
        .fold(TranslationEntry::new(key, &langs(languages)), |entry, (code, value)| {
            entry.with_value(code, *value)
        })
}

/// Builds a storage document from `(language, [(key, value)])` pairs.
pub(crate) fn document(languages: &[(&str, &[(&str, &str)])]) -> StorageDocument {
    languages
        .iter()
        .map(|(code, pairs)| {
            let keys: IndexMap<String, String> = pairs
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect();
            ((*code).to_string(), keys)
        })
        .collect()
}
