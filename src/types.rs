//! Core types used throughout the project.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{
    Deserialize,
    Serialize,
    Serializer,
};

/// Persisted translation document: language code → (translation key → value).
///
/// A key missing from a language's map means the key has no translation in
/// that language. An empty language map is valid.
pub type StorageDocument = IndexMap<String, IndexMap<String, String>>;

/// One row per translation key, holding a value for every supported language.
///
/// `languages` always holds exactly the language set the entry was built for,
/// in that order. `None` means "no translation provided".
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    pub id: String,

    /// Mirrors `id`; kept separate because hosts display and match on it.
    #[serde(default)]
    pub translation_key: String,

    #[serde(flatten)]
    pub languages: IndexMap<String, Option<String>>,

    /// Set for entries created through the editor, never for imported ones.
    #[serde(default)]
    pub is_delete_action_enabled: bool,
}

impl TranslationEntry {
    /// Creates an entry for `key` with no translation in any of `languages`.
    #[must_use]
    pub fn new(key: impl Into<String>, languages: &[String]) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            translation_key: key,
            languages: languages.iter().map(|code| (code.clone(), None)).collect(),
            is_delete_action_enabled: false,
        }
    }

    /// Builder-style setter, mainly for hosts assembling drafts.
    #[must_use]
    pub fn with_value(mut self, language: &str, value: impl Into<String>) -> Self {
        self.set_value(language, Some(value.into()));
        self
    }

    /// The translation key this entry is identified by.
    ///
    /// Lookups match on this (`id`) only; `translation_key` is display data.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn value(&self, language: &str) -> Option<&str> {
        self.languages.get(language).and_then(Option::as_deref)
    }

    /// Sets the value for `language`.
    ///
    /// Returns the previous value, or `None` without changing anything when
    /// `language` is not one of the entry's languages.
    pub fn set_value(&mut self, language: &str, value: Option<String>) -> Option<Option<String>> {
        let slot = self.languages.get_mut(language)?;
        Some(std::mem::replace(slot, value))
    }

    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }
}

impl Serialize for TranslationEntry {
    /// Emits the host-facing shape: `id`, `translationKey`, one property per
    /// translated language and `isDeleteActionEnabled` only when set.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("translationKey", &self.translation_key)?;
        for (code, value) in &self.languages {
            if let Some(value) = value {
                map.serialize_entry(code, value)?;
            }
        }
        if self.is_delete_action_enabled {
            map.serialize_entry("isDeleteActionEnabled", &true)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::langs;

    #[rstest]
    fn new_entry_has_every_language_unset() {
        let entry = TranslationEntry::new("embassy", &langs(&["de", "en", "fr"]));

        assert_that!(entry.id, eq("embassy"));
        assert_that!(entry.translation_key, eq("embassy"));
        assert_eq!(entry.languages.keys().map(String::as_str).collect::<Vec<_>>(), ["de", "en", "fr"]);
        assert_that!(entry.languages.values().all(Option::is_none), eq(true));
        assert_that!(entry.is_delete_action_enabled, eq(false));
    }

    #[rstest]
    #[case::known_language("de", Some(Some("Alt".to_string())))]
    #[case::unknown_language("xx", None)]
    fn set_value_reports_previous(#[case] language: &str, #[case] expected: Option<Option<String>>) {
        let mut entry = TranslationEntry::new("k", &langs(&["de", "en"])).with_value("de", "Alt");

        let previous = entry.set_value(language, Some("Neu".to_string()));

        assert_eq!(previous, expected);
        assert_eq!(entry.value("xx"), None);
    }

    #[rstest]
    fn serialize_omits_missing_languages() {
        let mut entry =
            TranslationEntry::new("embassy", &langs(&["de", "en"])).with_value("de", "Botschaft");
        entry.is_delete_action_enabled = true;

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "embassy",
                "translationKey": "embassy",
                "de": "Botschaft",
                "isDeleteActionEnabled": true
            })
        );
    }

    #[rstest]
    fn deserialize_host_shape() {
        let entry: TranslationEntry = serde_json::from_value(json!({
            "id": "color",
            "translationKey": "color",
            "de": "Farbe",
            "en": null
        }))
        .unwrap();

        assert_that!(entry.value("de"), some(eq("Farbe")));
        assert_that!(entry.has_language("en"), eq(true));
        assert_that!(entry.value("en"), none());
        assert_that!(entry.is_delete_action_enabled, eq(false));
    }
}
