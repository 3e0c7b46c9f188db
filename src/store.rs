//! In-memory staging area for translation entries with dirty tracking.

use std::collections::HashMap;

use crate::error::DirectoryError;
use crate::types::TranslationEntry;

/// Working copy of all entries plus the snapshot taken at the last load or save.
///
/// Entries are addressed by [`TranslationEntry::key`], which is unique within
/// the store. The order of `working_set` is the display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalEditStore {
    /// Entries as currently edited
    working_set: Vec<TranslationEntry>,
    /// Position of every key in `working_set`
    positions: HashMap<String, usize>,
    /// Copy of `working_set` at the last load or successful save
    committed_snapshot: Vec<TranslationEntry>,
}

impl LocalEditStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all entries and marks the store clean.
    pub fn load(&mut self, entries: Vec<TranslationEntry>) {
        self.committed_snapshot.clone_from(&entries);
        self.working_set = entries;
        self.reindex();
    }

    /// Appends an entry created through the editor; such entries may be deleted.
    pub fn add(&mut self, mut entry: TranslationEntry) {
        entry.is_delete_action_enabled = true;
        self.push(entry);
    }

    /// Appends an entry as-is.
    pub fn append(&mut self, entry: TranslationEntry) {
        self.push(entry);
    }

    /// Replaces the entry stored under `key` in place.
    ///
    /// # Errors
    /// [`DirectoryError::UnknownKey`] when no entry has `key`; nothing changes then.
    pub fn update(&mut self, key: &str, entry: TranslationEntry) -> Result<(), DirectoryError> {
        let slot = self
            .position(key)
            .and_then(|index| self.working_set.get_mut(index))
            .ok_or_else(|| DirectoryError::UnknownKey(key.to_string()))?;
        let rekeyed = entry.key() != key;
        *slot = entry;
        if rekeyed {
            self.reindex();
        }
        Ok(())
    }

    /// Removes the entry stored under `key`; absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<TranslationEntry> {
        let index = self.position(key)?;
        let removed = self.working_set.remove(index);
        self.reindex();
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.position(key).and_then(|index| self.working_set.get(index))
    }

    /// Mutable access to the entry under `key`. Its key must not be changed
    /// through the returned reference; use [`Self::update`] for that.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut TranslationEntry> {
        self.position(key).and_then(|index| self.working_set.get_mut(index))
    }

    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    #[must_use]
    pub fn entries(&self) -> &[TranslationEntry] {
        &self.working_set
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.working_set.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.working_set.is_empty()
    }

    /// Whether the working copy differs from the last committed snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.working_set != self.committed_snapshot
    }

    /// Takes a new snapshot of the working copy.
    pub fn commit(&mut self) {
        self.committed_snapshot.clone_from(&self.working_set);
    }

    /// Appends `entry` and records its position.
    fn push(&mut self, entry: TranslationEntry) {
        self.positions.insert(entry.key().to_string(), self.working_set.len());
        self.working_set.push(entry);
    }

    /// Rebuilds `positions` after entries moved.
    fn reindex(&mut self) {
        self.positions =
            self.working_set.iter().enumerate().map(|(index, entry)| (entry.key().to_string(), index)).collect();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::entry;

    #[fixture]
    fn loaded() -> LocalEditStore {
        let mut store = LocalEditStore::new();
        store.load(vec![
            entry("embassy", &["de", "en"], &[("de", "Botschaft")]),
            entry("color", &["de", "en"], &[("en", "Color")]),
        ]);
        store
    }

    #[rstest]
    fn load_is_clean(loaded: LocalEditStore) {
        assert_that!(loaded.is_dirty(), eq(false));
        assert_that!(loaded.len(), eq(2));
    }

    #[rstest]
    fn add_enables_delete_action_and_dirties(mut loaded: LocalEditStore) {
        loaded.add(entry("Site11", &["de", "en"], &[("de", "si")]));

        assert_that!(loaded.is_dirty(), eq(true));
        assert_that!(loaded.entries()[2].is_delete_action_enabled, eq(true));
    }

    #[rstest]
    fn append_keeps_entry_as_is(mut loaded: LocalEditStore) {
        loaded.append(entry("imported", &["de", "en"], &[("en", "x")]));

        assert_that!(loaded.entries()[2].is_delete_action_enabled, eq(false));
        assert_that!(loaded.is_dirty(), eq(true));
    }

    #[rstest]
    fn update_replaces_in_place(mut loaded: LocalEditStore) {
        let replacement = entry("embassy", &["de", "en"], &[("de", "Botschaft"), ("en", "Embassy")]);

        loaded.update("embassy", replacement.clone()).unwrap();

        assert_that!(loaded.position("embassy"), some(eq(0)));
        assert_eq!(loaded.get("embassy"), Some(&replacement));
        assert_that!(loaded.is_dirty(), eq(true));
    }

    #[rstest]
    fn update_unknown_key_leaves_store_untouched(mut loaded: LocalEditStore) {
        let before = loaded.clone();

        let result = loaded.update("missing", entry("missing", &["de"], &[]));

        assert!(matches!(result, Err(DirectoryError::UnknownKey(key)) if key == "missing"));
        assert_eq!(loaded, before);
    }

    #[rstest]
    fn remove_dirties_and_absent_is_noop(mut loaded: LocalEditStore) {
        let removed = loaded.remove("color");

        assert_that!(removed.map(|e| e.id), some(eq("color")));
        assert_that!(loaded.is_dirty(), eq(true));
        assert_that!(loaded.remove("color"), none());
        assert_that!(loaded.len(), eq(1));
    }

    #[rstest]
    fn commit_cleans_regardless_of_prior_mutations(mut loaded: LocalEditStore) {
        loaded.add(entry("a", &["de"], &[("de", "A")]));
        loaded.remove("embassy");
        loaded.update("color", entry("color", &["de", "en"], &[("de", "Farbe")])).unwrap();

        loaded.commit();

        assert_that!(loaded.is_dirty(), eq(false));
    }

    #[rstest]
    fn reverting_an_edit_is_clean_again(mut loaded: LocalEditStore) {
        let original = loaded.get("color").cloned().unwrap();
        loaded.update("color", entry("color", &["de", "en"], &[("de", "Farbe")])).unwrap();

        loaded.update("color", original).unwrap();

        assert_that!(loaded.is_dirty(), eq(false));
    }

    #[rstest]
    fn lookups_follow_removals(mut loaded: LocalEditStore) {
        loaded.append(entry("site", &["de", "en"], &[("de", "Seite")]));

        loaded.remove("embassy");

        assert_that!(loaded.position("color"), some(eq(0)));
        assert_that!(loaded.position("site"), some(eq(1)));
        assert_that!(loaded.get("site").map(|e| e.id.as_str()), some(eq("site")));
        assert_that!(loaded.get("embassy"), none());
    }

    #[rstest]
    fn update_under_a_new_key_moves_the_lookup(mut loaded: LocalEditStore) {
        loaded.update("color", entry("colour", &["de", "en"], &[("en", "Colour")])).unwrap();

        assert_that!(loaded.get("color"), none());
        assert_that!(loaded.position("colour"), some(eq(1)));
    }

    #[rstest]
    fn entries_are_found_by_id_alone() {
        let mut store = LocalEditStore::new();
        let mut host_entry = entry("greeting", &["de"], &[("de", "Hallo")]);
        host_entry.translation_key = String::new();

        store.load(vec![host_entry]);

        assert_that!(store.get("greeting"), some(anything()));
        assert_that!(store.get(""), none());
    }
}
