//! Translation directory: owns the document and the edit store and drives
//! the load → edit → save → commit lifecycle.
//!
//! Every edit is applied to the working copy and projected into the storage
//! document right away, so a save only has to hand the document to the
//! gateway. The committed snapshot moves only after a successful load or save.
//!
//! A cell edit that empties its entry opens a pending removal. Until it is
//! confirmed or cancelled the document still holds the entry, and every other
//! mutation (including save) is refused with [`DirectoryError::RemovalPending`].

use crate::config::DirectorySettings;
use crate::error::DirectoryError;
use crate::gateway::PersistenceGateway;
use crate::import::{
    self,
    ImportFile,
};
use crate::normalize::{
    has_content,
    normalize,
    validate_new_key,
};
use crate::store::LocalEditStore;
use crate::transform::{
    project_entry,
    to_entries,
};
use crate::types::{
    StorageDocument,
    TranslationEntry,
};

/// Result of [`TranslationDirectory::reload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Reloaded,
    /// Unsaved changes exist and were not discarded; nothing was read.
    KeptChanges,
}

/// Result of [`TranslationDirectory::save_cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellSave {
    /// The value was stored in the document.
    Saved,
    /// The edit left the entry without any translation. The directory now
    /// waits for [`TranslationDirectory::confirm_removal`] or
    /// [`TranslationDirectory::cancel_removal`].
    RemovalRequired(PendingRemoval),
}

/// A cell edit that emptied its entry, awaiting the user's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    /// Key of the emptied entry
    key: String,
    /// Language of the edited cell
    language: String,
    /// Cell value before the edit
    previous_value: Option<String>,
}

impl PendingRemoval {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Cell value before the edit.
    #[must_use]
    pub fn previous_value(&self) -> Option<&str> {
        self.previous_value.as_deref()
    }
}

/// Working state of one tenant's translations.
#[derive(Debug)]
pub struct TranslationDirectory<G> {
    /// Storage backend
    gateway: G,
    /// Supported languages, fixed for the directory's lifetime
    languages: Vec<String>,
    /// Separator used when flattening import files
    key_separator: String,
    /// Document as it will be written on save
    document: StorageDocument,
    /// Entries being edited
    store: LocalEditStore,
    /// Removal opened by [`Self::save_cell`], if undecided
    pending_removal: Option<PendingRemoval>,
    /// Whether a load has installed a document yet
    loaded: bool,
}

impl<G: PersistenceGateway> TranslationDirectory<G> {
    #[must_use]
    pub fn new(gateway: G, settings: &DirectorySettings) -> Self {
        Self {
            gateway,
            languages: settings.languages.clone(),
            key_separator: settings.key_separator.clone(),
            document: StorageDocument::new(),
            store: LocalEditStore::new(),
            pending_removal: None,
            loaded: false,
        }
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[must_use]
    pub fn entries(&self) -> &[TranslationEntry] {
        self.store.entries()
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&TranslationEntry> {
        self.store.get(key)
    }

    #[must_use]
    pub const fn document(&self) -> &StorageDocument {
        &self.document
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn pending_removal(&self) -> Option<&PendingRemoval> {
        self.pending_removal.as_ref()
    }

    /// Whether there are changes not yet saved.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.pending_removal.is_some() || self.store.is_dirty()
    }

    /// Reads the document and replaces the working copy with its entries.
    ///
    /// If the very first load fails, an empty document is installed so the
    /// directory stays usable; the error is still returned. Later failures
    /// keep the current state. A successful load drops any pending removal.
    ///
    /// # Errors
    /// [`DirectoryError::Gateway`] when the read fails.
    pub async fn load(&mut self) -> Result<(), DirectoryError> {
        match self.gateway.read().await {
            Ok(document) => {
                self.install(document);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, initial = !self.loaded, "Failed to read translations");
                if !self.loaded {
                    self.install(StorageDocument::new());
                }
                Err(error.into())
            }
        }
    }

    /// Loads again unless that would drop unsaved changes the caller wants to keep.
    ///
    /// # Errors
    /// See [`Self::load`].
    pub async fn reload(&mut self, discard_unsaved: bool) -> Result<ReloadOutcome, DirectoryError> {
        if self.is_dirty() && !discard_unsaved {
            return Ok(ReloadOutcome::KeptChanges);
        }
        self.load().await?;
        Ok(ReloadOutcome::Reloaded)
    }

    /// Replaces document and working copy, committing the new state.
    fn install(&mut self, document: StorageDocument) {
        let entries = to_entries(&document, &self.languages);
        tracing::debug!(entries = entries.len(), languages = self.languages.len(), "Loaded translations");
        self.store.load(entries);
        self.document = document;
        self.pending_removal = None;
        self.loaded = true;
    }

    /// An empty entry over the supported languages, for the creation form.
    #[must_use]
    pub fn new_entry_draft(&self) -> TranslationEntry {
        TranslationEntry::new(String::new(), &self.languages)
    }

    /// Adds a new entry built from `draft`, keyed by its `translation_key`.
    ///
    /// # Errors
    /// - [`DirectoryError::RemovalPending`] while a removal is undecided
    /// - [`DirectoryError::BlankKey`] / [`DirectoryError::DuplicateKey`] for an unusable key
    /// - [`DirectoryError::UnknownLanguage`] when the draft has a field outside the language set
    /// - [`DirectoryError::NoContent`] when no language has a value
    pub fn create_entry(&mut self, draft: TranslationEntry) -> Result<(), DirectoryError> {
        self.ensure_no_pending_removal()?;
        let key = validate_new_key(&draft.translation_key, self.store.entries())?;
        let entry = normalize(self.conform(draft, &key)?);
        if !has_content(&entry) {
            return Err(DirectoryError::NoContent(key));
        }

        project_entry(&mut self.document, &entry, false);
        self.store.add(entry);
        tracing::debug!(key = %key, "Created translation entry");
        Ok(())
    }

    /// Replaces the values of the entry stored under `key` with those of `edited`.
    ///
    /// The key itself cannot change; `edited`'s key fields are ignored.
    ///
    /// # Errors
    /// - [`DirectoryError::RemovalPending`] while a removal is undecided
    /// - [`DirectoryError::UnknownKey`] when no entry has `key`
    /// - [`DirectoryError::UnknownLanguage`] when `edited` has a field outside the language set
    /// - [`DirectoryError::NoContent`] when no language has a value; nothing changes then
    pub fn edit_entry(&mut self, key: &str, edited: TranslationEntry) -> Result<(), DirectoryError> {
        self.ensure_no_pending_removal()?;
        let existing = self.store.get(key).ok_or_else(|| DirectoryError::UnknownKey(key.to_string()))?;
        let delete_enabled = existing.is_delete_action_enabled;

        let mut entry = normalize(self.conform(edited, key)?);
        entry.is_delete_action_enabled = delete_enabled;
        if !has_content(&entry) {
            return Err(DirectoryError::NoContent(key.to_string()));
        }

        project_entry(&mut self.document, &entry, false);
        self.store.update(key, entry)
    }

    /// Saves a single cell.
    ///
    /// The whole entry is normalized. If it still has a translation the
    /// document is updated. Otherwise only the edited cell is cleared in the
    /// working copy, the document keeps the entry, and a removal is opened.
    ///
    /// # Errors
    /// [`DirectoryError::RemovalPending`], [`DirectoryError::UnknownLanguage`]
    /// or [`DirectoryError::UnknownKey`].
    pub fn save_cell(&mut self, key: &str, language: &str, value: &str) -> Result<CellSave, DirectoryError> {
        self.ensure_no_pending_removal()?;
        if !self.languages.iter().any(|code| code == language) {
            return Err(DirectoryError::UnknownLanguage(language.to_string()));
        }
        let entry = self.store.get_mut(key).ok_or_else(|| DirectoryError::UnknownKey(key.to_string()))?;

        let mut edited = entry.clone();
        edited.set_value(language, Some(value.to_string()));
        let edited = normalize(edited);
        if has_content(&edited) {
            *entry = edited;
            project_entry(&mut self.document, entry, false);
            return Ok(CellSave::Saved);
        }

        let previous_value = entry.set_value(language, None).flatten();
        let pending =
            PendingRemoval { key: key.to_string(), language: language.to_string(), previous_value };
        tracing::debug!(key = %key, language = %language, "Cell edit left entry without translations");
        self.pending_removal = Some(pending.clone());
        Ok(CellSave::RemovalRequired(pending))
    }

    /// Deletes the entry whose last translation was removed.
    ///
    /// # Errors
    /// [`DirectoryError::NoPendingRemoval`] when nothing awaits confirmation.
    pub fn confirm_removal(&mut self) -> Result<TranslationEntry, DirectoryError> {
        let pending = self.pending_removal.take().ok_or(DirectoryError::NoPendingRemoval)?;
        tracing::debug!(key = %pending.key, "Removal confirmed");
        self.remove_entry(&pending.key).ok_or(DirectoryError::UnknownKey(pending.key))
    }

    /// Puts the edited cell back to its value before the edit.
    ///
    /// Other languages are left as they are.
    ///
    /// # Errors
    /// [`DirectoryError::NoPendingRemoval`] when nothing awaits confirmation.
    pub fn cancel_removal(&mut self) -> Result<(), DirectoryError> {
        let pending = self.pending_removal.take().ok_or(DirectoryError::NoPendingRemoval)?;
        tracing::debug!(key = %pending.key, "Removal cancelled");
        let entry =
            self.store.get_mut(&pending.key).ok_or_else(|| DirectoryError::UnknownKey(pending.key.clone()))?;
        entry.set_value(&pending.language, pending.previous_value);
        Ok(())
    }

    /// Removes the entry and its translations in every language.
    ///
    /// Absent keys are a no-op and yield `None`.
    ///
    /// # Errors
    /// [`DirectoryError::RemovalPending`] while a removal is undecided.
    pub fn delete_entry(&mut self, key: &str) -> Result<Option<TranslationEntry>, DirectoryError> {
        self.ensure_no_pending_removal()?;
        Ok(self.remove_entry(key))
    }

    /// Drops `key` from the store and the document.
    fn remove_entry(&mut self, key: &str) -> Option<TranslationEntry> {
        let removed = self.store.remove(key)?;
        project_entry(&mut self.document, &removed, true);
        Some(removed)
    }

    /// Imports the dropped files, which must be exactly one.
    ///
    /// # Errors
    /// [`DirectoryError::NoImportFile`] / [`DirectoryError::MultipleImportFiles`],
    /// then everything [`Self::import_file`] rejects.
    pub fn import_files(&mut self, files: Vec<ImportFile>) -> Result<Vec<TranslationEntry>, DirectoryError> {
        self.ensure_no_pending_removal()?;
        let file = import::single_file(files)?;
        self.import_file(&file)
    }

    /// Merges one single-language file into the working copy.
    ///
    /// Returns the affected entries after the merge. Nothing changes when the
    /// file is rejected.
    ///
    /// # Errors
    /// A pending removal, malformed or empty content, or a file name naming
    /// no supported language.
    pub fn import_file(&mut self, file: &ImportFile) -> Result<Vec<TranslationEntry>, DirectoryError> {
        self.ensure_no_pending_removal()?;
        let prepared = import::prepare(file, &self.languages, &self.key_separator)?;
        let affected =
            import::import_merge(&prepared.translations, &prepared.language, &mut self.store, &self.languages);
        for entry in &affected {
            project_entry(&mut self.document, entry, false);
        }

        tracing::info!(file = %file.name, language = %prepared.language, entries = affected.len(), "Imported translations");
        Ok(affected)
    }

    /// Writes the whole document; the snapshot is committed only on success.
    ///
    /// # Errors
    /// - [`DirectoryError::RemovalPending`] while a removal is undecided; nothing is written
    /// - [`DirectoryError::Gateway`] when the write fails. The working copy and
    ///   snapshot are untouched, so the save can be retried as is.
    pub async fn save(&mut self) -> Result<(), DirectoryError> {
        self.ensure_no_pending_removal()?;
        match self.gateway.write(&self.document).await {
            Ok(()) => {
                self.store.commit();
                tracing::info!(entries = self.store.len(), "Translation configuration saved");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to save translations");
                Err(error.into())
            }
        }
    }

    /// Refuses mutations while a removal is undecided.
    fn ensure_no_pending_removal(&self) -> Result<(), DirectoryError> {
        match &self.pending_removal {
            Some(pending) => Err(DirectoryError::RemovalPending(pending.key.clone())),
            None => Ok(()),
        }
    }

    /// Rebuilds `draft` over the directory's language set under `key`.
    fn conform(&self, draft: TranslationEntry, key: &str) -> Result<TranslationEntry, DirectoryError> {
        let mut entry = TranslationEntry::new(key, &self.languages);
        entry.is_delete_action_enabled = draft.is_delete_action_enabled;
        for (code, value) in draft.languages {
            if entry.set_value(&code, value).is_none() {
                return Err(DirectoryError::UnknownLanguage(code));
            }
        }
        Ok(entry)
    }
}
