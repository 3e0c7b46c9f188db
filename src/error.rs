//! Error taxonomy for directory operations.

use thiserror::Error;

use crate::gateway::GatewayError;

/// Coarse classification of a [`DirectoryError`], for hosts that map failures
/// to different notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Import input could not be used (unreadable, empty, ambiguous).
    MalformedInput,
    /// An entry or key failed validation.
    Validation,
    /// The referenced key or language is not known.
    NotFound,
    /// The persistence gateway failed.
    Gateway,
}

/// Defines errors that may occur while editing, importing or persisting translations
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Import file text could not be parsed or has the wrong shape
    #[error("Could not read file: {0}")]
    MalformedImport(String),
    /// Import file parsed but contains no string translations
    #[error("Import file contains no translations")]
    EmptyImport,
    /// No file was handed to the import
    #[error("No file to import")]
    NoImportFile,
    /// More than one file was handed to a single import
    #[error("Only single file import is allowed, got {0} files")]
    MultipleImportFiles(usize),
    /// No supported language code occurs in the import file name
    #[error("Could not detect a supported language from file name '{0}'")]
    UnknownImportLanguage(String),
    /// New key is empty or whitespace only
    #[error("Translation key must not be blank")]
    BlankKey,
    /// New key is already used by another entry
    #[error("Translation key '{0}' already exists")]
    DuplicateKey(String),
    /// Entry has no translation in any language
    #[error("No translation provided for key '{0}'")]
    NoContent(String),
    /// No entry with this key exists
    #[error("Unknown translation key '{0}'")]
    UnknownKey(String),
    /// Language is not part of the configured language set
    #[error("Unsupported language '{0}'")]
    UnknownLanguage(String),
    /// A cell edit emptied this entry and its removal is still undecided
    #[error("Removal of '{0}' awaits confirmation")]
    RemovalPending(String),
    /// Confirm or cancel was requested while no removal is pending
    #[error("No removal awaits confirmation")]
    NoPendingRemoval,
    /// Reading or writing the translation artifact failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl DirectoryError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedImport(_)
            | Self::EmptyImport
            | Self::NoImportFile
            | Self::MultipleImportFiles(_)
            | Self::UnknownImportLanguage(_) => ErrorKind::MalformedInput,
            Self::BlankKey | Self::DuplicateKey(_) | Self::NoContent(_) | Self::RemovalPending(_) => {
                ErrorKind::Validation
            }
            Self::UnknownKey(_) | Self::UnknownLanguage(_) | Self::NoPendingRemoval => ErrorKind::NotFound,
            Self::Gateway(_) => ErrorKind::Gateway,
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::multiple_files(DirectoryError::MultipleImportFiles(2), ErrorKind::MalformedInput)]
    #[case::duplicate(DirectoryError::DuplicateKey("k".to_string()), ErrorKind::Validation)]
    #[case::unknown_key(DirectoryError::UnknownKey("k".to_string()), ErrorKind::NotFound)]
    #[case::removal_pending(DirectoryError::RemovalPending("k".to_string()), ErrorKind::Validation)]
    #[case::gateway(
        DirectoryError::Gateway(GatewayError::Unavailable("offline".to_string())),
        ErrorKind::Gateway
    )]
    fn kind_classifies_errors(#[case] error: DirectoryError, #[case] expected: ErrorKind) {
        assert_that!(error.kind(), eq(expected));
    }

    #[rstest]
    fn gateway_error_message_is_transparent() {
        let error = DirectoryError::from(GatewayError::Unavailable("offline".to_string()));

        assert_that!(error.to_string(), contains_substring("offline"));
    }
}
