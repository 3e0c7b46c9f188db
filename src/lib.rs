//! translation-directory
//!
//! Per-tenant translation overrides: a language → key → text document edited
//! as a list of per-key entries, with single-language JSON import and
//! pluggable persistence.

pub mod config;
pub mod directory;
pub mod error;
pub mod flatten;
pub mod gateway;
pub mod import;
pub mod normalize;
pub mod store;
pub mod transform;
pub mod types;

mod test_utils;

pub use directory::{
    CellSave,
    PendingRemoval,
    ReloadOutcome,
    TranslationDirectory,
};
pub use error::DirectoryError;
