//! Persistence boundary for the storage document.
//!
//! The core only knows the document's shape. Transports implement
//! [`PersistenceGateway`]; this crate ships a file-backed and an in-memory one.

use std::future::Future;

use thiserror::Error;

use crate::types::StorageDocument;

/// File-backed gateway
mod file;
/// In-memory gateway
mod memory;

pub use file::FileGateway;
pub use memory::MemoryGateway;

/// Defines errors raised while reading or writing the translation artifact
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Error when the artifact cannot be read or written
    #[error("Failed to access translation artifact: {0}")]
    Io(#[from] std::io::Error),
    /// Error when the artifact is not valid JSON of the expected shape
    #[error("Failed to parse translation artifact: {0}")]
    Parse(#[from] serde_json::Error),
    /// Error when the artifact has a shape the gateway cannot update
    #[error("Translation artifact is malformed: {0}")]
    Malformed(String),
    /// Error when the backing store refuses the request
    #[error("Translation store unavailable: {0}")]
    Unavailable(String),
}

/// Reads and writes the whole storage document.
///
/// Writes overwrite the stored document; merging happens before the call.
pub trait PersistenceGateway: Send + Sync {
    /// Fetches the current document. An absent artifact is an empty document.
    fn read(&self) -> impl Future<Output = Result<StorageDocument, GatewayError>> + Send;

    /// Persists `document` as a whole.
    fn write(
        &self,
        document: &StorageDocument,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
