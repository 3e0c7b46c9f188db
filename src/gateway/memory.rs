//! Gateway keeping the document in memory.

use std::sync::atomic::{
    AtomicBool,
    AtomicUsize,
    Ordering,
};

use tokio::sync::Mutex;

use super::{
    GatewayError,
    PersistenceGateway,
};
use crate::types::StorageDocument;

/// Holds the document in memory, with switchable failures for reads and writes.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    /// Stored document; `None` until something is stored
    document: Mutex<Option<StorageDocument>>,
    /// When set, reads fail
    fail_reads: AtomicBool,
    /// When set, writes fail and leave the stored document untouched
    fail_writes: AtomicBool,
    /// Number of successful writes
    writes: AtomicUsize,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(document: StorageDocument) -> Self {
        Self { document: Mutex::new(Some(document)), ..Self::default() }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The stored document, if any.
    pub async fn stored(&self) -> Option<StorageDocument> {
        self.document.lock().await.clone()
    }
}

impl PersistenceGateway for MemoryGateway {
    async fn read(&self) -> Result<StorageDocument, GatewayError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("read refused".to_string()));
        }
        Ok(self.document.lock().await.clone().unwrap_or_default())
    }

    async fn write(&self, document: &StorageDocument) -> Result<(), GatewayError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("write refused".to_string()));
        }
        *self.document.lock().await = Some(document.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
