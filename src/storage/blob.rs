//! Keyed blob storage
//!
//! The ledger persists two independent text blobs, one per storage key. The
//! file-backed store keeps each blob as `<data_dir>/<key>.json`; the memory
//! store backs tests and embedders that bring their own persistence.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::LedgerError;

use super::file_io::{read_text, write_atomic};

/// Text storage addressed by key
pub trait BlobStore {
    /// Read a blob, `None` when the key has never been written
    fn read(&self, key: &str) -> Result<Option<String>, LedgerError>;

    /// Replace a blob
    fn write(&self, key: &str, contents: &str) -> Result<(), LedgerError>;
}

/// Blob store backed by one JSON file per key
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, LedgerError> {
        read_text(self.path_for(key))
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), LedgerError> {
        write_atomic(self.path_for(key), contents.as_bytes())
    }
}

/// In-memory blob store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, LedgerError> {
        let blobs = self
            .blobs
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), LedgerError> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        blobs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
