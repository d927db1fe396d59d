//! Blob store interface
//!
//! A blob store holds one JSON document per key and replaces documents
//! wholesale. Implementations: SQLite ([`Database`](super::Database)) and
//! in-memory ([`MemoryBlobStore`](super::MemoryBlobStore)).

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Raw document access
pub trait BlobStore {
    /// Read the document stored under `key`
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`
    fn put_raw(&mut self, key: &str, body: &str) -> Result<()>;

    /// Apply every staged write, or none of them
    fn commit(&mut self, batch: WriteBatch) -> Result<()>;
}

/// Documents staged for a single atomic commit
#[derive(Debug, Default)]
pub struct WriteBatch {
    writes: Vec<(String, String)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize and stage `value` under `key`. A later put to the same key wins.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let body = serde_json::to_string(value)?;
        self.writes.retain(|(k, _)| k != key);
        self.writes.push((key.to_string(), body));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn into_writes(self) -> Vec<(String, String)> {
        self.writes
    }
}

/// Typed document access on top of [`BlobStore`]
pub trait BlobStoreExt: BlobStore {
    /// Read and decode a document, writing `seed` on first access
    fn load<T>(&mut self, key: &str, seed: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        match self.get_raw(key)? {
            Some(body) => serde_json::from_str(&body).map_err(|source| {
                warn!(key, error = %source, "Stored document is malformed");
                Error::CorruptDocument {
                    key: key.to_string(),
                    source,
                }
            }),
            None => {
                debug!(key, "Seeding document");
                self.save(key, seed)?;
                Ok(seed.clone())
            }
        }
    }

    /// Encode and replace a document
    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let body = serde_json::to_string(value)?;
        self.put_raw(key, &body)
    }
}

impl<S: BlobStore + ?Sized> BlobStoreExt for S {}
