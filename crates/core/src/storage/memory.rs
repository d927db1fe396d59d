//! In-memory blob store

use std::collections::HashMap;

use super::traits::{BlobStore, WriteBatch};
use crate::error::Result;

/// Blob store backed by a map. Used for tests and ephemeral runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    documents: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.documents.get(key).cloned())
    }

    fn put_raw(&mut self, key: &str, body: &str) -> Result<()> {
        self.documents.insert(key.to_string(), body.to_string());
        Ok(())
    }

    fn commit(&mut self, batch: WriteBatch) -> Result<()> {
        // Bodies are already serialized, so inserting cannot fail halfway
        for (key, body) in batch.into_writes() {
            self.documents.insert(key, body);
        }
        Ok(())
    }
}
