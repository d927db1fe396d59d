//! Document storage for Campus Connect
//!
//! Every collection is one JSON document under a fixed key. Documents are
//! read and replaced whole; multi-document updates go through a
//! [`WriteBatch`] so they land together.

mod documents;
mod memory;
mod migrations;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::Result;

pub use documents::DocumentStore;
pub use memory::MemoryBlobStore;
pub use traits::{BlobStore, BlobStoreExt, WriteBatch};

/// Store key for the users collection
pub const USERS_KEY: &str = "cc_users";
/// Store key for the events collection
pub const EVENTS_KEY: &str = "cc_events";
/// Store key for the registrations collection
pub const REGISTRATIONS_KEY: &str = "cc_registrations";
/// Store key for the notifications collection
pub const NOTIFICATIONS_KEY: &str = "cc_notifications";

/// SQLite-backed blob store
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        debug!(version = self.schema_version()?, "Schema ready");
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<u32> {
        migrations::current_version(&self.conn)
    }

    /// Get document store
    pub fn documents(&self) -> DocumentStore<'_> {
        DocumentStore::new(&self.conn)
    }
}

impl BlobStore for Database {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.documents().get(key)
    }

    fn put_raw(&mut self, key: &str, body: &str) -> Result<()> {
        self.documents().put(key, body)
    }

    #[instrument(skip(self, batch), fields(documents = batch.len()))]
    fn commit(&mut self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        {
            let docs = DocumentStore::new(&tx);
            for (key, body) in batch.into_writes() {
                docs.put(&key, &body)?;
            }
        }
        tx.commit()?;
        debug!("Batch committed");
        Ok(())
    }
}
