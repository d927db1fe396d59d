//! Document table operations

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::instrument;

use crate::error::Result;

pub struct DocumentStore<'a> {
    conn: &'a Connection,
}

impl<'a> DocumentStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read a document body by key
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(body)
    }

    /// Insert or replace a document
    #[instrument(skip(self, body), fields(len = body.len()))]
    pub fn put(&self, key: &str, body: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO documents (key, body, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET body = ?2, updated_at = ?3",
            params![key, body, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
