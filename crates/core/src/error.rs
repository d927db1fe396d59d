//! Error types for Campus Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User {user_id} is already registered for event {event_id}")]
    DuplicateRegistration { user_id: String, event_id: String },

    #[error("Event {event_id} is full (capacity {capacity})")]
    CapacityExceeded { event_id: String, capacity: u32 },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Corrupt document '{key}': {source}")]
    CorruptDocument {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error came from the persistence layer rather than the caller's input
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::CorruptDocument { .. } | Error::Database(_) | Error::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
