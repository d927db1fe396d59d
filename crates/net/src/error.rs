//! Network error types

use std::io;

use crate::protocol::ErrorKind;

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Network errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server ran the request and it failed
    #[error("{kind:?}: {message}")]
    Service { kind: ErrorKind, message: String },

    #[error("Unexpected response: expected {expected}")]
    UnexpectedResponse { expected: &'static str },
}

impl Error {
    /// Service error kind, if the server rejected the request
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Service { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
