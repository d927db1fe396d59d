//! Campus Core Library
//!
//! Models, document storage, and the data access layer for Campus Connect.

pub mod config;
pub mod error;
pub mod ids;
pub mod invariants;
pub mod models;
pub mod seed;
pub mod service;
pub mod storage;

pub use config::CampusConfig;
pub use error::{Error, Result};
pub use invariants::Violation;
pub use models::*;
pub use seed::Seed;
pub use service::{CampusService, OrganizerStats, UserStats};
pub use storage::{BlobStore, BlobStoreExt, Database, MemoryBlobStore, WriteBatch};
