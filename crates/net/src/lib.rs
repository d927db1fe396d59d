//! Campus Network Library
//!
//! Exposes the campus data access layer over TCP.
//!
//! # Architecture
//!
//! - **Server**: owns the `CampusService` behind one lock and serves clients
//! - **Client**: sends requests and waits for the matching response
//! - **Protocol**: Length-prefixed JSON messages, one response per request
//!
//! # Usage
//!
//! ```ignore
//! let service = CampusConfig::load()?.open_service()?;
//! let server = Server::start("127.0.0.1:7341".parse()?, service).await?;
//!
//! let mut client = Client::connect(server.addr()).await?;
//! let user = client.login("student@campus.edu").await?;
//! client.register_user("3", "e2").await?;
//! ```

pub mod client;
pub mod error;
mod frame;
pub mod handler;
pub mod protocol;
pub mod server;

pub use client::Client;
pub use error::{Error, Result};
pub use protocol::{ErrorKind, Request, Response};
pub use server::Server;

/// Default port for campus servers
pub const DEFAULT_PORT: u16 = 7341;
