//! Data models for Campus Connect

mod event;
mod notification;
mod registration;
mod user;

pub use event::*;
pub use notification::*;
pub use registration::*;
pub use user::*;
