//! Registration join record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// A user's seat at an event.
///
/// `user_name` and `user_email` are copied from the user when the record is
/// created and are not kept in sync afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub registered_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

impl Registration {
    pub fn new(user: &User, event_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            user_id: user.id.clone(),
            event_id: event_id.into(),
            registered_at: Utc::now(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
        }
    }

    pub fn matches(&self, user_id: &str, event_id: &str) -> bool {
        self.user_id == user_id && self.event_id == event_id
    }
}
