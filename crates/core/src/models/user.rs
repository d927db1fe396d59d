//! User model

use serde::{Deserialize, Serialize};

use super::EventCategory;

/// Account role. Serialized as the uppercase strings the stored documents use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Student,
    Admin,
}

impl UserRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Student => "Student",
            UserRole::Admin => "Admin",
        }
    }

    /// Admins moderate events and manage roles
    pub fn can_moderate(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A campus user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Login key. Assumed unique, not enforced.
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub registered_events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<EventCategory>>,
    pub joined_at: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        joined_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            registered_events: Vec::new(),
            interests: None,
            joined_at: joined_at.into(),
        }
    }

    pub fn with_interests(mut self, interests: Vec<EventCategory>) -> Self {
        self.interests = Some(interests);
        self
    }

    pub fn is_registered_for(&self, event_id: &str) -> bool {
        self.registered_events.iter().any(|id| id == event_id)
    }

    pub fn is_interested_in(&self, category: EventCategory) -> bool {
        self.interests
            .as_ref()
            .is_some_and(|interests| interests.contains(&category))
    }
}
