//! Network protocol message types
//!
//! Clients send one [`Request`] per frame and receive exactly one
//! [`Response`] for it, in order. All messages are JSON-serialized and
//! length-prefixed on the wire.

use campus_core::{
    Event, EventCategory, EventDraft, EventFilter, EventStatus, Notification, OrganizerStats,
    Registration, User, UserRole, UserStats, Violation,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Requests, one per data access operation.
///
/// Administrative requests carry the id of the acting user in `actor_id`;
/// the server refuses them unless that user may moderate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    Ping,

    // Users
    Login { email: String },
    ListUsers { actor_id: String },
    SetUserRole {
        actor_id: String,
        user_id: String,
        role: UserRole,
    },
    SetUserInterests {
        user_id: String,
        interests: Vec<EventCategory>,
    },
    ToggleInterest {
        user_id: String,
        category: EventCategory,
    },
    UserStats { actor_id: String },

    // Events
    ListEvents,
    ApprovedEvents,
    PendingEvents { actor_id: String },
    SearchEvents { filter: EventFilter },
    CreateEvent {
        actor_id: String,
        draft: EventDraft,
        status: EventStatus,
    },
    SetEventStatus {
        actor_id: String,
        event_id: String,
        status: EventStatus,
    },
    OrganizerStats {
        actor_id: String,
        organizer_id: String,
    },

    // Registrations
    RegisterUser { user_id: String, event_id: String },
    UnregisterUser { user_id: String, event_id: String },
    ListAttendees { actor_id: String, event_id: String },
    EventsForUser { user_id: String },
    UpcomingEventsForUser { user_id: String, today: NaiveDate },
    RecommendedEvents { user_id: String },

    // Notifications
    ListNotifications { user_id: String },
    UnreadNotificationCount { user_id: String },

    CheckConsistency { actor_id: String },
}

impl Request {
    /// Acting user of an administrative request, `None` for everything else
    pub fn actor_id(&self) -> Option<&str> {
        match self {
            Request::ListUsers { actor_id }
            | Request::SetUserRole { actor_id, .. }
            | Request::UserStats { actor_id }
            | Request::PendingEvents { actor_id }
            | Request::CreateEvent { actor_id, .. }
            | Request::SetEventStatus { actor_id, .. }
            | Request::OrganizerStats { actor_id, .. }
            | Request::ListAttendees { actor_id, .. }
            | Request::CheckConsistency { actor_id } => Some(actor_id),
            _ => None,
        }
    }
}

/// Failure categories a client can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    DuplicateRegistration,
    CapacityExceeded,
    InvalidOperation,
    Forbidden,
    Storage,
    Internal,
}

impl From<&campus_core::Error> for ErrorKind {
    fn from(err: &campus_core::Error) -> Self {
        use campus_core::Error as E;
        match err {
            E::NotFound(_) => ErrorKind::NotFound,
            E::DuplicateRegistration { .. } => ErrorKind::DuplicateRegistration,
            E::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            E::InvalidOperation(_) => ErrorKind::InvalidOperation,
            E::Forbidden(_) => ErrorKind::Forbidden,
            e if e.is_storage() => ErrorKind::Storage,
            _ => ErrorKind::Internal,
        }
    }
}

/// Responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Pong,
    /// Login result; `None` when no user has that email
    LoginResult { user: Option<User> },
    User { user: User },
    Users { users: Vec<User> },
    Event { event: Event },
    Events { events: Vec<Event> },
    Registration { registration: Registration },
    Registrations { registrations: Vec<Registration> },
    /// Whether a registration was actually removed
    Unregistered { removed: bool },
    Notifications { notifications: Vec<Notification> },
    Count { count: u32 },
    OrganizerStats { stats: OrganizerStats },
    UserStats { stats: UserStats },
    Violations { violations: Vec<Violation> },
    Error { kind: ErrorKind, message: String },
}

impl Response {
    pub fn from_error(err: &campus_core::Error) -> Self {
        Response::Error {
            kind: err.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req = Request::SetUserRole {
            actor_id: "1".into(),
            user_id: "3".into(),
            role: UserRole::Admin,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "SetUserRole");
        assert_eq!(json["actor_id"], "1");
        assert_eq!(json["role"], "ADMIN");

        let req: Request = serde_json::from_str(r#"{"type":"ListEvents"}"#).unwrap();
        assert!(matches!(req, Request::ListEvents));
    }

    #[test]
    fn test_actor_only_on_admin_requests() {
        let req = Request::CheckConsistency {
            actor_id: "1".into(),
        };
        assert_eq!(req.actor_id(), Some("1"));

        let req = Request::RegisterUser {
            user_id: "3".into(),
            event_id: "e1".into(),
        };
        assert_eq!(req.actor_id(), None);
        assert_eq!(Request::ApprovedEvents.actor_id(), None);
    }

    #[test]
    fn test_error_kind_mapping() {
        let err = campus_core::Error::CapacityExceeded {
            event_id: "e4".into(),
            capacity: 40,
        };
        match Response::from_error(&err) {
            Response::Error { kind, message } => {
                assert_eq!(kind, ErrorKind::CapacityExceeded);
                assert!(message.contains("e4"));
            }
            other => panic!("Wrong response: {other:?}"),
        }

        let io = campus_core::Error::Io(std::io::Error::other("disk"));
        assert_eq!(ErrorKind::from(&io), ErrorKind::Storage);
        let denied = campus_core::Error::Forbidden("user 3".into());
        assert_eq!(ErrorKind::from(&denied), ErrorKind::Forbidden);
        let cfg = campus_core::Error::Config("bad".into());
        assert_eq!(ErrorKind::from(&cfg), ErrorKind::Internal);
    }
}
