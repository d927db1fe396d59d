//! Cross-collection consistency checks
//!
//! [`audit`] reports every place where users, events and registrations
//! disagree. The `assert_*` helpers are debug assertions for states the
//! service must never produce; they compile out in release builds.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{Event, Registration, User};

/// One disagreement between collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Registration references a user or event that does not exist
    OrphanedRegistration {
        registration_id: String,
        user_id: String,
        event_id: String,
    },
    /// Registration exists but the user's `registered_events` lacks the event
    MissingUserLink { user_id: String, event_id: String },
    /// User lists an event with no matching registration
    DanglingUserLink { user_id: String, event_id: String },
    /// More than one registration for the same pair
    DuplicateRegistration { user_id: String, event_id: String },
    /// Counter is lower than the number of registration records
    CountBelowRegistrations {
        event_id: String,
        registered_count: u32,
        registrations: u32,
    },
    OverCapacity {
        event_id: String,
        registered_count: u32,
        capacity: u32,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::OrphanedRegistration {
                registration_id,
                user_id,
                event_id,
            } => write!(
                f,
                "registration {registration_id} points at missing user {user_id} or event {event_id}"
            ),
            Violation::MissingUserLink { user_id, event_id } => {
                write!(f, "user {user_id} is registered for {event_id} but does not list it")
            }
            Violation::DanglingUserLink { user_id, event_id } => {
                write!(f, "user {user_id} lists {event_id} without a registration")
            }
            Violation::DuplicateRegistration { user_id, event_id } => {
                write!(f, "user {user_id} holds several registrations for {event_id}")
            }
            Violation::CountBelowRegistrations {
                event_id,
                registered_count,
                registrations,
            } => write!(
                f,
                "event {event_id} counts {registered_count} but has {registrations} registrations"
            ),
            Violation::OverCapacity {
                event_id,
                registered_count,
                capacity,
            } => write!(
                f,
                "event {event_id} has {registered_count} registered over capacity {capacity}"
            ),
        }
    }
}

/// Compare the three collections and list every inconsistency.
///
/// Seeded counters may exceed the registration records (attendees that
/// predate the records), so only counters *below* the record count are
/// reported.
pub fn audit(users: &[User], events: &[Event], registrations: &[Registration]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let users_by_id: HashMap<&str, &User> = users.iter().map(|u| (u.id.as_str(), u)).collect();
    let event_ids: HashSet<&str> = events.iter().map(|e| e.id.as_str()).collect();

    let mut seen_pairs: HashSet<(&str, &str)> = HashSet::new();
    let mut per_event: HashMap<&str, u32> = HashMap::new();

    for reg in registrations {
        let pair = (reg.user_id.as_str(), reg.event_id.as_str());
        if !seen_pairs.insert(pair) {
            violations.push(Violation::DuplicateRegistration {
                user_id: reg.user_id.clone(),
                event_id: reg.event_id.clone(),
            });
            continue;
        }

        let user = users_by_id.get(reg.user_id.as_str());
        if user.is_none() || !event_ids.contains(reg.event_id.as_str()) {
            violations.push(Violation::OrphanedRegistration {
                registration_id: reg.id.clone(),
                user_id: reg.user_id.clone(),
                event_id: reg.event_id.clone(),
            });
            continue;
        }

        *per_event.entry(reg.event_id.as_str()).or_default() += 1;

        if let Some(user) = user {
            if !user.is_registered_for(&reg.event_id) {
                violations.push(Violation::MissingUserLink {
                    user_id: reg.user_id.clone(),
                    event_id: reg.event_id.clone(),
                });
            }
        }
    }

    for user in users {
        for event_id in &user.registered_events {
            if !seen_pairs.contains(&(user.id.as_str(), event_id.as_str())) {
                violations.push(Violation::DanglingUserLink {
                    user_id: user.id.clone(),
                    event_id: event_id.clone(),
                });
            }
        }
    }

    for event in events {
        let records = per_event.get(event.id.as_str()).copied().unwrap_or(0);
        if event.registered_count < records {
            violations.push(Violation::CountBelowRegistrations {
                event_id: event.id.clone(),
                registered_count: event.registered_count,
                registrations: records,
            });
        }
        if event.registered_count > event.capacity {
            violations.push(Violation::OverCapacity {
                event_id: event.id.clone(),
                registered_count: event.registered_count,
                capacity: event.capacity,
            });
        }
    }

    violations
}

/// Validate that an event's counter respects its capacity
pub fn assert_event_invariants(event: &Event) {
    debug_assert!(
        event.registered_count <= event.capacity,
        "Event {} has {} registered over capacity {}",
        event.id,
        event.registered_count,
        event.capacity
    );
}

/// Validate that a user's registered events hold no duplicates
pub fn assert_user_invariants(user: &User) {
    let unique: HashSet<&String> = user.registered_events.iter().collect();
    debug_assert!(
        unique.len() == user.registered_events.len(),
        "User {} lists an event more than once",
        user.id
    );
}
