//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event category, stored by its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Tech,
    Sports,
    Cultural,
    Academic,
    Social,
}

impl EventCategory {
    pub fn all() -> &'static [EventCategory] {
        &[
            EventCategory::Tech,
            EventCategory::Sports,
            EventCategory::Cultural,
            EventCategory::Academic,
            EventCategory::Social,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EventCategory::Tech => "Tech",
            EventCategory::Sports => "Sports",
            EventCategory::Cultural => "Cultural",
            EventCategory::Academic => "Academic",
            EventCategory::Social => "Social",
        }
    }

    /// Suggested description for a new event of this category
    pub fn description_template(&self, title: &str) -> String {
        match self {
            EventCategory::Tech => format!(
                "Join us for an exciting {title} event! Dive deep into the latest technologies, \
                 network with fellow enthusiasts, and enhance your technical skills. \
                 Perfect for students passionate about innovation."
            ),
            EventCategory::Sports => format!(
                "Get ready for {title}! This thrilling sports event brings together athletes \
                 and fans for an unforgettable experience. Don't miss the action-packed \
                 competition and team spirit!"
            ),
            EventCategory::Cultural => format!(
                "Experience the vibrant {title} celebration! Immerse yourself in art, music, \
                 and cultural diversity. A wonderful opportunity to celebrate our heritage \
                 and creativity together."
            ),
            EventCategory::Academic => format!(
                "Enhance your knowledge at {title}. This academic event features expert \
                 speakers, interactive workshops, and valuable learning opportunities for \
                 all students."
            ),
            EventCategory::Social => format!(
                "Come together for {title}! A fantastic social gathering to meet new people, \
                 have fun, and create lasting memories with your campus community."
            ),
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Moderation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    /// Only approved events are listed publicly
    pub fn is_public(&self) -> bool {
        matches!(self, EventStatus::Approved)
    }
}

/// A campus event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub organizer_id: String,
    pub organizer_name: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Local start time, `HH:MM`
    pub time: String,
    pub location: String,
    pub category: EventCategory,
    pub capacity: u32,
    /// Mutated only by registration and unregistration
    pub registered_count: u32,
    pub status: EventStatus,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn from_draft(id: String, draft: EventDraft, status: EventStatus) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            organizer_id: draft.organizer_id,
            organizer_name: draft.organizer_name,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            category: draft.category,
            capacity: draft.capacity,
            registered_count: 0,
            status,
            image_url: draft.image_url,
            created_at: Utc::now(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.seats_left() == 0
    }

    pub fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.registered_count)
    }

    /// Case-insensitive substring match over title and description
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Organizer-submitted fields for a new event.
///
/// Id, counters and timestamps are assigned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub organizer_id: String,
    pub organizer_name: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    pub category: EventCategory,
    pub capacity: u32,
    #[serde(default)]
    pub image_url: String,
}

/// Listing filter used by the events page and admin views
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub status: Option<EventStatus>,
}

impl EventFilter {
    pub fn approved() -> Self {
        Self {
            status: Some(EventStatus::Approved),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(status) = self.status {
            if event.status != status {
                return false;
            }
        }

        if let Some(category) = self.category {
            if event.category != category {
                return false;
            }
        }

        match self.query.as_deref() {
            Some(query) if !query.is_empty() => event.matches_text(query),
            _ => true,
        }
    }
}
