//! Initial collection contents
//!
//! A [`Seed`] is written to the store the first time each collection is
//! read. It is injected into the service rather than held globally.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Event, EventCategory, EventStatus, Notification, Registration, User, UserRole,
};

const SEED_IMAGES: [&str; 5] = [
    "https://picsum.photos/seed/campus-tech/800/450",
    "https://picsum.photos/seed/campus-sports/800/450",
    "https://picsum.photos/seed/campus-arts/800/450",
    "https://picsum.photos/seed/campus-lab/800/450",
    "https://picsum.photos/seed/campus-social/800/450",
];

/// Default contents for the four collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub registrations: Vec<Registration>,
    pub notifications: Vec<Notification>,
}

impl Seed {
    /// All collections start empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Demo campus: two users, seven events, three registrations, two notifications
    pub fn demo() -> Self {
        Self {
            users: demo_users(),
            events: demo_events(),
            registrations: demo_registrations(),
            notifications: demo_notifications(),
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|n| n.and_utc())
        .unwrap_or_default()
}

fn demo_users() -> Vec<User> {
    let admin = User::new("1", "Admin Sarah", "admin@campus.edu", UserRole::Admin, "2023-01-15");

    let mut student = User::new(
        "3",
        "Alex Student",
        "student@campus.edu",
        UserRole::Student,
        "2024-02-20",
    )
    .with_interests(vec![EventCategory::Tech, EventCategory::Social]);
    student.registered_events = vec!["e1".into(), "e3".into(), "e5".into()];

    vec![admin, student]
}

#[allow(clippy::too_many_arguments)]
fn demo_event(
    id: &str,
    title: &str,
    description: &str,
    organizer_name: &str,
    date: &str,
    time: &str,
    location: &str,
    category: EventCategory,
    capacity: u32,
    registered_count: u32,
    status: EventStatus,
    image: usize,
    created_at: DateTime<Utc>,
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        organizer_id: "1".to_string(),
        organizer_name: organizer_name.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        category,
        capacity,
        registered_count,
        status,
        image_url: SEED_IMAGES[image % SEED_IMAGES.len()].to_string(),
        created_at,
    }
}

fn demo_events() -> Vec<Event> {
    vec![
        demo_event(
            "e1",
            "Tech Innovation Summit 2024",
            "Join industry professionals and engineers for a deep dive into emerging \
             technologies and software development. Networking and refreshments provided.",
            "Admin Sarah",
            "2024-12-05",
            "10:00",
            "Science Hub Room 402",
            EventCategory::Tech,
            120,
            85,
            EventStatus::Approved,
            0,
            at(2024, 10, 1, 9, 0),
        ),
        demo_event(
            "e2",
            "Inter-College Basketball Finals",
            "The ultimate showdown between the Faculty of Arts and the Faculty of \
             Engineering. Come support your team!",
            "Admin Sarah",
            "2024-11-28",
            "17:30",
            "Campus Arena",
            EventCategory::Sports,
            500,
            412,
            EventStatus::Approved,
            1,
            at(2024, 10, 5, 14, 30),
        ),
        demo_event(
            "e3",
            "Symphony of Colors: Art Exhibition",
            "A curated showcase of student art ranging from digital illustrations to \
             classical oil paintings.",
            "Arts Department",
            "2024-12-12",
            "11:00",
            "Main Gallery Hall",
            EventCategory::Cultural,
            200,
            120,
            EventStatus::Approved,
            2,
            at(2024, 10, 10, 11, 0),
        ),
        demo_event(
            "e4",
            "Data Science Bootcamp",
            "A weekend intensive workshop covering Python, Pandas, and Scikit-Learn for \
             beginners.",
            "Admin Sarah",
            "2024-11-20",
            "09:00",
            "Lab 12B",
            EventCategory::Academic,
            40,
            40,
            EventStatus::Approved,
            3,
            at(2024, 10, 12, 8, 0),
        ),
        demo_event(
            "e5",
            "Winter Social & Networking",
            "End the semester with music, food, and networking with alumni and industry \
             partners.",
            "Campus Life Office",
            "2024-12-20",
            "19:00",
            "Student Union Lounge",
            EventCategory::Social,
            300,
            155,
            EventStatus::Approved,
            4,
            at(2024, 10, 15, 16, 0),
        ),
        demo_event(
            "e6",
            "Crypto & Web3 Workshop",
            "Learn the fundamentals of blockchain technology and smart contract development.",
            "Admin Sarah",
            "2024-12-01",
            "14:00",
            "Seminar Hall 2",
            EventCategory::Tech,
            60,
            0,
            EventStatus::Pending,
            0,
            at(2024, 10, 25, 10, 0),
        ),
        demo_event(
            "e7",
            "Chess Championship 2024",
            "Annual rapid chess tournament open to all skill levels. Trophies for top 3!",
            "Admin Sarah",
            "2024-11-15",
            "10:00",
            "Library Wing A",
            EventCategory::Sports,
            32,
            10,
            EventStatus::Draft,
            1,
            at(2024, 10, 28, 12, 0),
        ),
    ]
}

fn demo_registration(id: &str, event_id: &str, registered_at: DateTime<Utc>) -> Registration {
    Registration {
        id: id.to_string(),
        user_id: "3".to_string(),
        event_id: event_id.to_string(),
        registered_at,
        user_name: "Alex Student".to_string(),
        user_email: "student@campus.edu".to_string(),
    }
}

fn demo_registrations() -> Vec<Registration> {
    vec![
        demo_registration("r1", "e1", at(2024, 10, 2, 10, 0)),
        demo_registration("r2", "e3", at(2024, 10, 11, 14, 20)),
        demo_registration("r3", "e5", at(2024, 10, 16, 11, 0)),
    ]
}

fn demo_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "n1".to_string(),
            user_id: "3".to_string(),
            title: "Registration Confirmed".to_string(),
            message: "You are now registered for the Tech Innovation Summit!".to_string(),
            is_read: false,
            created_at: at(2024, 10, 2, 10, 0),
        },
        Notification {
            id: "n2".to_string(),
            user_id: "3".to_string(),
            title: "New Event Recommendation".to_string(),
            message: "A new Tech event \"Crypto Workshop\" was just added.".to_string(),
            is_read: true,
            created_at: at(2024, 10, 26, 9, 0),
        },
    ]
}
