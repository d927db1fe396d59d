//! TCP client for a campus server
//!
//! Requests are sent one at a time; each call waits for its response.
//! Administrative helpers take the acting user's id as their first argument.

use std::net::SocketAddr;

use campus_core::{
    Event, EventCategory, EventDraft, EventFilter, EventStatus, Notification, OrganizerStats,
    Registration, User, UserRole, UserStats, Violation,
};
use chrono::NaiveDate;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::frame::{read_frame, write_frame};
use crate::protocol::{Request, Response};

/// Client handle
pub struct Client {
    stream: TcpStream,
    addr: SocketAddr,
}

impl Client {
    /// Connect to a campus server
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        info!(addr = %addr, "Connecting to server");
        let stream = TcpStream::connect(addr).await?;
        Ok(Client { stream, addr })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Send a request and wait for its response.
    ///
    /// Service failures are returned as [`Error::Service`].
    pub async fn request(&mut self, request: &Request) -> Result<Response> {
        write_frame(&mut self.stream, request).await?;
        let response: Response = read_frame(&mut self.stream).await?;
        debug!(?response, "Response received");

        match response {
            Response::Error { kind, message } => Err(Error::Service { kind, message }),
            other => Ok(other),
        }
    }

    pub async fn ping(&mut self) -> Result<()> {
        match self.request(&Request::Ping).await? {
            Response::Pong => Ok(()),
            _ => Err(Error::UnexpectedResponse { expected: "Pong" }),
        }
    }

    // Users

    pub async fn login(&mut self, email: &str) -> Result<Option<User>> {
        let request = Request::Login {
            email: email.to_string(),
        };
        match self.request(&request).await? {
            Response::LoginResult { user } => Ok(user),
            _ => Err(Error::UnexpectedResponse {
                expected: "LoginResult",
            }),
        }
    }

    pub async fn list_users(&mut self, actor_id: &str) -> Result<Vec<User>> {
        self.users(&Request::ListUsers {
            actor_id: actor_id.to_string(),
        })
        .await
    }

    pub async fn set_user_role(
        &mut self,
        actor_id: &str,
        user_id: &str,
        role: UserRole,
    ) -> Result<User> {
        self.user(&Request::SetUserRole {
            actor_id: actor_id.to_string(),
            user_id: user_id.to_string(),
            role,
        })
        .await
    }

    pub async fn set_user_interests(
        &mut self,
        user_id: &str,
        interests: Vec<EventCategory>,
    ) -> Result<User> {
        self.user(&Request::SetUserInterests {
            user_id: user_id.to_string(),
            interests,
        })
        .await
    }

    pub async fn toggle_interest(&mut self, user_id: &str, category: EventCategory) -> Result<User> {
        self.user(&Request::ToggleInterest {
            user_id: user_id.to_string(),
            category,
        })
        .await
    }

    pub async fn user_stats(&mut self, actor_id: &str) -> Result<UserStats> {
        let request = Request::UserStats {
            actor_id: actor_id.to_string(),
        };
        match self.request(&request).await? {
            Response::UserStats { stats } => Ok(stats),
            _ => Err(Error::UnexpectedResponse {
                expected: "UserStats",
            }),
        }
    }

    // Events

    pub async fn list_events(&mut self) -> Result<Vec<Event>> {
        self.events(&Request::ListEvents).await
    }

    pub async fn approved_events(&mut self) -> Result<Vec<Event>> {
        self.events(&Request::ApprovedEvents).await
    }

    pub async fn pending_events(&mut self, actor_id: &str) -> Result<Vec<Event>> {
        self.events(&Request::PendingEvents {
            actor_id: actor_id.to_string(),
        })
        .await
    }

    pub async fn search_events(&mut self, filter: EventFilter) -> Result<Vec<Event>> {
        self.events(&Request::SearchEvents { filter }).await
    }

    pub async fn create_event(
        &mut self,
        actor_id: &str,
        draft: EventDraft,
        status: EventStatus,
    ) -> Result<Event> {
        self.event(&Request::CreateEvent {
            actor_id: actor_id.to_string(),
            draft,
            status,
        })
        .await
    }

    pub async fn set_event_status(
        &mut self,
        actor_id: &str,
        event_id: &str,
        status: EventStatus,
    ) -> Result<Event> {
        self.event(&Request::SetEventStatus {
            actor_id: actor_id.to_string(),
            event_id: event_id.to_string(),
            status,
        })
        .await
    }

    pub async fn organizer_stats(
        &mut self,
        actor_id: &str,
        organizer_id: &str,
    ) -> Result<OrganizerStats> {
        let request = Request::OrganizerStats {
            actor_id: actor_id.to_string(),
            organizer_id: organizer_id.to_string(),
        };
        match self.request(&request).await? {
            Response::OrganizerStats { stats } => Ok(stats),
            _ => Err(Error::UnexpectedResponse {
                expected: "OrganizerStats",
            }),
        }
    }

    // Registrations

    pub async fn register_user(&mut self, user_id: &str, event_id: &str) -> Result<Registration> {
        let request = Request::RegisterUser {
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
        };
        match self.request(&request).await? {
            Response::Registration { registration } => Ok(registration),
            _ => Err(Error::UnexpectedResponse {
                expected: "Registration",
            }),
        }
    }

    pub async fn unregister_user(&mut self, user_id: &str, event_id: &str) -> Result<bool> {
        let request = Request::UnregisterUser {
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
        };
        match self.request(&request).await? {
            Response::Unregistered { removed } => Ok(removed),
            _ => Err(Error::UnexpectedResponse {
                expected: "Unregistered",
            }),
        }
    }

    pub async fn list_attendees(
        &mut self,
        actor_id: &str,
        event_id: &str,
    ) -> Result<Vec<Registration>> {
        let request = Request::ListAttendees {
            actor_id: actor_id.to_string(),
            event_id: event_id.to_string(),
        };
        match self.request(&request).await? {
            Response::Registrations { registrations } => Ok(registrations),
            _ => Err(Error::UnexpectedResponse {
                expected: "Registrations",
            }),
        }
    }

    pub async fn events_for_user(&mut self, user_id: &str) -> Result<Vec<Event>> {
        self.events(&Request::EventsForUser {
            user_id: user_id.to_string(),
        })
        .await
    }

    pub async fn upcoming_events_for_user(
        &mut self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<Event>> {
        self.events(&Request::UpcomingEventsForUser {
            user_id: user_id.to_string(),
            today,
        })
        .await
    }

    pub async fn recommended_events(&mut self, user_id: &str) -> Result<Vec<Event>> {
        self.events(&Request::RecommendedEvents {
            user_id: user_id.to_string(),
        })
        .await
    }

    // Notifications

    pub async fn list_notifications(&mut self, user_id: &str) -> Result<Vec<Notification>> {
        let request = Request::ListNotifications {
            user_id: user_id.to_string(),
        };
        match self.request(&request).await? {
            Response::Notifications { notifications } => Ok(notifications),
            _ => Err(Error::UnexpectedResponse {
                expected: "Notifications",
            }),
        }
    }

    pub async fn unread_notification_count(&mut self, user_id: &str) -> Result<u32> {
        let request = Request::UnreadNotificationCount {
            user_id: user_id.to_string(),
        };
        match self.request(&request).await? {
            Response::Count { count } => Ok(count),
            _ => Err(Error::UnexpectedResponse { expected: "Count" }),
        }
    }

    pub async fn check_consistency(&mut self, actor_id: &str) -> Result<Vec<Violation>> {
        let request = Request::CheckConsistency {
            actor_id: actor_id.to_string(),
        };
        match self.request(&request).await? {
            Response::Violations { violations } => Ok(violations),
            _ => Err(Error::UnexpectedResponse {
                expected: "Violations",
            }),
        }
    }

    async fn user(&mut self, request: &Request) -> Result<User> {
        match self.request(request).await? {
            Response::User { user } => Ok(user),
            _ => Err(Error::UnexpectedResponse { expected: "User" }),
        }
    }

    async fn users(&mut self, request: &Request) -> Result<Vec<User>> {
        match self.request(request).await? {
            Response::Users { users } => Ok(users),
            _ => Err(Error::UnexpectedResponse { expected: "Users" }),
        }
    }

    async fn event(&mut self, request: &Request) -> Result<Event> {
        match self.request(request).await? {
            Response::Event { event } => Ok(event),
            _ => Err(Error::UnexpectedResponse { expected: "Event" }),
        }
    }

    async fn events(&mut self, request: &Request) -> Result<Vec<Event>> {
        match self.request(request).await? {
            Response::Events { events } => Ok(events),
            _ => Err(Error::UnexpectedResponse { expected: "Events" }),
        }
    }
}
