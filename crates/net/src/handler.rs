//! Request dispatch onto the data access layer

use campus_core::{CampusService, Result};
use tracing::debug;

use crate::protocol::{Request, Response};

/// Run one request against the service and build its response.
///
/// Callers must hold exclusive access to `service` for the whole call so
/// the read-modify-write of each operation is not interleaved.
pub fn dispatch(service: &mut CampusService, request: Request) -> Response {
    match execute(service, request) {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "Request failed");
            Response::from_error(&e)
        }
    }
}

fn execute(service: &mut CampusService, request: Request) -> Result<Response> {
    if let Some(actor_id) = request.actor_id() {
        service.require_moderator(actor_id)?;
    }

    let response = match request {
        Request::Ping => Response::Pong,

        Request::Login { email } => Response::LoginResult {
            user: service.login(&email)?,
        },
        Request::ListUsers { .. } => Response::Users {
            users: service.list_users()?,
        },
        Request::SetUserRole { user_id, role, .. } => Response::User {
            user: service.set_user_role(&user_id, role)?,
        },
        Request::SetUserInterests { user_id, interests } => Response::User {
            user: service.set_user_interests(&user_id, interests)?,
        },
        Request::ToggleInterest { user_id, category } => Response::User {
            user: service.toggle_interest(&user_id, category)?,
        },
        Request::UserStats { .. } => Response::UserStats {
            stats: service.user_stats()?,
        },

        Request::ListEvents => Response::Events {
            events: service.list_events()?,
        },
        Request::ApprovedEvents => Response::Events {
            events: service.approved_events()?,
        },
        Request::PendingEvents { .. } => Response::Events {
            events: service.pending_events()?,
        },
        Request::SearchEvents { filter } => Response::Events {
            events: service.search_events(&filter)?,
        },
        Request::CreateEvent { draft, status, .. } => Response::Event {
            event: service.create_event(draft, status)?,
        },
        Request::SetEventStatus {
            event_id, status, ..
        } => Response::Event {
            event: service.set_event_status(&event_id, status)?,
        },
        Request::OrganizerStats { organizer_id, .. } => Response::OrganizerStats {
            stats: service.organizer_stats(&organizer_id)?,
        },

        Request::RegisterUser { user_id, event_id } => Response::Registration {
            registration: service.register_user(&user_id, &event_id)?,
        },
        Request::UnregisterUser { user_id, event_id } => Response::Unregistered {
            removed: service.unregister_user(&user_id, &event_id)?,
        },
        Request::ListAttendees { event_id, .. } => Response::Registrations {
            registrations: service.list_attendees(&event_id)?,
        },
        Request::EventsForUser { user_id } => Response::Events {
            events: service.events_for_user(&user_id)?,
        },
        Request::UpcomingEventsForUser { user_id, today } => Response::Events {
            events: service.upcoming_events_for_user(&user_id, today)?,
        },
        Request::RecommendedEvents { user_id } => Response::Events {
            events: service.recommended_events(&user_id)?,
        },

        Request::ListNotifications { user_id } => Response::Notifications {
            notifications: service.list_notifications(&user_id)?,
        },
        Request::UnreadNotificationCount { user_id } => Response::Count {
            count: service.unread_notification_count(&user_id)?,
        },

        Request::CheckConsistency { .. } => Response::Violations {
            violations: service.check_consistency()?,
        },
    };

    Ok(response)
}
