//! Data access layer
//!
//! [`CampusService`] is the only component that touches the store. Each
//! operation reads the collections it needs, computes their new value and
//! writes them back. Operations that change several collections stage all
//! documents in one [`WriteBatch`] and commit them together, so users,
//! events and registrations never disagree after a call returns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, Result};
use crate::ids;
use crate::invariants::{self, Violation};
use crate::models::{
    Event, EventCategory, EventDraft, EventFilter, EventStatus, Notification, Registration, User,
    UserRole,
};
use crate::seed::Seed;
use crate::storage::{
    BlobStore, BlobStoreExt, WriteBatch, EVENTS_KEY, NOTIFICATIONS_KEY, REGISTRATIONS_KEY,
    USERS_KEY,
};

/// Event counts for one organizer, as shown on the admin overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerStats {
    pub total: u32,
    pub live: u32,
    pub pending: u32,
    pub drafts: u32,
}

/// User counts for the admin user table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total: u32,
    pub admins: u32,
}

/// Campus data access service
pub struct CampusService {
    store: Box<dyn BlobStore + Send>,
    seed: Seed,
}

impl CampusService {
    pub fn new<S>(store: S, seed: Seed) -> Self
    where
        S: BlobStore + Send + 'static,
    {
        Self {
            store: Box::new(store),
            seed,
        }
    }

    // Collection access

    fn users(&mut self) -> Result<Vec<User>> {
        self.store.load(USERS_KEY, &self.seed.users)
    }

    fn events(&mut self) -> Result<Vec<Event>> {
        self.store.load(EVENTS_KEY, &self.seed.events)
    }

    fn registrations(&mut self) -> Result<Vec<Registration>> {
        self.store.load(REGISTRATIONS_KEY, &self.seed.registrations)
    }

    fn notifications(&mut self) -> Result<Vec<Notification>> {
        self.store.load(NOTIFICATIONS_KEY, &self.seed.notifications)
    }

    fn user(&mut self, user_id: &str) -> Result<User> {
        self.users()?
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))
    }

    /// Resolve the acting user and require a moderating role
    #[instrument(skip(self))]
    pub fn require_moderator(&mut self, actor_id: &str) -> Result<User> {
        let actor = self
            .users()?
            .into_iter()
            .find(|u| u.id == actor_id)
            .ok_or_else(|| Error::Forbidden(format!("unknown user {actor_id}")))?;
        if !actor.role.can_moderate() {
            warn!(role = %actor.role, "Moderator operation refused");
            return Err(Error::Forbidden(format!(
                "user {actor_id} is not an administrator"
            )));
        }
        Ok(actor)
    }

    // Users

    /// Find the user with this exact email. `Ok(None)` when nobody matches.
    #[instrument(skip(self))]
    pub fn login(&mut self, email: &str) -> Result<Option<User>> {
        let user = self.users()?.into_iter().find(|u| u.email == email);
        match &user {
            Some(u) => info!(user_id = %u.id, "Login succeeded"),
            None => debug!("No user with this email"),
        }
        Ok(user)
    }

    /// All users in insertion order
    pub fn list_users(&mut self) -> Result<Vec<User>> {
        self.users()
    }

    #[instrument(skip(self))]
    pub fn set_user_role(&mut self, user_id: &str, role: UserRole) -> Result<User> {
        self.update_user(user_id, |user| user.role = role)
    }

    /// Replace the user's interests. Duplicates are dropped, first occurrence kept.
    #[instrument(skip(self))]
    pub fn set_user_interests(
        &mut self,
        user_id: &str,
        interests: Vec<EventCategory>,
    ) -> Result<User> {
        let mut unique = Vec::with_capacity(interests.len());
        for category in interests {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        self.update_user(user_id, |user| user.interests = Some(unique))
    }

    /// Add the category if absent, remove it if present
    #[instrument(skip(self))]
    pub fn toggle_interest(&mut self, user_id: &str, category: EventCategory) -> Result<User> {
        self.update_user(user_id, |user| {
            let interests = user.interests.get_or_insert_with(Vec::new);
            if let Some(pos) = interests.iter().position(|c| *c == category) {
                interests.remove(pos);
            } else {
                interests.push(category);
            }
        })
    }

    pub fn user_stats(&mut self) -> Result<UserStats> {
        let users = self.users()?;
        Ok(UserStats {
            total: users.len() as u32,
            admins: users.iter().filter(|u| u.role == UserRole::Admin).count() as u32,
        })
    }

    fn update_user<F>(&mut self, user_id: &str, apply: F) -> Result<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;
        apply(user);
        let updated = user.clone();

        self.store.save(USERS_KEY, &users)?;
        info!(user_id, "User updated");
        Ok(updated)
    }

    // Events

    /// All events in insertion order
    pub fn list_events(&mut self) -> Result<Vec<Event>> {
        self.events()
    }

    /// Events visible on the public listing
    pub fn approved_events(&mut self) -> Result<Vec<Event>> {
        self.search_events(&EventFilter::approved())
    }

    /// Moderation queue
    pub fn pending_events(&mut self) -> Result<Vec<Event>> {
        self.search_events(&EventFilter {
            status: Some(EventStatus::Pending),
            ..EventFilter::default()
        })
    }

    pub fn search_events(&mut self, filter: &EventFilter) -> Result<Vec<Event>> {
        Ok(self
            .events()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect())
    }

    /// Append a new event with a fresh id and zero registrations
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create_event(&mut self, draft: EventDraft, status: EventStatus) -> Result<Event> {
        if draft.title.trim().is_empty() {
            return Err(Error::InvalidOperation("event title is required".into()));
        }
        if draft.date.trim().is_empty() {
            return Err(Error::InvalidOperation("event date is required".into()));
        }

        let mut events = self.events()?;
        let id = ids::fresh_event_id(|candidate| events.iter().any(|e| e.id == candidate));
        let event = Event::from_draft(id, draft, status);
        events.push(event.clone());

        self.store.save(EVENTS_KEY, &events)?;
        info!(event_id = %event.id, ?status, "Event created");
        Ok(event)
    }

    #[instrument(skip(self))]
    pub fn set_event_status(&mut self, event_id: &str, status: EventStatus) -> Result<Event> {
        let mut events = self.events()?;
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| Error::NotFound(format!("event {event_id}")))?;
        event.status = status;
        let updated = event.clone();

        self.store.save(EVENTS_KEY, &events)?;
        info!(event_id, ?status, "Event status changed");
        Ok(updated)
    }

    pub fn organizer_stats(&mut self, organizer_id: &str) -> Result<OrganizerStats> {
        let mut stats = OrganizerStats::default();
        for event in self.events()?.iter().filter(|e| e.organizer_id == organizer_id) {
            stats.total += 1;
            match event.status {
                EventStatus::Approved => stats.live += 1,
                EventStatus::Pending => stats.pending += 1,
                EventStatus::Draft => stats.drafts += 1,
                EventStatus::Rejected => {}
            }
        }
        Ok(stats)
    }

    // Registrations

    /// Register a user for an event.
    ///
    /// Fails with `NotFound` for an unknown user or event,
    /// `DuplicateRegistration` if the pair exists and `CapacityExceeded`
    /// when no seat is left. On failure nothing is written.
    #[instrument(skip(self))]
    pub fn register_user(&mut self, user_id: &str, event_id: &str) -> Result<Registration> {
        let mut users = self.users()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;

        let mut registrations = self.registrations()?;
        if registrations.iter().any(|r| r.matches(user_id, event_id)) {
            warn!("Duplicate registration rejected");
            return Err(Error::DuplicateRegistration {
                user_id: user_id.to_string(),
                event_id: event_id.to_string(),
            });
        }

        let mut events = self.events()?;
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| Error::NotFound(format!("event {event_id}")))?;

        if event.is_full() {
            warn!(capacity = event.capacity, "Registration rejected, event full");
            return Err(Error::CapacityExceeded {
                event_id: event_id.to_string(),
                capacity: event.capacity,
            });
        }

        let registration = Registration::new(user, event_id);
        registrations.push(registration.clone());
        event.registered_count += 1;
        if !user.is_registered_for(event_id) {
            user.registered_events.push(event_id.to_string());
        }

        invariants::assert_event_invariants(event);
        invariants::assert_user_invariants(user);

        let mut batch = WriteBatch::new();
        batch.put(REGISTRATIONS_KEY, &registrations)?;
        batch.put(EVENTS_KEY, &events)?;
        batch.put(USERS_KEY, &users)?;
        self.store.commit(batch)?;

        info!(registration_id = %registration.id, "User registered");
        Ok(registration)
    }

    /// Remove a registration. Returns `false` and writes nothing if the
    /// pair was not registered.
    #[instrument(skip(self))]
    pub fn unregister_user(&mut self, user_id: &str, event_id: &str) -> Result<bool> {
        let mut registrations = self.registrations()?;
        let before = registrations.len();
        registrations.retain(|r| !r.matches(user_id, event_id));
        if registrations.len() == before {
            debug!("No registration to remove");
            return Ok(false);
        }

        let mut events = self.events()?;
        if let Some(event) = events.iter_mut().find(|e| e.id == event_id) {
            event.registered_count = event.registered_count.saturating_sub(1);
        }

        let mut users = self.users()?;
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.registered_events.retain(|id| id != event_id);
        }

        let mut batch = WriteBatch::new();
        batch.put(REGISTRATIONS_KEY, &registrations)?;
        batch.put(EVENTS_KEY, &events)?;
        batch.put(USERS_KEY, &users)?;
        self.store.commit(batch)?;

        info!("User unregistered");
        Ok(true)
    }

    /// Registrations for an event in insertion order
    pub fn list_attendees(&mut self, event_id: &str) -> Result<Vec<Registration>> {
        Ok(self
            .registrations()?
            .into_iter()
            .filter(|r| r.event_id == event_id)
            .collect())
    }

    /// Events the user is registered for
    pub fn events_for_user(&mut self, user_id: &str) -> Result<Vec<Event>> {
        let user = self.user(user_id)?;
        Ok(self
            .events()?
            .into_iter()
            .filter(|e| user.is_registered_for(&e.id))
            .collect())
    }

    /// Registered events dated on or after `today`; an event happening today
    /// still counts as upcoming. Events with unparsable dates are skipped.
    pub fn upcoming_events_for_user(
        &mut self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<Event>> {
        Ok(self
            .events_for_user(user_id)?
            .into_iter()
            .filter(|e| {
                NaiveDate::parse_from_str(&e.date, "%Y-%m-%d").is_ok_and(|date| date >= today)
            })
            .collect())
    }

    /// Approved events in the user's interest categories they have not joined yet
    pub fn recommended_events(&mut self, user_id: &str) -> Result<Vec<Event>> {
        let user = self.user(user_id)?;
        Ok(self
            .events()?
            .into_iter()
            .filter(|e| {
                e.status.is_public()
                    && !user.is_registered_for(&e.id)
                    && user.is_interested_in(e.category)
            })
            .collect())
    }

    // Notifications

    pub fn list_notifications(&mut self, user_id: &str) -> Result<Vec<Notification>> {
        Ok(self
            .notifications()?
            .into_iter()
            .filter(|n| n.user_id == user_id)
            .collect())
    }

    pub fn unread_notification_count(&mut self, user_id: &str) -> Result<u32> {
        Ok(self
            .list_notifications(user_id)?
            .iter()
            .filter(|n| !n.is_read)
            .count() as u32)
    }

    // Maintenance

    /// Audit users, events and registrations against each other
    #[instrument(skip(self))]
    pub fn check_consistency(&mut self) -> Result<Vec<Violation>> {
        let users = self.users()?;
        let events = self.events()?;
        let registrations = self.registrations()?;

        let violations = invariants::audit(&users, &events, &registrations);
        for violation in &violations {
            warn!(%violation, "Consistency violation");
        }
        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, MemoryBlobStore};

    fn demo_service() -> CampusService {
        CampusService::new(MemoryBlobStore::new(), Seed::demo())
    }

    fn snapshot(service: &mut CampusService) -> (Vec<User>, Vec<Event>, Vec<Registration>) {
        (
            service.list_users().unwrap(),
            service.list_events().unwrap(),
            service.registrations().unwrap(),
        )
    }

    fn event(service: &mut CampusService, id: &str) -> Event {
        service
            .list_events()
            .unwrap()
            .into_iter()
            .find(|e| e.id == id)
            .unwrap()
    }

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            description: "Bring your own laptop".to_string(),
            organizer_id: "1".to_string(),
            organizer_name: "Admin Sarah".to_string(),
            date: "2024-12-09".to_string(),
            time: "18:00".to_string(),
            location: "Lab 3".to_string(),
            category: EventCategory::Tech,
            capacity: 2,
            image_url: String::new(),
        }
    }

    fn student(id: &str) -> User {
        User::new(
            id,
            format!("Student {id}"),
            format!("{id}@campus.edu"),
            UserRole::Student,
            "2024-09-01",
        )
    }

    #[test]
    fn test_login() {
        let mut service = demo_service();

        let admin = service.login("admin@campus.edu").unwrap().unwrap();
        assert_eq!(admin.name, "Admin Sarah");
        assert_eq!(admin.role, UserRole::Admin);

        assert!(service.login("nobody@x.edu").unwrap().is_none());
        // Case-sensitive
        assert!(service.login("ADMIN@campus.edu").unwrap().is_none());
    }

    #[test]
    fn test_first_read_persists_seed() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(db.get_raw(USERS_KEY).unwrap().is_none());

        let users: Vec<User> = db.load(USERS_KEY, &Seed::demo().users).unwrap();
        assert_eq!(users.len(), 2);
        assert!(db.get_raw(USERS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_register_twice_counts_once() {
        let mut service = demo_service();
        let before = event(&mut service, "e2").registered_count;

        service.register_user("3", "e2").unwrap();
        let err = service.register_user("3", "e2").unwrap_err();

        assert!(matches!(err, Error::DuplicateRegistration { .. }));
        assert_eq!(event(&mut service, "e2").registered_count, before + 1);
    }

    #[test]
    fn test_register_updates_all_collections() {
        let mut service = demo_service();
        let reg = service.register_user("1", "e2").unwrap();

        assert_eq!(reg.user_name, "Admin Sarah");
        assert_eq!(reg.user_email, "admin@campus.edu");

        let admin = service.login("admin@campus.edu").unwrap().unwrap();
        assert_eq!(admin.registered_events, vec!["e2".to_string()]);

        let attendees = service.list_attendees("e2").unwrap();
        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0].id, reg.id);
        assert!(service.check_consistency().unwrap().is_empty());
    }

    #[test]
    fn test_register_then_unregister_round_trip() {
        let mut service = demo_service();
        let count_before = event(&mut service, "e2").registered_count;
        let user_before = service.login("student@campus.edu").unwrap().unwrap();

        service.register_user("3", "e2").unwrap();
        assert!(service.unregister_user("3", "e2").unwrap());

        assert_eq!(event(&mut service, "e2").registered_count, count_before);
        let user_after = service.login("student@campus.edu").unwrap().unwrap();
        assert_eq!(user_after.registered_events, user_before.registered_events);
    }

    #[test]
    fn test_unregister_missing_leaves_store_untouched() {
        let mut service = demo_service();
        let before = snapshot(&mut service);
        let raw_before: Vec<_> = [USERS_KEY, EVENTS_KEY, REGISTRATIONS_KEY]
            .iter()
            .map(|k| service.store.get_raw(k).unwrap())
            .collect();

        assert!(!service.unregister_user("3", "e2").unwrap());
        assert!(!service.unregister_user("nobody", "e1").unwrap());

        let raw_after: Vec<_> = [USERS_KEY, EVENTS_KEY, REGISTRATIONS_KEY]
            .iter()
            .map(|k| service.store.get_raw(k).unwrap())
            .collect();
        assert_eq!(raw_before, raw_after);
        assert_eq!(snapshot(&mut service), before);
    }

    #[test]
    fn test_unregister_floors_count_at_zero() {
        let mut service = demo_service();
        let id = service
            .create_event(draft("Zero Seats Taken"), EventStatus::Approved)
            .unwrap()
            .id;
        service.register_user("3", &id).unwrap();

        // Simulate a counter that drifted to zero
        let mut events = service.list_events().unwrap();
        events.iter_mut().find(|e| e.id == id).unwrap().registered_count = 0;
        service.store.save(EVENTS_KEY, &events).unwrap();

        assert!(service.unregister_user("3", &id).unwrap());
        assert_eq!(event(&mut service, &id).registered_count, 0);
    }

    #[test]
    fn test_attendees_distinct_users() {
        let mut seed = Seed::demo();
        for i in 0..5 {
            seed = seed.with_user(student(&format!("s{i}")));
        }
        let mut service = CampusService::new(MemoryBlobStore::new(), seed);

        for i in 0..5 {
            service.register_user(&format!("s{i}"), "e2").unwrap();
        }

        let attendees = service.list_attendees("e2").unwrap();
        assert_eq!(attendees.len(), 5);
        let mut user_ids: Vec<_> = attendees.iter().map(|r| r.user_id.clone()).collect();
        user_ids.sort();
        user_ids.dedup();
        assert_eq!(user_ids.len(), 5);
    }

    #[test]
    fn test_full_event_rejects_registration() {
        let seed = Seed::demo().with_user(student("newUser"));
        let mut service = CampusService::new(MemoryBlobStore::new(), seed);

        let err = service.register_user("newUser", "e4").unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { capacity: 40, .. }));
        assert_eq!(event(&mut service, "e4").registered_count, 40);
        assert!(service.list_attendees("e4").unwrap().is_empty());
        let user = service.login("newUser@campus.edu").unwrap().unwrap();
        assert!(user.registered_events.is_empty());
    }

    #[test]
    fn test_register_unknown_user_or_event() {
        let mut service = demo_service();

        assert!(matches!(
            service.register_user("ghost", "e1").unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            service.register_user("1", "nope").unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(service.check_consistency().unwrap().is_empty());
    }

    #[test]
    fn test_last_seat_then_full() {
        let seed = Seed::demo()
            .with_user(student("a"))
            .with_user(student("b"))
            .with_user(student("c"));
        let mut service = CampusService::new(MemoryBlobStore::new(), seed);
        let id = service
            .create_event(draft("Two Seats"), EventStatus::Approved)
            .unwrap()
            .id;

        service.register_user("a", &id).unwrap();
        service.register_user("b", &id).unwrap();
        assert!(matches!(
            service.register_user("c", &id).unwrap_err(),
            Error::CapacityExceeded { .. }
        ));

        // A seat frees up
        service.unregister_user("a", &id).unwrap();
        service.register_user("c", &id).unwrap();
        assert_eq!(event(&mut service, &id).registered_count, 2);
    }

    #[test]
    fn test_create_event_unique_ids() {
        let mut service = demo_service();
        let mut ids = std::collections::HashSet::new();
        for i in 0..50 {
            let event = service
                .create_event(draft(&format!("Meetup {i}")), EventStatus::Draft)
                .unwrap();
            assert_eq!(event.registered_count, 0);
            assert_eq!(event.id.len(), ids::EVENT_ID_LEN);
            assert!(ids.insert(event.id));
        }
        assert_eq!(service.list_events().unwrap().len(), 57);
    }

    #[test]
    fn test_create_event_requires_title_and_date() {
        let mut service = demo_service();
        let mut missing_date = draft("Untimed");
        missing_date.date = String::new();

        assert!(matches!(
            service.create_event(draft("  "), EventStatus::Draft),
            Err(Error::InvalidOperation(_))
        ));
        assert!(matches!(
            service.create_event(missing_date, EventStatus::Draft),
            Err(Error::InvalidOperation(_))
        ));
        assert_eq!(service.list_events().unwrap().len(), 7);
    }

    #[test]
    fn test_moderation() {
        let mut service = demo_service();
        assert_eq!(service.pending_events().unwrap().len(), 1);

        let approved = service.set_event_status("e6", EventStatus::Approved).unwrap();
        assert_eq!(approved.status, EventStatus::Approved);
        assert!(service.pending_events().unwrap().is_empty());
        assert_eq!(service.approved_events().unwrap().len(), 6);

        assert!(matches!(
            service.set_event_status("nope", EventStatus::Rejected),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_require_moderator() {
        let mut service = demo_service();

        assert_eq!(service.require_moderator("1").unwrap().id, "1");
        assert!(matches!(
            service.require_moderator("3"),
            Err(Error::Forbidden(_))
        ));
        assert!(matches!(
            service.require_moderator("404"),
            Err(Error::Forbidden(_))
        ));

        service.set_user_role("3", UserRole::Admin).unwrap();
        assert!(service.require_moderator("3").is_ok());
    }

    #[test]
    fn test_set_interests_replaces_existing() {
        let mut service = demo_service();
        let before = service.user("3").unwrap();
        assert_eq!(
            before.interests,
            Some(vec![EventCategory::Tech, EventCategory::Social])
        );

        let user = service
            .set_user_interests("3", vec![EventCategory::Academic])
            .unwrap();
        assert_eq!(user.interests, Some(vec![EventCategory::Academic]));
        assert_eq!(service.user("3").unwrap().interests, user.interests);

        let user = service.set_user_interests("3", Vec::new()).unwrap();
        assert_eq!(user.interests, Some(Vec::new()));
    }

    #[test]
    fn test_upcoming_includes_today() {
        let mut service = demo_service();
        let e3_day = NaiveDate::from_ymd_opt(2024, 12, 12).unwrap();
        let upcoming: Vec<_> = service
            .upcoming_events_for_user("3", e3_day)
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(upcoming, vec!["e3", "e5"]);

        let after = e3_day.succ_opt().unwrap();
        let upcoming = service.upcoming_events_for_user("3", after).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, "e5");
    }

    #[test]
    fn test_role_and_interests() {
        let mut service = demo_service();

        let promoted = service.set_user_role("3", UserRole::Admin).unwrap();
        assert_eq!(promoted.role, UserRole::Admin);
        assert_eq!(service.user_stats().unwrap(), UserStats { total: 2, admins: 2 });
        assert!(matches!(
            service.set_user_role("404", UserRole::Student),
            Err(Error::NotFound(_))
        ));

        let user = service
            .set_user_interests(
                "1",
                vec![EventCategory::Sports, EventCategory::Sports, EventCategory::Tech],
            )
            .unwrap();
        assert_eq!(
            user.interests,
            Some(vec![EventCategory::Sports, EventCategory::Tech])
        );

        let user = service.toggle_interest("1", EventCategory::Sports).unwrap();
        assert_eq!(user.interests, Some(vec![EventCategory::Tech]));
        let user = service.toggle_interest("1", EventCategory::Social).unwrap();
        assert_eq!(
            user.interests,
            Some(vec![EventCategory::Tech, EventCategory::Social])
        );
    }

    #[test]
    fn test_dashboard_queries() {
        let mut service = demo_service();

        let mine: Vec<_> = service
            .events_for_user("3")
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(mine, vec!["e1", "e3", "e5"]);

        let today = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
        let upcoming: Vec<_> = service
            .upcoming_events_for_user("3", today)
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(upcoming, vec!["e3", "e5"]);

        // Tech and Social interests; e1 and e5 joined, e6 pending
        let recommended: Vec<_> = service
            .recommended_events("3")
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert!(recommended.is_empty());

        service.set_event_status("e6", EventStatus::Approved).unwrap();
        let recommended = service.recommended_events("3").unwrap();
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].id, "e6");

        assert!(service.recommended_events("1").unwrap().is_empty());
    }

    #[test]
    fn test_search_and_stats() {
        let mut service = demo_service();

        let found = service
            .search_events(&EventFilter::approved().with_query("chess"))
            .unwrap();
        assert!(found.is_empty(), "chess event is a draft");

        let found = service
            .search_events(&EventFilter::default().with_query("CHESS"))
            .unwrap();
        assert_eq!(found.len(), 1);

        let sports = service
            .search_events(&EventFilter::approved().with_category(EventCategory::Sports))
            .unwrap();
        assert_eq!(sports.len(), 1);
        assert_eq!(sports[0].id, "e2");

        assert_eq!(
            service.organizer_stats("1").unwrap(),
            OrganizerStats {
                total: 7,
                live: 5,
                pending: 1,
                drafts: 1
            }
        );
    }

    #[test]
    fn test_notifications() {
        let mut service = demo_service();
        assert_eq!(service.list_notifications("3").unwrap().len(), 2);
        assert!(service.list_notifications("1").unwrap().is_empty());
        assert_eq!(service.unread_notification_count("3").unwrap(), 1);
    }

    #[test]
    fn test_corrupt_collection_surfaces_storage_error() {
        let mut store = MemoryBlobStore::new();
        store.put_raw(EVENTS_KEY, "[{\"id\":").unwrap();
        let mut service = CampusService::new(store, Seed::demo());

        let err = service.list_events().unwrap_err();
        assert!(err.is_storage());
        // Registration must not half-apply when a collection is unreadable
        assert!(service.register_user("3", "e2").is_err());
        assert!(service.list_attendees("e2").unwrap().is_empty());
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("campus.db");

        {
            let mut service = CampusService::new(Database::open(&path).unwrap(), Seed::demo());
            service.register_user("1", "e2").unwrap();
        }

        let mut service = CampusService::new(Database::open(&path).unwrap(), Seed::empty());
        assert_eq!(service.list_attendees("e2").unwrap().len(), 1);
        assert_eq!(service.list_users().unwrap().len(), 2);
    }
}
