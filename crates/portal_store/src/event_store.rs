//! Event store.

use std::sync::Arc;

use entities::{Event, EventDraft, EventUpdate};
use local_storage::{known_keys, LocalStorage};
use serde::{Deserialize, Serialize};

use crate::{Persistence, PortalStoreError, PortalStoreResult, StorePolicy};

/// Persisted shape of the event collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventState {
    pub events: Vec<Event>,
}

/// Result of a registration attempt. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Participant added and attendance incremented.
    Registered,
    /// Participant was already on the list; nothing changed.
    AlreadyRegistered,
    /// Event is at capacity; nothing changed.
    EventFull,
    /// No event with that id; nothing changed.
    EventNotFound,
}

impl RegistrationOutcome {
    /// Returns true if the registration changed the event.
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered)
    }
}

/// Owns the campus event collection.
#[derive(Debug)]
pub struct EventStore {
    state: EventState,
    policy: StorePolicy,
    persistence: Persistence,
}

impl EventStore {
    /// Creates an empty store that is not persisted.
    pub fn new(policy: StorePolicy) -> Self {
        Self {
            state: EventState::default(),
            policy,
            persistence: Persistence::in_memory(known_keys::EVENT_STORE),
        }
    }

    /// Opens the store persisted in `storage`, rehydrating existing events.
    pub fn open(storage: Arc<dyn LocalStorage>, policy: StorePolicy) -> Self {
        let persistence = Persistence::new(storage, known_keys::EVENT_STORE);
        let state: EventState = persistence.load();
        tracing::info!(events = state.events.len(), "Opened event store");
        Self {
            state,
            policy,
            persistence,
        }
    }

    /// All events in creation order.
    pub fn events(&self) -> &[Event] {
        &self.state.events
    }

    /// Gets an event by ID.
    pub fn get_event(&self, id: &str) -> Option<&Event> {
        self.state.events.iter().find(|e| e.id == id)
    }

    /// Gets an event by ID, failing if it does not exist.
    pub fn require_event(&self, id: &str) -> PortalStoreResult<&Event> {
        self.get_event(id)
            .ok_or_else(|| PortalStoreError::not_found("Event", id))
    }

    /// Events the participant registered for.
    pub fn events_registered_by(&self, participant_id: &str) -> Vec<&Event> {
        self.state
            .events
            .iter()
            .filter(|e| e.is_registered(participant_id))
            .collect()
    }

    /// Events in a category, compared case-insensitively.
    pub fn events_in_category(&self, category: &str) -> Vec<&Event> {
        self.state
            .events
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Creates an event with a fresh id and no attendees.
    pub fn add_event(&mut self, draft: EventDraft) -> Event {
        let event = Event::new(draft);
        tracing::info!(event_id = %event.id, title = %event.title, "Added event");
        self.state.events.push(event.clone());
        self.persist();
        event
    }

    /// Replaces the fields present in `update`.
    ///
    /// Returns false, changing nothing, if no event has that id. An empty
    /// update is not written back.
    pub fn update_event(&mut self, id: &str, update: EventUpdate) -> bool {
        let Some(event) = self.state.events.iter_mut().find(|e| e.id == id) else {
            tracing::debug!(event_id = id, "Update of unknown event ignored");
            return false;
        };
        if update.is_empty() {
            tracing::debug!(event_id = id, "Empty event update ignored");
            return true;
        }
        update.apply_to(event);
        tracing::info!(event_id = id, "Updated event");
        self.persist();
        true
    }

    /// Removes an event. Returns false if no event has that id.
    pub fn delete_event(&mut self, id: &str) -> bool {
        let before = self.state.events.len();
        self.state.events.retain(|e| e.id != id);
        if self.state.events.len() == before {
            tracing::debug!(event_id = id, "Delete of unknown event ignored");
            return false;
        }
        tracing::info!(event_id = id, "Deleted event");
        self.persist();
        true
    }

    /// Registers a participant for an event.
    ///
    /// Appends the participant and increments attendance together, so
    /// `attendees == registered_users.len()` holds afterwards.
    pub fn register_for_event(
        &mut self,
        event_id: &str,
        participant_id: &str,
    ) -> RegistrationOutcome {
        let policy = self.policy;
        let Some(event) = self.state.events.iter_mut().find(|e| e.id == event_id) else {
            tracing::debug!(event_id, "Registration for unknown event ignored");
            return RegistrationOutcome::EventNotFound;
        };

        if policy.deduplicate_registrations && event.is_registered(participant_id) {
            tracing::debug!(event_id, participant_id, "Participant already registered");
            return RegistrationOutcome::AlreadyRegistered;
        }
        if policy.enforce_capacity && event.is_full() {
            tracing::info!(
                event_id,
                participant_id,
                capacity = event.capacity,
                "Event is full"
            );
            return RegistrationOutcome::EventFull;
        }

        event.registered_users.push(participant_id.to_string());
        event.attendees += 1;
        tracing::info!(
            event_id,
            participant_id,
            attendees = event.attendees,
            "Registered participant"
        );
        self.persist();
        RegistrationOutcome::Registered
    }

    fn persist(&self) {
        self.persistence.save(&self.state);
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(StorePolicy::default())
    }
}
