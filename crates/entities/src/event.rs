//! Campus event entity definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image used when an event is created without one.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

fn placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

/// A campus event students can register for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, assigned at creation.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Calendar date of the event.
    #[serde(with = "crate::date")]
    pub date: NaiveDate,
    /// Display time, kept as entered (e.g. "10:00 AM").
    pub time: String,
    /// Venue.
    pub location: String,
    /// Category label.
    pub category: String,
    /// Organizing club or department.
    pub organizer: String,
    /// Maximum number of attendees.
    pub capacity: u32,
    /// Number of registrations so far.
    #[serde(default)]
    pub attendees: u32,
    /// Image URL.
    #[serde(default = "placeholder_image")]
    pub image: String,
    /// Participants in registration order.
    #[serde(default)]
    pub registered_users: Vec<String>,
}

impl Event {
    /// Creates an event from a draft, assigning a fresh id.
    pub fn new(draft: EventDraft) -> Self {
        let image = draft
            .image
            .filter(|image| !image.trim().is_empty())
            .unwrap_or_else(placeholder_image);

        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            category: draft.category,
            organizer: draft.organizer,
            capacity: draft.capacity,
            attendees: 0,
            image,
            registered_users: Vec::new(),
        }
    }

    /// Returns true if the participant is already registered.
    pub fn is_registered(&self, participant_id: &str) -> bool {
        self.registered_users.iter().any(|p| p == participant_id)
    }

    /// Returns true once attendees reached capacity.
    pub fn is_full(&self) -> bool {
        self.attendees >= self.capacity
    }

    /// Seats left before the event is full.
    pub fn remaining_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.attendees)
    }
}

/// Input for creating an event. Everything except the store-managed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    #[serde(with = "crate::date")]
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub category: String,
    pub organizer: String,
    pub capacity: u32,
    /// Image URL; a placeholder is used when absent or blank.
    #[serde(default)]
    pub image: Option<String>,
}

impl EventDraft {
    /// Creates a draft with the given title and date.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            date,
            time: String::new(),
            location: String::new(),
            category: String::new(),
            organizer: String::new(),
            capacity: 1,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = organizer.into();
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Partial update for an event. Only fields that are `Some` are replaced.
///
/// Attendance is not part of the update: it only changes through
/// registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub organizer: Option<String>,
    pub capacity: Option<u32>,
    pub image: Option<String>,
}

impl EventUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns true if the update would not change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the present fields to `event`.
    ///
    /// A blank image keeps the current one.
    pub fn apply_to(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(time) = self.time {
            event.time = time;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(organizer) = self.organizer {
            event.organizer = organizer;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(image) = self.image.filter(|image| !image.trim().is_empty()) {
            event.image = image;
        }
    }
}
