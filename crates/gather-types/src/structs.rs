//! Entity structs for the Gather event platform.
//!
//! Each entity comes in three forms:
//!
//! - the persisted entity (`Event`, `Booking`) as read back from the
//!   database, with its ID and system timestamps;
//! - a draft (`EventDraft`, `BookingDraft`) holding caller-supplied
//!   fields for creation, before validation and normalization;
//! - a patch (`EventPatch`, `BookingPatch`) where every field is
//!   optional and only present fields are applied on update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::EventMode;
use crate::ids::{BookingId, EventId};

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A listed hackathon/meetup with scheduling and descriptive metadata.
///
/// The `slug`, `date`, and `time` fields are always in canonical form on
/// a persisted event: the write path derives the slug from the title and
/// normalizes date (`YYYY-MM-DD`) and time (`HH:MM`, 24-hour) before the
/// row is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Event identifier.
    pub id: EventId,
    /// Display title (at least 3 characters).
    pub title: String,
    /// URL-safe identifier derived from the title, unique across events.
    pub slug: String,
    /// Full event description.
    pub description: String,
    /// Short overview shown in listings.
    pub overview: String,
    /// Cover image URL.
    pub image: String,
    /// Venue name.
    pub venue: String,
    /// City / geographic location.
    pub location: String,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    /// Start time in zero-padded 24-hour `HH:MM` form.
    pub time: String,
    /// How attendees participate.
    pub mode: EventMode,
    /// Intended audience description.
    pub audience: String,
    /// Ordered agenda items; never empty.
    pub agenda: Vec<String>,
    /// Organizer name.
    pub organizer: String,
    /// Topic tags; never empty.
    pub tags: Vec<String>,
    /// Row creation timestamp (database-managed).
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (database-managed).
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating an event.
///
/// Unvalidated input: the store's validation pipeline checks field rules,
/// derives the slug, and normalizes date/time before anything persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventDraft {
    /// Display title (at least 3 characters).
    pub title: String,
    /// Full event description.
    pub description: String,
    /// Short overview shown in listings.
    pub overview: String,
    /// Cover image URL.
    pub image: String,
    /// Venue name.
    pub venue: String,
    /// City / geographic location.
    pub location: String,
    /// Calendar date; normalized to `YYYY-MM-DD` on save.
    pub date: String,
    /// Start time; must already be zero-padded 24-hour `HH:MM`.
    pub time: String,
    /// How attendees participate.
    pub mode: EventMode,
    /// Intended audience description.
    pub audience: String,
    /// Ordered agenda items; must be non-empty.
    pub agenda: Vec<String>,
    /// Organizer name.
    pub organizer: String,
    /// Topic tags; must be non-empty.
    pub tags: Vec<String>,
}

/// Partial update for an event; only present fields are applied.
///
/// Changing `title` recomputes the slug. All other fields leave the slug
/// untouched, so re-saving an event never churns its URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(default)]
pub struct EventPatch {
    /// New title (slug is re-derived when this differs from the stored title).
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New overview.
    pub overview: Option<String>,
    /// New cover image URL.
    pub image: Option<String>,
    /// New venue name.
    pub venue: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New date; normalized to `YYYY-MM-DD` on save.
    pub date: Option<String>,
    /// New time; must be zero-padded 24-hour `HH:MM`.
    pub time: Option<String>,
    /// New participation mode.
    pub mode: Option<EventMode>,
    /// New audience description.
    pub audience: Option<String>,
    /// Replacement agenda; must be non-empty if present.
    pub agenda: Option<Vec<String>>,
    /// New organizer name.
    pub organizer: Option<String>,
    /// Replacement tags; must be non-empty if present.
    pub tags: Option<Vec<String>>,
}

impl EventPatch {
    /// Whether the patch carries no fields at all.
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.overview.is_none()
            && self.image.is_none()
            && self.venue.is_none()
            && self.location.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.mode.is_none()
            && self.audience.is_none()
            && self.agenda.is_none()
            && self.organizer.is_none()
            && self.tags.is_none()
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// An email address registered against one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Booking {
    /// Booking identifier.
    pub id: BookingId,
    /// The event this booking is for.
    pub event_id: EventId,
    /// Normalized (trimmed, lowercased) attendee email.
    pub email: String,
    /// Row creation timestamp (database-managed).
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (database-managed).
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BookingDraft {
    /// The event to book; must exist at creation time.
    pub event_id: EventId,
    /// Attendee email; trimmed and lowercased before validation.
    pub email: String,
}

/// Partial update for a booking; only present fields are applied.
///
/// A changed `event_id` re-runs the referential existence check; an
/// unchanged one skips it entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(default)]
pub struct BookingPatch {
    /// Reassign the booking to a different event.
    pub event_id: Option<EventId>,
    /// New attendee email.
    pub email: Option<String>,
}
