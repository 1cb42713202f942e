//! Event persistence operations.
//!
//! Every write passes through the validation pipeline in [`crate::validate`]
//! before touching the database: field rules, slug derivation, date
//! normalization, and strict time validation, in that order. Slug
//! uniqueness is the one invariant left to the storage layer -- the
//! unique index on `events.slug` rejects collisions at commit time,
//! surfaced as [`DbError::DuplicateSlug`].

use sqlx::PgPool;
use uuid::Uuid;

use gather_types::{Event, EventDraft, EventId, EventMode, EventPatch};

use crate::error::{is_unique_violation, DbError};
use crate::validate::{normalize_date, slugify, validate_event_fields, validate_time};

/// Column list shared by every query that reads events back.
const EVENT_COLUMNS: &str = "id, title, slug, description, overview, image, venue, location, \
     date, time, mode, audience, agenda, organizer, tags, created_at, updated_at";

/// Operations on the `events` table.
pub struct EventStore<'a> {
    pool: &'a PgPool,
}

impl<'a> EventStore<'a> {
    /// Create a new event store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Validate and persist a new event.
    ///
    /// Runs the full pipeline (field rules, slug, date, time) and inserts
    /// the normalized row. String fields are trimmed the way the platform
    /// has always stored them.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Validation`], [`DbError::InvalidDate`], or
    /// [`DbError::InvalidTime`] from the pipeline,
    /// [`DbError::DuplicateSlug`] on a slug collision at commit, or
    /// [`DbError::Database`] for any other statement failure.
    pub async fn create(&self, draft: &EventDraft) -> Result<Event, DbError> {
        validate_event_fields(draft)?;
        let slug = slugify(&draft.title);
        let date = normalize_date(&draft.date)?;
        validate_time(&draft.time)?;

        let id = EventId::new();
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r"INSERT INTO events
                  (id, title, slug, description, overview, image, venue, location,
                   date, time, mode, audience, agenda, organizer, tags)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
              RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(draft.title.trim())
        .bind(&slug)
        .bind(draft.description.trim())
        .bind(draft.overview.trim())
        .bind(draft.image.trim())
        .bind(draft.venue.trim())
        .bind(draft.location.trim())
        .bind(&date)
        .bind(&draft.time)
        .bind(draft.mode.as_str())
        .bind(draft.audience.trim())
        .bind(&draft.agenda)
        .bind(draft.organizer.trim())
        .bind(&draft.tags)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateSlug(slug.clone())
            } else {
                DbError::Database(e)
            }
        })?;

        tracing::info!(event_id = %row.id, slug = %row.slug, "created event");

        row.try_into()
    }

    /// Look up an event by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Database`] if the query fails.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, DbError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r"SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Look up an event by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Database`] if the query fails.
    pub async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, DbError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r"SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List events ordered by date and start time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Database`] if the query fails.
    pub async fn list(&self, limit: i64) -> Result<Vec<Event>, DbError> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            r"SELECT {EVENT_COLUMNS} FROM events ORDER BY date, time LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Apply a partial update to an existing event.
    ///
    /// The patch is merged onto the stored values and the merged result
    /// re-runs the full validation pipeline. The slug is recomputed only
    /// when the patch actually changes the title; updates that leave the
    /// title untouched never change the event's URL.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::EventNotFound`] if no such event exists, any
    /// pipeline error, or [`DbError::DuplicateSlug`] if a retitled event
    /// collides with an existing slug.
    pub async fn update(&self, id: EventId, patch: &EventPatch) -> Result<Event, DbError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(DbError::EventNotFound(id))?;

        let title_changed = patch
            .title
            .as_ref()
            .is_some_and(|t| t.trim() != existing.title);

        let merged = merge(&existing, patch);
        validate_event_fields(&merged)?;
        let slug = if title_changed {
            slugify(&merged.title)
        } else {
            existing.slug.clone()
        };
        let date = normalize_date(&merged.date)?;
        validate_time(&merged.time)?;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            r"UPDATE events
              SET title = $2, slug = $3, description = $4, overview = $5, image = $6,
                  venue = $7, location = $8, date = $9, time = $10, mode = $11,
                  audience = $12, agenda = $13, organizer = $14, tags = $15,
                  updated_at = now()
              WHERE id = $1
              RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(merged.title.trim())
        .bind(&slug)
        .bind(merged.description.trim())
        .bind(merged.overview.trim())
        .bind(merged.image.trim())
        .bind(merged.venue.trim())
        .bind(merged.location.trim())
        .bind(&date)
        .bind(&merged.time)
        .bind(merged.mode.as_str())
        .bind(merged.audience.trim())
        .bind(&merged.agenda)
        .bind(merged.organizer.trim())
        .bind(&merged.tags)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateSlug(slug.clone())
            } else {
                DbError::Database(e)
            }
        })?;

        tracing::info!(
            event_id = %row.id,
            slug = %row.slug,
            slug_recomputed = title_changed,
            "updated event"
        );

        row.try_into()
    }

    /// Delete an event by ID. Returns whether a row was removed.
    ///
    /// Bookings referencing the event are left in place; no cascade.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Database`] if the delete fails.
    pub async fn delete(&self, id: EventId) -> Result<bool, DbError> {
        let result = sqlx::query(r"DELETE FROM events WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Merge a patch onto the stored event, yielding the draft to re-validate.
fn merge(existing: &Event, patch: &EventPatch) -> EventDraft {
    EventDraft {
        title: patch.title.clone().unwrap_or_else(|| existing.title.clone()),
        description: patch
            .description
            .clone()
            .unwrap_or_else(|| existing.description.clone()),
        overview: patch
            .overview
            .clone()
            .unwrap_or_else(|| existing.overview.clone()),
        image: patch.image.clone().unwrap_or_else(|| existing.image.clone()),
        venue: patch.venue.clone().unwrap_or_else(|| existing.venue.clone()),
        location: patch
            .location
            .clone()
            .unwrap_or_else(|| existing.location.clone()),
        date: patch.date.clone().unwrap_or_else(|| existing.date.clone()),
        time: patch.time.clone().unwrap_or_else(|| existing.time.clone()),
        mode: patch.mode.unwrap_or(existing.mode),
        audience: patch
            .audience
            .clone()
            .unwrap_or_else(|| existing.audience.clone()),
        agenda: patch
            .agenda
            .clone()
            .unwrap_or_else(|| existing.agenda.clone()),
        organizer: patch
            .organizer
            .clone()
            .unwrap_or_else(|| existing.organizer.clone()),
        tags: patch.tags.clone().unwrap_or_else(|| existing.tags.clone()),
    }
}

/// A row from the `events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    slug: String,
    description: String,
    overview: String,
    image: String,
    venue: String,
    location: String,
    date: String,
    time: String,
    mode: String,
    audience: String,
    agenda: Vec<String>,
    organizer: String,
    tags: Vec<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = DbError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let mode = EventMode::parse(&row.mode)
            .ok_or_else(|| DbError::Decode(format!("unknown event mode `{}`", row.mode)))?;

        Ok(Self {
            id: EventId::from(row.id),
            title: row.title,
            slug: row.slug,
            description: row.description,
            overview: row.overview,
            image: row.image,
            venue: row.venue,
            location: row.location,
            date: row.date,
            time: row.time,
            mode,
            audience: row.audience,
            agenda: row.agenda,
            organizer: row.organizer,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use gather_types::EventMode;

    use super::*;

    fn stored_event() -> Event {
        Event {
            id: EventId::new(),
            title: "Launch Party".to_owned(),
            slug: "launch-party".to_owned(),
            description: "Celebrating the 1.0 release.".to_owned(),
            overview: "Demos and drinks.".to_owned(),
            image: "https://example.org/launch.png".to_owned(),
            venue: "Warehouse 9".to_owned(),
            location: "Amsterdam".to_owned(),
            date: "2025-09-01".to_owned(),
            time: "19:00".to_owned(),
            mode: EventMode::Hybrid,
            audience: "Everyone".to_owned(),
            agenda: vec!["Demos".to_owned()],
            organizer: "Gather".to_owned(),
            tags: vec!["launch".to_owned()],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn merge_keeps_unpatched_fields() {
        let existing = stored_event();
        let patch = EventPatch {
            description: Some("New description.".to_owned()),
            ..EventPatch::default()
        };
        let merged = merge(&existing, &patch);
        assert_eq!(merged.description, "New description.");
        assert_eq!(merged.title, existing.title);
        assert_eq!(merged.tags, existing.tags);
    }

    #[test]
    fn merge_applies_every_patched_field() {
        let existing = stored_event();
        let patch = EventPatch {
            title: Some("Launch Party 2".to_owned()),
            mode: Some(EventMode::Online),
            tags: Some(vec!["launch".to_owned(), "v2".to_owned()]),
            ..EventPatch::default()
        };
        let merged = merge(&existing, &patch);
        assert_eq!(merged.title, "Launch Party 2");
        assert_eq!(merged.mode, EventMode::Online);
        assert_eq!(merged.tags.len(), 2);
    }
}
