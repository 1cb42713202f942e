//! Booking persistence operations.
//!
//! A booking may only reference an event that exists. The check and the
//! write happen inside one transaction: the referenced event row is read
//! with `FOR SHARE`, which blocks a concurrent `DELETE` of that event
//! until the booking commits. A dangling reference therefore cannot be
//! created, without resorting to a foreign key or any cascade rule.
//!
//! The check runs only when the referenced event is being set or changed;
//! an update that leaves `event_id` untouched skips the lookup entirely.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use gather_types::{Booking, BookingDraft, BookingId, BookingPatch, EventId};

use crate::error::DbError;
use crate::validate::{normalize_email, validate_booking_fields};

/// Column list shared by every query that reads bookings back.
const BOOKING_COLUMNS: &str = "id, event_id, email, created_at, updated_at";

/// Operations on the `bookings` table.
pub struct BookingStore<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingStore<'a> {
    /// Create a new booking store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Validate and persist a new booking.
    ///
    /// The email is trimmed and lowercased before the syntax check. The
    /// referenced event must exist at the moment of creation; the row
    /// lock taken by the existence check holds until commit.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Validation`] for a malformed email,
    /// [`DbError::DanglingReference`] if the event does not exist, or
    /// [`DbError::Database`] for any other statement failure. Nothing is
    /// persisted on rejection.
    pub async fn create(&self, draft: &BookingDraft) -> Result<Booking, DbError> {
        validate_booking_fields(draft)?;
        let email = normalize_email(&draft.email);

        let mut tx = self.pool.begin().await?;
        require_event(&mut tx, draft.event_id).await?;

        let id = BookingId::new();
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r"INSERT INTO bookings (id, event_id, email)
              VALUES ($1, $2, $3)
              RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(draft.event_id.into_inner())
        .bind(&email)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(booking_id = %row.id, event_id = %row.event_id, "created booking");

        Ok(row.into())
    }

    /// Look up a booking by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Database`] if the query fails.
    pub async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, DbError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r"SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List all bookings for an event, oldest first.
    ///
    /// Served by the secondary index on `bookings.event_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Database`] if the query fails.
    pub async fn find_by_event(&self, event_id: EventId) -> Result<Vec<Booking>, DbError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            r"SELECT {BOOKING_COLUMNS} FROM bookings WHERE event_id = $1 ORDER BY created_at"
        ))
        .bind(event_id.into_inner())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a partial update to an existing booking.
    ///
    /// The referential check runs only when the patch moves the booking
    /// to a *different* event; re-submitting the current `event_id` (or
    /// omitting it) skips the lookup.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::BookingNotFound`] if no such booking exists,
    /// [`DbError::Validation`] for a malformed email, or
    /// [`DbError::DanglingReference`] if the new event does not exist.
    pub async fn update(&self, id: BookingId, patch: &BookingPatch) -> Result<Booking, DbError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(DbError::BookingNotFound(id))?;

        let event_id = patch.event_id.unwrap_or(existing.event_id);
        let email = patch
            .email
            .as_deref()
            .map_or_else(|| existing.email.clone(), normalize_email);
        validate_booking_fields(&BookingDraft {
            event_id,
            email: email.clone(),
        })?;

        let mut tx = self.pool.begin().await?;
        if event_id != existing.event_id {
            require_event(&mut tx, event_id).await?;
        }

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r"UPDATE bookings
              SET event_id = $2, email = $3, updated_at = now()
              WHERE id = $1
              RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(event_id.into_inner())
        .bind(&email)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(
            booking_id = %row.id,
            event_id = %row.event_id,
            reassigned = event_id != existing.event_id,
            "updated booking"
        );

        Ok(row.into())
    }

    /// Delete a booking by ID. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Database`] if the delete fails.
    pub async fn delete(&self, id: BookingId) -> Result<bool, DbError> {
        let result = sqlx::query(r"DELETE FROM bookings WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Assert that an event exists, locking its row until the transaction
/// commits so a concurrent delete cannot slip between check and write.
async fn require_event(
    tx: &mut Transaction<'_, Postgres>,
    event_id: EventId,
) -> Result<(), DbError> {
    let found: Option<(Uuid,)> = sqlx::query_as(r"SELECT id FROM events WHERE id = $1 FOR SHARE")
        .bind(event_id.into_inner())
        .fetch_optional(&mut **tx)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(DbError::DanglingReference(event_id)),
    }
}

/// A row from the `bookings` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    event_id: Uuid,
    email: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: BookingId::from(row.id),
            event_id: EventId::from(row.event_id),
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
