//! Error types for the persistence layer.
//!
//! Every failure mode of the write pipeline has its own [`DbError`]
//! variant so callers can react to the specific rejection (a field rule,
//! a malformed date, a dangling event reference, a slug collision) rather
//! than a generic failure. Nothing is swallowed or retried internally;
//! validation errors surface to the immediate caller.

use gather_types::{BookingId, EventId};

/// Errors that can occur in the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Acquiring the shared database connection failed (timeout or
    /// network failure). The connection cell is cleared so a later call
    /// may retry.
    #[error("failed to connect to PostgreSQL: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement against an established connection failed.
    #[error("PostgreSQL error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A field-level constraint was violated. Carries the first
    /// offending field and its rule message.
    #[error("validation failed on `{field}`: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable rule description.
        message: &'static str,
    },

    /// A date value could not be parsed into `YYYY-MM-DD` form.
    #[error("invalid date format `{0}`, use YYYY-MM-DD")]
    InvalidDate(String),

    /// A time value is not zero-padded 24-hour `HH:MM`.
    #[error("invalid time format `{0}`, use HH:MM (24-hour)")]
    InvalidTime(String),

    /// A booking references an event that does not exist.
    #[error("referenced event {0} does not exist")]
    DanglingReference(EventId),

    /// The derived slug collides with an existing event's slug.
    #[error("an event with slug `{0}` already exists")]
    DuplicateSlug(String),

    /// An update targeted an event that does not exist.
    #[error("event {0} not found")]
    EventNotFound(EventId),

    /// An update targeted a booking that does not exist.
    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    /// A stored value no longer decodes into its domain type.
    #[error("corrupt row: {0}")]
    Decode(String),
}

/// Whether a [`sqlx::Error`] is a unique-constraint violation
/// (SQLSTATE 23505).
///
/// Used by the event store to map a slug-index collision at commit time
/// to [`DbError::DuplicateSlug`].
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}
