//! Persistence and validation layer for the Gather event platform.
//!
//! One process-wide `PostgreSQL` pool (lazily connected, shared through
//! an explicitly-passed [`Database`] handle) backs two stores. Every
//! write runs an explicit validation pipeline before it commits; nothing
//! reaches the tables unnormalized.
//!
//! # Architecture
//!
//! ```text
//! Consumer (web / admin)
//!     |
//!     +-- Database::pool() ----> shared PgPool (one connection attempt,
//!     |                          concurrent callers join it)
//!     |
//!     +-- EventStore   --> field rules -> slug -> date -> time -> INSERT
//!     +-- BookingStore --> email rule -> event existence (FOR SHARE) -> INSERT
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- connection configuration and the shared [`Database`] handle
//! - [`validate`] -- the named validation stages (pure, no I/O)
//! - [`event_store`] -- event create/read/update/delete
//! - [`booking_store`] -- booking create/read/update/delete
//! - [`error`] -- the error taxonomy

pub mod booking_store;
pub mod error;
pub mod event_store;
pub mod postgres;
pub mod validate;

// Re-export primary types for convenience.
pub use booking_store::BookingStore;
pub use error::DbError;
pub use event_store::EventStore;
pub use postgres::{Database, PostgresConfig, DATABASE_URL_VAR};
