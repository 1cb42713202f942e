//! Shared type definitions for the Gather event platform.
//!
//! Everything the persistence layer and its consumers exchange lives here:
//! strongly-typed identifiers, the event mode enumeration, and the entity
//! structs with their draft/patch input forms. All public types derive
//! [`serde`] traits and [`ts-rs`](https://docs.rs/ts-rs) bindings so the
//! TypeScript frontend consumes the same shapes the Rust side persists.
//!
//! # Modules
//!
//! - [`ids`] -- UUID v7 newtype identifiers
//! - [`enums`] -- the `EventMode` enumeration
//! - [`structs`] -- entity, draft, and patch structs

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export primary types for convenience.
pub use enums::EventMode;
pub use ids::{BookingId, EventId};
pub use structs::{Booking, BookingDraft, BookingPatch, Event, EventDraft, EventPatch};
