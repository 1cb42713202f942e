//! Event seeding from a YAML file.
//!
//! Seed drafts go through the normal [`EventStore::create`] pipeline, so
//! a seed file gets exactly the same validation and normalization as any
//! other write. Drafts whose slug already exists are logged and skipped,
//! which makes re-running the seeder against a populated database safe.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use gather_db::{DbError, EventStore};
use gather_types::EventDraft;

use crate::error::AdminError;

/// The parsed contents of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    /// Event drafts to create, in file order.
    pub events: Vec<EventDraft>,
}

/// Outcome of applying a seed file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Events created.
    pub created: usize,
    /// Drafts skipped because their slug already existed.
    pub skipped: usize,
}

/// Read and parse a seed file.
///
/// # Errors
///
/// Returns [`AdminError::SeedIo`] if the file cannot be read, or
/// [`AdminError::SeedParse`] if the content is not valid YAML.
pub fn load(path: &Path) -> Result<SeedFile, AdminError> {
    let contents = std::fs::read_to_string(path)?;
    let seed: SeedFile = serde_yml::from_str(&contents)?;
    Ok(seed)
}

/// Create every draft in the seed file through the store pipeline.
///
/// Duplicate slugs are skipped; any other rejection (validation, date,
/// time) aborts the run, since a broken seed file should be fixed rather
/// than partially applied.
///
/// # Errors
///
/// Returns [`AdminError::Db`] on the first non-duplicate failure.
pub async fn apply(store: &EventStore<'_>, seed: &SeedFile) -> Result<SeedSummary, AdminError> {
    let mut summary = SeedSummary::default();
    for draft in &seed.events {
        match store.create(draft).await {
            Ok(event) => {
                info!(slug = %event.slug, "seeded event");
                summary.created = summary.created.saturating_add(1);
            }
            Err(DbError::DuplicateSlug(slug)) => {
                warn!(%slug, "seed draft skipped, slug already exists");
                summary.skipped = summary.skipped.saturating_add(1);
            }
            Err(other) => return Err(other.into()),
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_file_parses_from_yaml() {
        let yaml = r"
events:
  - title: Rust Meetup Berlin
    description: An evening of talks and hacking.
    overview: Talks, pizza, and open hacking tables.
    image: https://example.org/covers/rust-meetup.png
    venue: c-base
    location: Berlin
    date: 2025-06-12
    time: '18:30'
    mode: offline
    audience: Rust developers of all levels
    agenda:
      - Doors open
      - Lightning talks
    organizer: Rust Berlin
    tags:
      - rust
      - meetup
";
        let seed = serde_yml::from_str::<SeedFile>(yaml).ok();
        let seed = seed.unwrap_or(SeedFile { events: vec![] });
        assert_eq!(seed.events.len(), 1);
        assert_eq!(
            seed.events.first().map(|e| e.time.as_str()),
            Some("18:30")
        );
    }

    #[test]
    fn seed_file_rejects_unknown_mode() {
        let yaml = r"
events:
  - title: Bad Mode
    description: d
    overview: o
    image: i
    venue: v
    location: l
    date: 2025-06-12
    time: '18:30'
    mode: in-person
    audience: a
    agenda: [x]
    organizer: g
    tags: [t]
";
        assert!(serde_yml::from_str::<SeedFile>(yaml).is_err());
    }
}
