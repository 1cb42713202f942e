//! Admin entry point for the Gather event platform.
//!
//! Connects to `PostgreSQL`, applies pending migrations, optionally seeds
//! events from a YAML file, and logs a listing summary. The deployed web
//! frontend consumes the same persistence layer; this binary exists so a
//! fresh database can be brought up without it.

mod config;
mod error;
mod seed;

use tracing::info;
use tracing_subscriber::EnvFilter;

use gather_db::{Database, EventStore};

use crate::config::AdminConfig;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// connects, migrates, seeds, and prints a summary of listed events.
///
/// # Errors
///
/// Returns an error if configuration is missing or any database step
/// fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("gather-admin starting");

    let config = AdminConfig::from_env()?;
    let db = Database::from_env()?;

    db.run_migrations().await?;

    let pool = db.pool().await?;
    let store = EventStore::new(pool);

    if let Some(path) = &config.seed_file {
        let seed = seed::load(path)?;
        info!(
            seed_file = %path.display(),
            drafts = seed.events.len(),
            "applying seed file"
        );
        let summary = seed::apply(&store, &seed).await?;
        info!(
            created = summary.created,
            skipped = summary.skipped,
            "seeding complete"
        );
    }

    let events = store.list(config.list_limit).await?;
    info!(count = events.len(), "events currently listed");
    for event in &events {
        info!(slug = %event.slug, date = %event.date, time = %event.time, title = %event.title, "event");
    }

    db.close().await;
    Ok(())
}
