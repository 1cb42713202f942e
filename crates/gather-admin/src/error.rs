//! Error types for the admin tool.

use gather_db::DbError;

/// Errors that can occur while migrating or seeding.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A persistence-layer operation failed.
    #[error(transparent)]
    Db(#[from] DbError),

    /// The seed file could not be read from disk.
    #[error("failed to read seed file: {0}")]
    SeedIo(#[from] std::io::Error),

    /// The seed file is not valid YAML.
    #[error("failed to parse seed file: {0}")]
    SeedParse(#[from] serde_yml::Error),
}
