//! Configuration for the admin tool.
//!
//! All configuration is loaded from environment variables. The database
//! URL itself is owned by [`gather_db::Database::from_env`]; this module
//! only covers the admin-specific knobs.

use std::path::PathBuf;

use crate::error::AdminError;

/// Default number of events shown in the post-run summary.
const DEFAULT_LIST_LIMIT: i64 = 50;

/// Admin tool configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Optional YAML file of event drafts to seed after migrating.
    pub seed_file: Option<PathBuf>,
    /// How many events to list in the summary log.
    pub list_limit: i64,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `SEED_FILE` -- path to a YAML seed file (no seeding when unset)
    /// - `LIST_LIMIT` -- events shown in the summary (default 50)
    pub fn from_env() -> Result<Self, AdminError> {
        let seed_file = std::env::var("SEED_FILE").ok().map(PathBuf::from);

        let list_limit: i64 = std::env::var("LIST_LIMIT")
            .unwrap_or_else(|_| DEFAULT_LIST_LIMIT.to_string())
            .parse()
            .map_err(|e| AdminError::Config(format!("invalid LIST_LIMIT: {e}")))?;

        Ok(Self {
            seed_file,
            list_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_limit_default() {
        // Verify the default value used in the from_env fallback.
        let parsed: i64 = DEFAULT_LIST_LIMIT.to_string().parse().unwrap_or(0);
        assert_eq!(parsed, 50);
    }
}
