//! Enumeration types for the Gather event platform.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How attendees participate in an event.
///
/// Stored in the database as lowercase text (`online`, `offline`,
/// `hybrid`); membership is enforced both by this type and by a `CHECK`
/// constraint on the `events` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    /// Fully remote; attendees join over the internet.
    Online,
    /// Fully in-person at the listed venue.
    Offline,
    /// In-person venue with a remote attendance option.
    Hybrid,
}

impl EventMode {
    /// The lowercase text form stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
        }
    }

    /// Parse the stored text form back into the enum.
    ///
    /// Returns `None` for anything other than the three canonical
    /// lowercase values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "online" => Some(Self::Online),
            "offline" => Some(Self::Offline),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

impl core::fmt::Display for EventMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_text_roundtrip() {
        for mode in [EventMode::Online, EventMode::Offline, EventMode::Hybrid] {
            assert_eq!(EventMode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn mode_rejects_unknown_text() {
        assert_eq!(EventMode::parse("in-person"), None);
        assert_eq!(EventMode::parse("Online"), None);
        assert_eq!(EventMode::parse(""), None);
    }

    #[test]
    fn mode_serde_uses_lowercase() {
        let json = serde_json::to_string(&EventMode::Hybrid).ok();
        assert_eq!(json.as_deref(), Some("\"hybrid\""));
        let parsed: Result<EventMode, _> = serde_json::from_str("\"offline\"");
        assert_eq!(parsed.ok(), Some(EventMode::Offline));
    }
}
