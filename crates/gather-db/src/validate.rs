//! Validation pipeline for event and booking writes.
//!
//! The write operations run an explicit sequence of named stages instead
//! of an implicit pre-save hook:
//!
//! 1. field rules (table-driven, first violation wins)
//! 2. slug derivation from the title
//! 3. date normalization to `YYYY-MM-DD`
//! 4. strict time validation against 24-hour `HH:MM`
//!
//! Every stage returns a tagged [`DbError`] on rejection; nothing here
//! touches the database. Mode membership needs no rule -- `EventMode` is
//! an enum, so an out-of-range mode cannot be represented.

use chrono::{DateTime, NaiveDate};

use gather_types::{BookingDraft, EventDraft};

use crate::error::DbError;

/// Canonical calendar date form.
const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted non-canonical date representations, tried in order.
///
/// Replaces the host-defined leniency of the original platform's date
/// parsing with an explicit list: ISO with or without zero padding,
/// slash-separated ISO and US ordering, and long or abbreviated month
/// names. Anything else is rejected.
const DATE_FALLBACK_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

// ---------------------------------------------------------------------------
// Stage 1: field rules
// ---------------------------------------------------------------------------

/// A single field-level constraint on a draft.
struct FieldRule<T> {
    /// Field the rule applies to.
    field: &'static str,
    /// Message reported when the rule is violated.
    message: &'static str,
    /// Returns true when the draft satisfies the rule.
    is_satisfied: fn(&T) -> bool,
}

/// Field rules for event creation and update, checked in declaration
/// order. The first violated rule identifies the rejection.
const EVENT_RULES: &[FieldRule<EventDraft>] = &[
    FieldRule {
        field: "title",
        message: "Title must be at least 3 characters long",
        is_satisfied: |d| d.title.trim().chars().count() >= 3,
    },
    FieldRule {
        field: "description",
        message: "Event description is required",
        is_satisfied: |d| !d.description.trim().is_empty(),
    },
    FieldRule {
        field: "overview",
        message: "Event overview is required",
        is_satisfied: |d| !d.overview.trim().is_empty(),
    },
    FieldRule {
        field: "image",
        message: "Event image URL is required",
        is_satisfied: |d| !d.image.trim().is_empty(),
    },
    FieldRule {
        field: "venue",
        message: "Event venue is required",
        is_satisfied: |d| !d.venue.trim().is_empty(),
    },
    FieldRule {
        field: "location",
        message: "Event location is required",
        is_satisfied: |d| !d.location.trim().is_empty(),
    },
    FieldRule {
        field: "date",
        message: "Event date is required",
        is_satisfied: |d| !d.date.trim().is_empty(),
    },
    FieldRule {
        field: "time",
        message: "Event time is required",
        is_satisfied: |d| !d.time.trim().is_empty(),
    },
    FieldRule {
        field: "audience",
        message: "Target audience is required",
        is_satisfied: |d| !d.audience.trim().is_empty(),
    },
    FieldRule {
        field: "agenda",
        message: "Agenda must be a non-empty list",
        is_satisfied: |d| !d.agenda.is_empty(),
    },
    FieldRule {
        field: "organizer",
        message: "Organizer name is required",
        is_satisfied: |d| !d.organizer.trim().is_empty(),
    },
    FieldRule {
        field: "tags",
        message: "Tags must be a non-empty list",
        is_satisfied: |d| !d.tags.is_empty(),
    },
];

/// Field rules for booking creation and update.
///
/// The email check runs against the normalized (trimmed, lowercased)
/// value, matching what the store persists.
const BOOKING_RULES: &[FieldRule<BookingDraft>] = &[FieldRule {
    field: "email",
    message: "Please provide a valid email address",
    is_satisfied: |d| is_valid_email(&normalize_email(&d.email)),
}];

/// Check a draft against a rule table, reporting the first violation.
fn check_rules<T>(draft: &T, rules: &[FieldRule<T>]) -> Result<(), DbError> {
    for rule in rules {
        if !(rule.is_satisfied)(draft) {
            return Err(DbError::Validation {
                field: rule.field,
                message: rule.message,
            });
        }
    }
    Ok(())
}

/// Validate the field-level constraints of an event draft.
///
/// # Errors
///
/// Returns [`DbError::Validation`] naming the first violated field.
pub fn validate_event_fields(draft: &EventDraft) -> Result<(), DbError> {
    check_rules(draft, EVENT_RULES)
}

/// Validate the field-level constraints of a booking draft.
///
/// # Errors
///
/// Returns [`DbError::Validation`] naming the first violated field.
pub fn validate_booking_fields(draft: &BookingDraft) -> Result<(), DbError> {
    check_rules(draft, BOOKING_RULES)
}

// ---------------------------------------------------------------------------
// Stage 2: slug derivation
// ---------------------------------------------------------------------------

/// Derive a URL-safe slug from an event title.
///
/// Lowercases and trims the title, strips every character outside word
/// characters, whitespace, and hyphens, then collapses whitespace and
/// hyphen runs into single hyphens. Deterministic and idempotent:
/// `slugify(slugify(t)) == slugify(t)` for any title.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut last_was_hyphen = false;
    for ch in kept.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !last_was_hyphen {
                slug.push('-');
            }
            last_was_hyphen = true;
        } else {
            slug.push(ch);
            last_was_hyphen = false;
        }
    }
    slug
}

// ---------------------------------------------------------------------------
// Stage 3: date normalization
// ---------------------------------------------------------------------------

/// Normalize a date string to canonical `YYYY-MM-DD` form.
///
/// Input already in canonical form is accepted verbatim. Anything else
/// is parsed against [`DATE_FALLBACK_FORMATS`] and RFC 3339, then
/// reformatted zero-padded.
///
/// # Errors
///
/// Returns [`DbError::InvalidDate`] when no representation matches.
pub fn normalize_date(raw: &str) -> Result<String, DbError> {
    if is_canonical_date(raw) {
        return Ok(raw.to_owned());
    }

    let trimmed = raw.trim();
    for format in DATE_FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format(CANONICAL_DATE_FORMAT).to_string());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive().format(CANONICAL_DATE_FORMAT).to_string());
    }

    Err(DbError::InvalidDate(raw.to_owned()))
}

/// Whether a string is exactly `\d{4}-\d{2}-\d{2}`.
fn is_canonical_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

// ---------------------------------------------------------------------------
// Stage 4: time validation
// ---------------------------------------------------------------------------

/// Require a time string in zero-padded 24-hour `HH:MM` form.
///
/// Unlike dates there is no reformatting fallback: values that are valid
/// times in another notation (`9:30`, `09:30 AM`) are rejected.
///
/// # Errors
///
/// Returns [`DbError::InvalidTime`] for anything non-canonical.
pub fn validate_time(raw: &str) -> Result<(), DbError> {
    if is_canonical_time(raw) {
        Ok(())
    } else {
        Err(DbError::InvalidTime(raw.to_owned()))
    }
}

/// Whether a string matches `([01]\d|2[0-3]):[0-5]\d` exactly.
fn is_canonical_time(value: &str) -> bool {
    let Some((hour, minute)) = value.split_once(':') else {
        return false;
    };
    if hour.len() != 2 || minute.len() != 2 {
        return false;
    }
    if !hour.bytes().all(|b| b.is_ascii_digit()) || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let h: u8 = hour.parse().unwrap_or(u8::MAX);
    let m: u8 = minute.parse().unwrap_or(u8::MAX);
    h <= 23 && m <= 59
}

// ---------------------------------------------------------------------------
// Email normalization
// ---------------------------------------------------------------------------

/// Normalize an email address: trim surrounding whitespace, lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether a string is a syntactically plausible email address:
/// non-empty local part, a single `@`, and a dotted domain, with no
/// whitespace anywhere.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .split_once('.')
        .is_some_and(|(host, rest)| !host.is_empty() && !rest.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use gather_types::EventMode;

    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Rust Meetup Berlin".to_owned(),
            description: "An evening of talks and hacking.".to_owned(),
            overview: "Talks, pizza, and open hacking tables.".to_owned(),
            image: "https://example.org/covers/rust-meetup.png".to_owned(),
            venue: "c-base".to_owned(),
            location: "Berlin".to_owned(),
            date: "2025-06-12".to_owned(),
            time: "18:30".to_owned(),
            mode: EventMode::Offline,
            audience: "Rust developers of all levels".to_owned(),
            agenda: vec!["Doors open".to_owned(), "Lightning talks".to_owned()],
            organizer: "Rust Berlin".to_owned(),
            tags: vec!["rust".to_owned(), "meetup".to_owned()],
        }
    }

    // --- slug -------------------------------------------------------------

    #[test]
    fn slug_strips_punctuation() {
        assert_eq!(slugify("My Cool Talk!!"), "my-cool-talk");
    }

    #[test]
    fn slug_is_deterministic_and_idempotent() {
        let titles = [
            "Rust Meetup Berlin",
            "  Intro to   async/await  ",
            "C++ <=> Rust interop",
            "--already--hyphenated--",
        ];
        for title in titles {
            let once = slugify(title);
            assert_eq!(once, slugify(title));
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn slug_collapses_whitespace_and_hyphen_runs() {
        assert_eq!(slugify("a   b"), "a-b");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("a---b"), "a-b");
    }

    #[test]
    fn slug_keeps_word_characters_only() {
        assert_eq!(slugify("Hack@Night #3 (2025)"), "hacknight-3-2025");
        assert_eq!(slugify("snake_case_title"), "snake_case_title");
    }

    // --- date -------------------------------------------------------------

    #[test]
    fn canonical_date_is_a_fixed_point() {
        assert_eq!(normalize_date("2025-03-05").unwrap(), "2025-03-05");
    }

    #[test]
    fn non_padded_date_gets_zero_padded() {
        assert_eq!(normalize_date("2025-3-5").unwrap(), "2025-03-05");
    }

    #[test]
    fn alternate_representations_normalize() {
        assert_eq!(normalize_date("03/05/2025").unwrap(), "2025-03-05");
        assert_eq!(normalize_date("March 5, 2025").unwrap(), "2025-03-05");
        assert_eq!(normalize_date("5 Mar 2025").unwrap(), "2025-03-05");
        assert_eq!(
            normalize_date("2025-03-05T18:30:00+02:00").unwrap(),
            "2025-03-05"
        );
    }

    #[test]
    fn normalized_output_shape_is_always_canonical() {
        for raw in ["2025-3-5", "12/31/2024", "Jan 1, 2030"] {
            let normalized = normalize_date(raw).unwrap();
            assert!(is_canonical_date(&normalized), "got {normalized}");
        }
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        for raw in ["next tuesday", "2025", "05-03", ""] {
            assert!(
                matches!(normalize_date(raw), Err(DbError::InvalidDate(_))),
                "expected rejection for {raw:?}"
            );
        }
    }

    // --- time -------------------------------------------------------------

    #[test]
    fn canonical_times_pass() {
        for raw in ["00:00", "09:30", "18:05", "23:59"] {
            assert!(validate_time(raw).is_ok(), "expected ok for {raw:?}");
        }
    }

    #[test]
    fn non_canonical_times_are_rejected_without_reformatting() {
        // Includes values that are valid times in other notations.
        for raw in ["9:30", "9:30 AM", "24:00", "12:60", "18.30", "1830", ""] {
            assert!(
                matches!(validate_time(raw), Err(DbError::InvalidTime(_))),
                "expected rejection for {raw:?}"
            );
        }
    }

    // --- email ------------------------------------------------------------

    #[test]
    fn email_normalization_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ada@Example.ORG "), "ada@example.org");
    }

    #[test]
    fn email_syntax_check() {
        assert!(is_valid_email("ada@example.org"));
        assert!(is_valid_email("dev+rsvp@mail.example.co"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("@example.org"));
        assert!(!is_valid_email("ada example@org.com"));
        assert!(!is_valid_email("ada@@example.org"));
        assert!(!is_valid_email(""));
    }

    // --- field rules ------------------------------------------------------

    #[test]
    fn valid_draft_passes_all_rules() {
        assert!(validate_event_fields(&draft()).is_ok());
    }

    #[test]
    fn short_title_names_the_title_field() {
        let mut d = draft();
        d.title = "Go".to_owned();
        let err = validate_event_fields(&d).unwrap_err();
        assert!(matches!(err, DbError::Validation { field: "title", .. }));
    }

    #[test]
    fn first_violated_rule_wins() {
        let mut d = draft();
        d.title = String::new();
        d.tags.clear();
        // Both title and tags are invalid; title is declared first.
        let err = validate_event_fields(&d).unwrap_err();
        assert!(matches!(err, DbError::Validation { field: "title", .. }));
    }

    #[test]
    fn empty_agenda_and_tags_are_rejected() {
        let mut d = draft();
        d.agenda.clear();
        let err = validate_event_fields(&d).unwrap_err();
        assert!(matches!(err, DbError::Validation { field: "agenda", .. }));

        let mut d = draft();
        d.tags.clear();
        let err = validate_event_fields(&d).unwrap_err();
        assert!(matches!(err, DbError::Validation { field: "tags", .. }));
    }

    #[test]
    fn blank_required_strings_are_rejected() {
        let mut d = draft();
        d.venue = "   ".to_owned();
        let err = validate_event_fields(&d).unwrap_err();
        assert!(matches!(err, DbError::Validation { field: "venue", .. }));
    }

    #[test]
    fn booking_email_rule_uses_normalized_value() {
        use gather_types::{BookingDraft, EventId};

        let ok = BookingDraft {
            event_id: EventId::new(),
            email: "  Ada@Example.ORG ".to_owned(),
        };
        assert!(validate_booking_fields(&ok).is_ok());

        let bad = BookingDraft {
            event_id: EventId::new(),
            email: "not-an-email".to_owned(),
        };
        let err = validate_booking_fields(&bad).unwrap_err();
        assert!(matches!(err, DbError::Validation { field: "email", .. }));
    }
}
