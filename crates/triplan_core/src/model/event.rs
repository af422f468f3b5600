//! Event record domain model.
//!
//! # Responsibility
//! - Define the itinerary item shared by store, serializer and tools.
//! - Validate provider payloads at the boundary, before they reach the store.
//!
//! # Invariants
//! - `title` is never empty after trimming.
//! - Under `WindowPolicy::Strict`, `end` is not earlier than `start`.
//! - Records are immutable once constructed.

use crate::model::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ordering rule applied to `start`/`end` during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPolicy {
    /// Reject records whose `end` precedes `start`.
    #[default]
    Strict,
    /// Accept reversed windows as-is.
    Lenient,
}

impl WindowPolicy {
    /// Parses `strict|lenient` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }
}

/// Validation failure for a single event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyTitle,
    InvalidTimestamp { field: &'static str, value: String },
    InvalidWindow { start: Timestamp, end: Timestamp },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::InvalidTimestamp { field, value } => {
                write!(f, "{field} is not a recognized timestamp: `{value}`")
            }
            Self::InvalidWindow { start, end } => {
                write!(f, "end ({end}) must be >= start ({start})")
            }
        }
    }
}

impl Error for EventValidationError {}

/// One itinerary item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventDraft")]
pub struct EventRecord {
    title: String,
    start: Timestamp,
    end: Timestamp,
}

impl EventRecord {
    /// Builds a validated record from typed parts.
    ///
    /// The title is trimmed before storage.
    pub fn new(
        title: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
        policy: WindowPolicy,
    ) -> Result<Self, EventValidationError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if policy == WindowPolicy::Strict && end.instant() < start.instant() {
            return Err(EventValidationError::InvalidWindow { start, end });
        }
        Ok(Self { title, start, end })
    }

    /// Builds a validated record from provider strings.
    pub fn parse(
        title: impl Into<String>,
        start: &str,
        end: &str,
        policy: WindowPolicy,
    ) -> Result<Self, EventValidationError> {
        let start = parse_field("start", start)?;
        let end = parse_field("end", end)?;
        Self::new(title, start, end, policy)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<Timestamp, EventValidationError> {
    Timestamp::parse(value).ok_or_else(|| EventValidationError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

/// Unvalidated wire shape emitted by booking providers.
///
/// Extra provider fields (`flight_id`, `hotel_name`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl EventDraft {
    pub fn validate(self, policy: WindowPolicy) -> Result<EventRecord, EventValidationError> {
        EventRecord::parse(self.title, &self.start, &self.end, policy)
    }
}

impl TryFrom<EventDraft> for EventRecord {
    type Error = EventValidationError;

    fn try_from(draft: EventDraft) -> Result<Self, Self::Error> {
        draft.validate(WindowPolicy::Strict)
    }
}
