//! Calendar export of the itinerary store.
//!
//! # Responsibility
//! - Render the full store as iCalendar (RFC 5545) text.
//! - Persist the rendering to one fixed path, replacing prior content.
//!
//! # Invariants
//! - Every flush writes the entire store; there is no append path.
//! - Rendering is a pure function of store contents and session stamp.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod ics;
pub mod writer;

pub use ics::{check_record, render};
pub use writer::{default_calendar_path, CalendarWriter, CALENDAR_FILE_NAME};

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Serializer error for rendering and persistence.
#[derive(Debug)]
pub enum CalendarError {
    /// Record at `index` cannot be expressed in calendar format.
    Format { index: usize, message: String },
    /// Output path could not be written.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format { index, message } => {
                write!(f, "record #{index} cannot be written as a calendar event: {message}")
            }
            Self::Write { path, source } => {
                write!(f, "failed to write calendar `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Format { .. } => None,
            Self::Write { source, .. } => Some(source),
        }
    }
}
