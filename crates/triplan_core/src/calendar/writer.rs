//! Fixed-path calendar persistence.
//!
//! # Invariants
//! - Each flush replaces the whole file through a sibling temp file and rename,
//!   so readers see either the previous export or the new one.
//! - A failed flush leaves the previous file untouched.

use super::{render, CalendarError, CalendarResult};
use crate::store::itinerary_store::ItineraryStore;
use log::{error, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// File name used when no explicit path is configured.
pub const CALENDAR_FILE_NAME: &str = "trip_events.ics";

/// Returns `<temp_dir>/trip_events.ics`.
pub fn default_calendar_path() -> PathBuf {
    std::env::temp_dir().join(CALENDAR_FILE_NAME)
}

/// Writes the rendered store to one fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWriter {
    path: PathBuf,
}

impl CalendarWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the entire store and replaces the file at `path`.
    ///
    /// Returns the written path.
    ///
    /// # Errors
    /// - `CalendarError::Format` when a record cannot be rendered; nothing is written.
    /// - `CalendarError::Write` when the temp file cannot be created, written or renamed.
    pub fn flush(&self, store: &ItineraryStore) -> CalendarResult<PathBuf> {
        let started_at = Instant::now();
        let body = render(store)?;

        match self.replace_contents(body.as_bytes()) {
            Ok(()) => {
                info!(
                    "event=calendar_flush module=calendar status=ok events={} bytes={} duration_ms={} path={}",
                    store.len(),
                    body.len(),
                    started_at.elapsed().as_millis(),
                    self.path.display()
                );
                Ok(self.path.clone())
            }
            Err(source) => {
                error!(
                    "event=calendar_flush module=calendar status=error events={} duration_ms={} error_code=write_failed path={} error={}",
                    store.len(),
                    started_at.elapsed().as_millis(),
                    self.path.display(),
                    source
                );
                Err(CalendarError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    fn replace_contents(&self, bytes: &[u8]) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}
