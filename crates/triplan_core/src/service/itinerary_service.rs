//! Itinerary session service.
//!
//! # Responsibility
//! - Own one store and one calendar writer for a planning session.
//! - Apply boundary validation and flush policy around every insertion.
//!
//! # Invariants
//! - A batch is committed all-or-nothing: it is checked against the
//!   serializer before the store grows.
//! - Under `FlushPolicy::EveryInsert`, each non-empty insert is followed by a
//!   full rewrite of the calendar file within the same call.
//! - Empty batches touch neither the store nor the file.

use crate::calendar::{check_record, CalendarError, CalendarWriter};
use crate::config::AppConfig;
use crate::model::batch::{EventBatch, RecordDecodeError};
use crate::model::event::WindowPolicy;
use crate::store::itinerary_store::ItineraryStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ItineraryResult<T> = Result<T, ItineraryError>;

/// When the calendar file is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Rewrite after every non-empty insert.
    #[default]
    EveryInsert,
    /// Buffer inserts and write once in [`ItineraryService::finish`].
    OnFinish,
}

impl FlushPolicy {
    /// Parses `every_insert|on_finish` (case-insensitive, `-` accepted).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "every_insert" => Some(Self::EveryInsert),
            "on_finish" => Some(Self::OnFinish),
            _ => None,
        }
    }
}

/// Error surfaced to tool callers for insert/flush operations.
#[derive(Debug)]
pub enum ItineraryError {
    MalformedRecord(RecordDecodeError),
    Calendar(CalendarError),
}

impl Display for ItineraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRecord(err) => write!(f, "malformed record: {err}"),
            Self::Calendar(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ItineraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedRecord(err) => Some(err),
            Self::Calendar(err) => Some(err),
        }
    }
}

impl From<RecordDecodeError> for ItineraryError {
    fn from(value: RecordDecodeError) -> Self {
        Self::MalformedRecord(value)
    }
}

impl From<CalendarError> for ItineraryError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

/// Confirmation returned by one insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReceipt {
    /// Records appended by this call.
    pub added: usize,
    /// Store size after this call.
    pub total: usize,
    /// Path written by this call; `None` when nothing was flushed.
    pub written_to: Option<PathBuf>,
}

/// Explicitly owned planning session: store + writer + policies.
#[derive(Debug)]
pub struct ItineraryService {
    store: ItineraryStore,
    writer: CalendarWriter,
    window_policy: WindowPolicy,
    flush_policy: FlushPolicy,
}

impl ItineraryService {
    pub fn new(store: ItineraryStore, writer: CalendarWriter) -> Self {
        Self {
            store,
            writer,
            window_policy: WindowPolicy::default(),
            flush_policy: FlushPolicy::default(),
        }
    }

    /// Starts an empty session using configured path and policies.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            ItineraryStore::new(),
            CalendarWriter::new(config.calendar_path.clone()),
        )
        .with_window_policy(config.window_policy)
        .with_flush_policy(config.flush_policy)
    }

    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    pub fn with_flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.flush_policy = policy;
        self
    }

    pub fn store(&self) -> &ItineraryStore {
        &self.store
    }

    pub fn calendar_path(&self) -> &Path {
        self.writer.path()
    }

    pub fn window_policy(&self) -> WindowPolicy {
        self.window_policy
    }

    pub fn flush_policy(&self) -> FlushPolicy {
        self.flush_policy
    }

    /// Inserts one record or a list and flushes according to policy.
    ///
    /// # Errors
    /// - `Calendar(Format)` when a record cannot be exported; the store is unchanged.
    /// - `Calendar(Write)` when the flush fails; the records stay in the store
    ///   and the next successful flush writes them.
    pub fn insert(&mut self, batch: impl Into<EventBatch>) -> ItineraryResult<InsertReceipt> {
        let batch = batch.into();
        if batch.is_empty() {
            return Ok(InsertReceipt {
                added: 0,
                total: self.store.len(),
                written_to: None,
            });
        }

        let offset = self.store.len();
        for (position, record) in batch.records().iter().enumerate() {
            if let Err(err) = check_record(offset + position, record) {
                warn!(
                    "event=itinerary_insert module=service status=rejected error_code=format error={}",
                    err
                );
                return Err(err.into());
            }
        }

        let added = self.store.insert(batch);
        let written_to = match self.flush_policy {
            FlushPolicy::EveryInsert => Some(self.writer.flush(&self.store)?),
            FlushPolicy::OnFinish => None,
        };
        info!(
            "event=itinerary_insert module=service status=ok added={} total={} flushed={}",
            added,
            self.store.len(),
            written_to.is_some()
        );

        Ok(InsertReceipt {
            added,
            total: self.store.len(),
            written_to,
        })
    }

    /// Decodes a tool payload (JSON object or array) and inserts it.
    ///
    /// Payload validation uses this session's window policy and fails before
    /// the store is touched.
    pub fn insert_json(&mut self, payload: &str) -> ItineraryResult<InsertReceipt> {
        let batch = match EventBatch::from_json(payload, self.window_policy) {
            Ok(batch) => batch,
            Err(err) => {
                warn!(
                    "event=itinerary_insert module=service status=rejected error_code=malformed_record payload_bytes={} error={}",
                    payload.len(),
                    err
                );
                return Err(err.into());
            }
        };
        self.insert(batch)
    }

    /// Writes the full store to the calendar path regardless of policy.
    pub fn flush(&self) -> ItineraryResult<PathBuf> {
        Ok(self.writer.flush(&self.store)?)
    }

    /// Ends the session with a final full export and returns the path.
    pub fn finish(&mut self) -> ItineraryResult<PathBuf> {
        let path = self.flush()?;
        info!(
            "event=session_finish module=service status=ok events={} path={}",
            self.store.len(),
            path.display()
        );
        Ok(path)
    }
}
