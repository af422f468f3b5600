//! Ordered, append-only itinerary store.

use crate::model::batch::EventBatch;
use crate::model::event::EventRecord;
use chrono::{DateTime, SubsecRound, Utc};
use log::debug;

/// Ordered collection of event records for one session.
///
/// Mutation requires `&mut self`; callers sharing a store across threads must
/// wrap insert and flush in one critical section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryStore {
    events: Vec<EventRecord>,
    stamp: DateTime<Utc>,
}

impl ItineraryStore {
    /// Creates an empty store stamped with the current time (whole seconds).
    pub fn new() -> Self {
        Self::with_stamp(Utc::now())
    }

    /// Creates an empty store with a caller-provided session stamp.
    ///
    /// The stamp is written as `DTSTAMP` on every exported event, so two
    /// stores with equal stamps and equal records export identical bytes.
    pub fn with_stamp(stamp: DateTime<Utc>) -> Self {
        Self {
            events: Vec::new(),
            stamp: stamp.trunc_subsecs(0),
        }
    }

    /// Appends one record or a list of records, preserving input order.
    ///
    /// Returns the number of records added.
    pub fn insert(&mut self, batch: impl Into<EventBatch>) -> usize {
        let records = batch.into().into_records();
        let added = records.len();
        self.events.extend(records);
        debug!(
            "event=store_insert module=store status=ok added={} total={}",
            added,
            self.events.len()
        );
        added
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn stamp(&self) -> DateTime<Utc> {
        self.stamp
    }
}

impl Default for ItineraryStore {
    fn default() -> Self {
        Self::new()
    }
}
