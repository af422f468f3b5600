//! Insertion batches and JSON payload decoding.
//!
//! A batch is either one record or an ordered list of records. Tool payloads
//! carry the same two shapes as a JSON object or a JSON array of objects.

use crate::model::event::{EventDraft, EventRecord, EventValidationError, WindowPolicy};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One record or an ordered sequence of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBatch {
    One(EventRecord),
    Many(Vec<EventRecord>),
}

impl EventBatch {
    /// Decodes a tool payload into a validated batch.
    ///
    /// # Contract
    /// - A JSON object decodes to `EventBatch::One`.
    /// - A JSON array decodes to `EventBatch::Many`, preserving element order.
    /// - Any invalid element rejects the whole payload.
    pub fn from_json(payload: &str, policy: WindowPolicy) -> Result<Self, RecordDecodeError> {
        let value: Value = serde_json::from_str(payload.trim()).map_err(RecordDecodeError::Json)?;
        match value {
            Value::Object(map) => decode_record(0, Value::Object(map), policy).map(Self::One),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| decode_record(index, item, policy))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Many),
            other => Err(RecordDecodeError::UnexpectedShape {
                found: json_type_label(&other),
            }),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> &[EventRecord] {
        match self {
            Self::One(record) => std::slice::from_ref(record),
            Self::Many(records) => records.as_slice(),
        }
    }

    /// Normalizes both shapes to an ordered list.
    pub fn into_records(self) -> Vec<EventRecord> {
        match self {
            Self::One(record) => vec![record],
            Self::Many(records) => records,
        }
    }
}

impl From<EventRecord> for EventBatch {
    fn from(value: EventRecord) -> Self {
        Self::One(value)
    }
}

impl From<Vec<EventRecord>> for EventBatch {
    fn from(value: Vec<EventRecord>) -> Self {
        Self::Many(value)
    }
}

/// Malformed tool payload.
#[derive(Debug)]
pub enum RecordDecodeError {
    /// Payload text is not JSON.
    Json(serde_json::Error),
    /// Payload is JSON but neither an object nor an array.
    UnexpectedShape { found: &'static str },
    /// Element at `index` lacks required string fields.
    InvalidShape { index: usize, message: String },
    /// Element at `index` has the right shape but fails validation.
    InvalidRecord {
        index: usize,
        source: EventValidationError,
    },
}

impl Display for RecordDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "payload is not valid JSON: {err}"),
            Self::UnexpectedShape { found } => write!(
                f,
                "expected a JSON object or an array of objects with title/start/end, got {found}"
            ),
            Self::InvalidShape { index, message } => {
                write!(f, "record #{index} is malformed: {message}")
            }
            Self::InvalidRecord { index, source } => {
                write!(f, "record #{index} is invalid: {source}")
            }
        }
    }
}

impl Error for RecordDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::UnexpectedShape { .. } => None,
            Self::InvalidShape { .. } => None,
            Self::InvalidRecord { source, .. } => Some(source),
        }
    }
}

fn decode_record(
    index: usize,
    value: Value,
    policy: WindowPolicy,
) -> Result<EventRecord, RecordDecodeError> {
    let draft: EventDraft =
        serde_json::from_value(value).map_err(|err| RecordDecodeError::InvalidShape {
            index,
            message: err.to_string(),
        })?;
    draft
        .validate(policy)
        .map_err(|source| RecordDecodeError::InvalidRecord { index, source })
}

fn json_type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
