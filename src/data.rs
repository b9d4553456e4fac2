//! Record model shared by the diff pipeline: identity keys, emptiness
//! semantics, and snapshot parsing.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DiffError;

/// Field that carries a record's identity across snapshots.
pub const ID_COLUMN: &str = "_id";

/// Sentinel displayed when a field has no surviving value in the target.
pub const DELETED_MARKER: &str = "DELETED";

/// One semi-structured record: an arbitrarily nested JSON object.
pub type Record = Map<String, Value>;

/// One collection of records representing a "before" or "after" state.
pub type Snapshot = Vec<Record>;

/// Identity key of a record.
///
/// Integer ids order numerically and sort ahead of text ids, giving the id
/// union a total order so report rows come out in a reproducible sequence.
/// Non-integer JSON numbers are carried as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    pub fn from_value(value: &Value, position: usize) -> Result<Self, DiffError> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(RecordId::Int(i)),
                None => Ok(RecordId::Text(n.to_string())),
            },
            Value::String(s) => Ok(RecordId::Text(s.clone())),
            other => Err(DiffError::InvalidIdentity {
                position,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(i) => write!(f, "{i}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Canonical emptiness test: absent, JSON null, or the empty string.
///
/// Numeric `0` and boolean `false` are real values and never count as
/// deleted.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Render a scalar for report cells: strings verbatim, everything else in
/// its JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a raw JSON document into a snapshot, rejecting anything that is
/// not an array of objects.
pub fn parse_snapshot(text: &str) -> Result<Snapshot, DiffError> {
    let parsed: Value = serde_json::from_str(text)
        .map_err(|err| DiffError::InvalidInput(format!("snapshot is not valid JSON: {err}")))?;
    let Value::Array(items) = parsed else {
        return Err(DiffError::InvalidInput(
            "snapshot must be a JSON array of records".to_string(),
        ));
    };
    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => records.push(map),
            other => {
                return Err(DiffError::InvalidInput(format!(
                    "snapshot element {position} is not an object: {other}"
                )));
            }
        }
    }
    Ok(records)
}
