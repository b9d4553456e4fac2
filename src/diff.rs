//! Diff assembly: orchestrates flattening, schema derivation, identity
//! matching, and per-field classification into one complete [`DiffResult`].

use serde::Serialize;

use crate::classify::{ChangeFlags, classify};
use crate::data::{DELETED_MARKER, ID_COLUMN, Record, RecordId, display_value, is_empty};
use crate::error::DiffError;
use crate::flatten::{FlatRecord, flatten};
use crate::matcher::{IdentityIndex, union_ids};
use crate::schema::build_schema;

/// One resolved (row, column) intersection: a display value and its change
/// classification.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    pub value: String,
    pub flags: ChangeFlags,
}

#[derive(Debug, Serialize)]
pub struct DiffRow {
    pub id: RecordId,
    pub cells: Vec<Cell>,
}

/// Complete comparison of two snapshots: the target-derived column schema,
/// one row per id in the union, and one classified cell per column in every
/// row — no gaps.
#[derive(Debug, Serialize)]
pub struct DiffResult {
    pub columns: Vec<String>,
    pub rows: Vec<DiffRow>,
}

/// Compare two snapshots.
///
/// Flattens both sides, indexes them by `_id`, derives the column schema
/// from the target, and classifies every (id, column) pair across the
/// sorted id union. Stateless and deterministic: every artifact is computed
/// fresh per call, so repeated invocations cannot influence each other.
pub fn diff(source: &[Record], target: &[Record]) -> Result<DiffResult, DiffError> {
    let source_flat: Vec<FlatRecord> = source.iter().map(flatten).collect();
    let target_flat: Vec<FlatRecord> = target.iter().map(flatten).collect();

    let source_index = IdentityIndex::build(&source_flat)?;
    let target_index = IdentityIndex::build(&target_flat)?;

    let columns = build_schema(&target_flat);
    let ids = union_ids(&source_index, &target_index);

    let mut rows = Vec::with_capacity(ids.len());
    for id in ids {
        let source_record = source_index.get(&id);
        let target_record = target_index.get(&id);
        let cells = columns
            .iter()
            .map(|column| Cell {
                value: resolve_display(target_record, column, &id),
                flags: classify(source_record, target_record, column),
            })
            .collect();
        rows.push(DiffRow { id, cells });
    }

    Ok(DiffResult { columns, rows })
}

/// Display rule: the target's value when it is non-empty, the `DELETED`
/// sentinel otherwise — except the identity column, which always shows the
/// id so a row stays identifiable even after it vanished from the target.
fn resolve_display(target: Option<&FlatRecord>, column: &str, id: &RecordId) -> String {
    if column == ID_COLUMN {
        return id.to_string();
    }
    match target.and_then(|record| record.get(column)) {
        Some(value) if !is_empty(Some(value)) => display_value(value),
        _ => DELETED_MARKER.to_string(),
    }
}
