//! Per-field change classification between two identity-matched records.

use serde::Serialize;

use crate::data::is_empty;
use crate::flatten::FlatRecord;

/// Change markers for one cell.
///
/// The flags are independent rather than a single enum: a field whose value
/// empties out between snapshots is simultaneously `changed` (the value
/// differs) and `deleted` (the new value is empty). Renderers choose the
/// presentation for the combined state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeFlags {
    pub added: bool,
    pub changed: bool,
    pub deleted: bool,
}

impl ChangeFlags {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn added() -> Self {
        Self {
            added: true,
            ..Self::default()
        }
    }

    pub fn deleted() -> Self {
        Self {
            deleted: true,
            ..Self::default()
        }
    }

    pub fn is_unchanged(self) -> bool {
        !self.added && !self.changed && !self.deleted
    }
}

/// Classify one field of one identity-matched row.
///
/// Whole-row cases come first: a row present only in the target is added, a
/// row present only in the source is deleted. When both rows exist the field
/// values decide: an empty target value marks the field deleted, a value
/// difference marks it changed (type-sensitive JSON equality), and a value
/// appearing where the source had none marks it added. Pure function of its
/// arguments; no hidden state, no order dependence.
pub fn classify(
    source: Option<&FlatRecord>,
    target: Option<&FlatRecord>,
    column: &str,
) -> ChangeFlags {
    match (source, target) {
        (None, None) => ChangeFlags::unchanged(),
        (None, Some(_)) => ChangeFlags::added(),
        (Some(_), None) => ChangeFlags::deleted(),
        (Some(source), Some(target)) => {
            let source_value = source.get(column);
            let target_value = target.get(column);
            ChangeFlags {
                added: !is_empty(target_value) && is_empty(source_value),
                changed: source_value != target_value,
                deleted: is_empty(target_value),
            }
        }
    }
}
