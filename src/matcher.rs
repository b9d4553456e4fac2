//! Identity matching: index one flattened snapshot by `_id` and compute the
//! ordered union of ids across two indexes.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::warn;

use crate::data::{ID_COLUMN, Record, RecordId};
use crate::error::DiffError;
use crate::flatten::{FlatRecord, PATH_SEPARATOR};

/// Identity lookup over one flattened snapshot.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    records: BTreeMap<RecordId, FlatRecord>,
}

impl IdentityIndex {
    /// Index records by their `_id`.
    ///
    /// A record missing its identity fails with
    /// [`DiffError::MissingIdentity`]; an object or array `_id` (visible
    /// here as flattened `_id.`-prefixed paths) fails with
    /// [`DiffError::InvalidIdentity`]. A duplicated identity keeps the
    /// later record (last-write-wins) — a caller-visible ambiguity, not a
    /// failure.
    pub fn build(flat_records: &[FlatRecord]) -> Result<Self, DiffError> {
        let mut records = BTreeMap::new();
        for (position, record) in flat_records.iter().enumerate() {
            let raw = match record.get(ID_COLUMN) {
                Some(value) => value,
                None => {
                    let prefix = format!("{ID_COLUMN}{PATH_SEPARATOR}");
                    let nested: Record = record
                        .iter()
                        .filter_map(|(key, value)| {
                            key.strip_prefix(&prefix)
                                .map(|path| (path.to_string(), value.clone()))
                        })
                        .collect();
                    if !nested.is_empty() {
                        return Err(DiffError::InvalidIdentity {
                            position,
                            value: serde_json::Value::Object(nested).to_string(),
                        });
                    }
                    return Err(DiffError::MissingIdentity {
                        position,
                        record: serde_json::Value::Object(record.clone()).to_string(),
                    });
                }
            };
            let id = RecordId::from_value(raw, position)?;
            if records.insert(id.clone(), record.clone()).is_some() {
                warn!("duplicate id {id} in snapshot; keeping the later record");
            }
        }
        Ok(Self { records })
    }

    pub fn get(&self, id: &RecordId) -> Option<&FlatRecord> {
        self.records.get(id)
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.records.keys()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Every id present in either index, ascending.
///
/// Both key iterators are already sorted, so a merge plus dedup yields the
/// sorted union in one pass.
pub fn union_ids(source: &IdentityIndex, target: &IdentityIndex) -> Vec<RecordId> {
    source.ids().merge(target.ids()).dedup().cloned().collect()
}
