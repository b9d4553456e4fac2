//! Report schema derivation: the ordered superset of columns across the
//! flattened target records.

use std::collections::HashSet;

use crate::data::ID_COLUMN;
use crate::flatten::FlatRecord;

/// Build the ordered, deduplicated union of keys across the flattened
/// target-side records.
///
/// Only the target contributes: the report reads as "what the target looks
/// like, annotated with what changed", not a union schema across both
/// snapshots. Columns keep first-occurrence order, scanning records in
/// collection order and keys in insertion order; the identity column is
/// pinned to the front. Accumulation is an explicit ordered list, never map
/// iteration order.
pub fn build_schema(flat_records: &[FlatRecord]) -> Vec<String> {
    let mut columns = vec![ID_COLUMN.to_string()];
    let mut seen: HashSet<String> = HashSet::from([ID_COLUMN.to_string()]);
    for record in flat_records {
        for key in record.keys() {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use serde_json::json;

    fn flat(value: serde_json::Value) -> FlatRecord {
        match value {
            serde_json::Value::Object(map) => flatten(&map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn build_schema_keeps_first_seen_order_across_records() {
        let records = vec![
            flat(json!({ "_id": 1, "someKey": "HANGUP", "meta": { "subKey1": 1234 } })),
            flat(json!({
                "_id": 2,
                "someKey": "RINGING",
                "meta": { "subKey1": 5678, "subKey2": 207, "subKey3": 52 }
            })),
        ];

        assert_eq!(
            build_schema(&records),
            vec!["_id", "someKey", "meta.subKey1", "meta.subKey2", "meta.subKey3"]
        );
    }

    #[test]
    fn build_schema_deduplicates_shared_keys() {
        let records = vec![
            flat(json!({ "_id": 1, "name": "a" })),
            flat(json!({ "_id": 2, "name": "b" })),
        ];
        assert_eq!(build_schema(&records), vec!["_id", "name"]);
    }

    #[test]
    fn build_schema_pins_identity_column_first() {
        let records = vec![flat(json!({ "name": "a", "_id": 1 }))];
        assert_eq!(build_schema(&records), vec!["_id", "name"]);
    }

    #[test]
    fn build_schema_of_empty_collection_is_identity_only() {
        assert_eq!(build_schema(&[]), vec!["_id"]);
    }
}
