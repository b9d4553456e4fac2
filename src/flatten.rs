//! Collapses arbitrarily nested records into single-level dotted-path maps.

use serde_json::{Map, Value};

use crate::data::Record;

pub const PATH_SEPARATOR: &str = ".";

/// A record collapsed to one level: dotted path → scalar value. Paths are
/// unique within one record and never map to a nested structure.
pub type FlatRecord = Map<String, Value>;

/// Collapse a nested record into a single-level map keyed by dotted path.
///
/// Nested objects extend the path with [`PATH_SEPARATOR`]; arrays are walked
/// by index like any other container, so `tags: ["a"]` becomes `tags.0`
/// (known limitation of the report format, not specially handled). A literal
/// key containing the separator (`"a.b"`) collides with the path of a nested
/// `a: {b: …}` and the later insertion wins — same limitation. The input is
/// never mutated; depth is bounded only by the stack.
pub fn flatten(record: &Record) -> FlatRecord {
    let mut flat = FlatRecord::new();
    for (key, value) in record {
        flatten_value(value, key, &mut flat);
    }
    flat
}

fn flatten_value(value: &Value, path: &str, flat: &mut FlatRecord) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                flatten_value(nested, &join_path(path, key), flat);
            }
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                flatten_value(nested, &join_path(path, &index.to_string()), flat);
            }
        }
        scalar => {
            flat.insert(path.to_string(), scalar.clone());
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    format!("{prefix}{PATH_SEPARATOR}{key}")
}
