//! Null pruning applied to event records before they are serialized.
//!
//! The ingestion API rejects explicit `null` fields, so every null is removed
//! at any depth. Empty objects or arrays left behind are kept as-is.

use serde_json::{Map, Value};

/// Recursively removes null values from `value`.
///
/// - `Null` stays `Null`
/// - Arrays drop null elements and keep the order of the rest
/// - Objects drop keys whose value is null
/// - Scalars are returned unchanged
pub fn prune(value: Value) -> Value {
    match value {
        Value::Array(elements) => Value::Array(prune_array(elements)),
        Value::Object(fields) => Value::Object(prune_object(fields)),
        scalar => scalar,
    }
}

/// Object form of [`prune`].
pub fn prune_object(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k, prune(v)))
        .collect()
}

fn prune_array(elements: Vec<Value>) -> Vec<Value> {
    elements
        .into_iter()
        .filter(|v| !v.is_null())
        .map(prune)
        .collect()
}

/// Returns true if no null appears anywhere below the root.
pub fn is_pruned(value: &Value) -> bool {
    match value {
        Value::Array(elements) => elements.iter().all(|v| !v.is_null() && is_pruned(v)),
        Value::Object(fields) => fields.values().all(|v| !v.is_null() && is_pruned(v)),
        _ => true,
    }
}
