//! Normalization of backend payloads into canonical records
//!
//! Backends disagree on response shapes: a search may answer with a single
//! `cazador` or a `cazadores` list, and a listing may be a bare array or be
//! missing altogether. Every shape is mapped to a plain `Vec<Record>` here,
//! and nothing in this module ever fails.

use balanceador_core::Record;
use serde_json::Value;
use tracing::debug;

/// Envelope key carrying the found flag
const FOUND_FIELD: &str = "found";
/// Envelope key carrying a single record
const SINGLE_FIELD: &str = "cazador";
/// Envelope key carrying a list of records
const LIST_FIELD: &str = "cazadores";

/// Normalize a `list` payload.
///
/// A bare array is taken as-is. An object carrying a `cazadores` array is
/// unwrapped. Anything else yields no records.
pub fn normalize_list(payload: &Value) -> Vec<Record> {
    match payload {
        Value::Array(items) => to_records(items),
        Value::Object(fields) => match fields.get(LIST_FIELD) {
            Some(Value::Array(items)) => to_records(items),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Shapes a search envelope can take
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEnvelope {
    /// `found` is false, missing or not a boolean
    NotFound,
    /// `found: true` with a `cazador` record
    Single(Record),
    /// `found: true` with a `cazadores` list
    Many(Vec<Record>),
    /// `found: true` with both fields present
    Both { single: Record, many: Vec<Record> },
    /// `found: true` with neither field present
    Neither,
}

impl SearchEnvelope {
    /// Classify a raw search payload
    pub fn parse(payload: &Value) -> Self {
        let Some(fields) = payload.as_object() else {
            return SearchEnvelope::NotFound;
        };

        if fields.get(FOUND_FIELD).and_then(Value::as_bool) != Some(true) {
            return SearchEnvelope::NotFound;
        }

        let single = match fields.get(SINGLE_FIELD) {
            Some(record @ Value::Object(_)) => Some(Record::new(record.clone())),
            _ => None,
        };
        let many = match fields.get(LIST_FIELD) {
            Some(Value::Array(items)) => Some(to_records(items)),
            _ => None,
        };

        match (single, many) {
            (Some(single), Some(many)) => SearchEnvelope::Both { single, many },
            (Some(single), None) => SearchEnvelope::Single(single),
            (None, Some(many)) => SearchEnvelope::Many(many),
            (None, None) => SearchEnvelope::Neither,
        }
    }

    /// Flatten into records, single record first
    pub fn into_records(self) -> Vec<Record> {
        match self {
            SearchEnvelope::NotFound => Vec::new(),
            SearchEnvelope::Single(record) => vec![record],
            SearchEnvelope::Many(records) => records,
            SearchEnvelope::Both { single, mut many } => {
                many.insert(0, single);
                many
            }
            SearchEnvelope::Neither => {
                debug!("Search envelope reports found without any record");
                Vec::new()
            }
        }
    }
}

/// Normalize a `find_by_name` payload
pub fn normalize_search(payload: &Value) -> Vec<Record> {
    SearchEnvelope::parse(payload).into_records()
}

fn to_records(items: &[Value]) -> Vec<Record> {
    items.iter().cloned().map(Record::new).collect()
}
