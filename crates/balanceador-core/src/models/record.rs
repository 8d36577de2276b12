//! Hunter record and identity models

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field holding the explicit identity of a record
pub const ID_FIELD: &str = "id";

/// Fields accepted as fallback identity, in lookup order
pub const NAME_FIELDS: [&str; 2] = ["name", "nombre"];

/// A hunter record as returned by a backend.
///
/// Records are opaque beyond their identity: every attribute is carried
/// through untouched and serialized back exactly as the backend sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    /// Wrap a raw JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Resolve the identity used for deduplication.
    ///
    /// `id` wins when present, otherwise the name is used. Strings and
    /// numbers both resolve to their textual form, so `1` and `"1"` are the
    /// same identity. Returns `None` for non-objects and for records whose
    /// identity fields are missing, null, blank or not scalar.
    pub fn identity(&self) -> Option<Identity> {
        let fields = self.0.as_object()?;

        if let Some(id) = fields.get(ID_FIELD).and_then(scalar_key) {
            return Some(Identity::Id(id));
        }

        NAME_FIELDS
            .iter()
            .find_map(|field| fields.get(*field).and_then(scalar_key))
            .map(Identity::Name)
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the record, returning the underlying JSON value
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Canonical identity of a record.
///
/// Ids and names live in separate namespaces: a record with id `"Ana"`
/// and another named `"Ana"` are different entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Explicit `id` field
    Id(String),
    /// Fallback `name` / `nombre` field
    Name(String),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Id(id) => write!(f, "id:{}", id),
            Identity::Name(name) => write!(f, "name:{}", name),
        }
    }
}
