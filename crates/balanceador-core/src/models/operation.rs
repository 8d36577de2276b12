//! Logical operations dispatched to every backend

use std::fmt;

use serde_json::Value;

/// One logical operation on the hunters resource
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `GET /cazadores`
    List,
    /// `GET /cazadores/buscar?nombre=<name>`
    FindByName(String),
    /// `POST /cazadores`
    Create(Value),
    /// `PUT /cazadores/:id`
    Update { id: String, body: Value },
    /// `DELETE /cazadores/:id`
    Delete { id: String },
}

impl Operation {
    /// Whether the operation may mutate backend state
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Operation::Create(_) | Operation::Update { .. } | Operation::Delete { .. }
        )
    }

    /// Short operation name, used as a structured log field
    pub fn name(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::FindByName(_) => "find_by_name",
            Operation::Create(_) => "create",
            Operation::Update { .. } => "update",
            Operation::Delete { .. } => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => write!(f, "list"),
            Operation::FindByName(name) => write!(f, "find_by_name({})", name),
            Operation::Create(_) => write!(f, "create"),
            Operation::Update { id, .. } => write!(f, "update({})", id),
            Operation::Delete { id } => write!(f, "delete({})", id),
        }
    }
}
