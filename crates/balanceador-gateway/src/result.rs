//! Aggregated results returned by the gateway

use balanceador_core::Record;
use serde::Serialize;
use serde_json::Value;

/// Identity-unique merged records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedList {
    pub total: usize,
    pub cazadores: Vec<Record>,
}

impl MergedList {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            total: records.len(),
            cazadores: records,
        }
    }
}

/// Outcome of a search across all backends.
///
/// `NotFound` covers both "no backend matched" and "every backend failed";
/// the two cases are deliberately not told apart.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Found(MergedList),
    NotFound,
}

/// Kind of write that was fanned out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
    Delete,
}

/// One backend's echo of a write, tagged with its provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteEcho {
    /// Backend that accepted the write
    pub servicio: String,
    /// What the backend answered
    pub cazador: Value,
}

/// Collected echoes of a write that at least one backend accepted
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    pub kind: WriteKind,
    pub echoes: Vec<WriteEcho>,
    /// Number of backends the write was sent to
    pub attempted: usize,
}

impl WriteSummary {
    /// Whether every backend accepted the write
    pub fn is_complete(&self) -> bool {
        self.echoes.len() == self.attempted
    }
}
