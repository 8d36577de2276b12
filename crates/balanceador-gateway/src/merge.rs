//! Identity-keyed merge of records from several backends
//!
//! Records are folded into a [`RecordIndex`] in configured backend order.
//! A record keeps the position where its identity was first seen; a later
//! record with the same identity replaces the value in that position.

use std::collections::HashMap;

use balanceador_core::{Identity, Record};
use tracing::warn;

/// Ordered map from identity to record
#[derive(Debug, Default)]
pub struct RecordIndex {
    slots: Vec<Record>,
    positions: HashMap<Identity, usize>,
}

impl RecordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning `true` if it replaced an earlier one.
    ///
    /// Records without a resolvable identity get a slot of their own and
    /// never replace or get replaced.
    pub fn insert(&mut self, record: Record) -> bool {
        let Some(identity) = record.identity() else {
            warn!(record = %record.as_value(), "Record has no usable id or name, kept unmerged");
            self.slots.push(record);
            return false;
        };

        match self.positions.get(&identity) {
            Some(&position) => {
                self.slots[position] = record;
                true
            }
            None => {
                self.positions.insert(identity, self.slots.len());
                self.slots.push(record);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Records in first-seen order
    pub fn into_records(self) -> Vec<Record> {
        self.slots
    }
}

/// Merge per-backend record sequences, given in configured backend order
pub fn merge<I>(sources: I) -> Vec<Record>
where
    I: IntoIterator<Item = Vec<Record>>,
{
    let mut index = RecordIndex::new();
    for records in sources {
        for record in records {
            index.insert(record);
        }
    }
    index.into_records()
}
