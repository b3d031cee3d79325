//! In-memory receipt store.

use std::collections::BTreeMap;

use super::{sort_records, ReceiptStore, Result};
use crate::error::StoreError;
use crate::models::receipt::ReceiptRecord;

/// Receipt store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, ReceiptRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ReceiptRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ReceiptStore for MemoryStore {
    fn insert(&mut self, record: ReceiptRecord) -> Result<()> {
        if self.records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<ReceiptRecord> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update(&mut self, record: ReceiptRecord) -> Result<()> {
        match self.records.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound(record.id)),
        }
    }

    fn remove(&mut self, id: &str) -> Result<ReceiptRecord> {
        self.records
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<ReceiptRecord>> {
        let mut records: Vec<_> = self.records.values().cloned().collect();
        sort_records(&mut records);
        Ok(records)
    }

    fn clear(&mut self) -> Result<usize> {
        let count = self.records.len();
        self.records.clear();
        Ok(count)
    }
}
