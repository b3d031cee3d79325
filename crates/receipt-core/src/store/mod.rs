//! Receipt storage.
//!
//! Records are keyed by id and listed in date order. [`MemoryStore`] keeps
//! everything in memory; [`JsonFileStore`] persists the same map to disk.

mod memory;
#[cfg(feature = "native")]
mod json_file;

pub use memory::MemoryStore;
#[cfg(feature = "native")]
pub use json_file::JsonFileStore;

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::receipt::ReceiptRecord;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Keyed receipt storage.
pub trait ReceiptStore {
    /// Add a new record. Fails if the id is taken.
    fn insert(&mut self, record: ReceiptRecord) -> Result<()>;

    /// Fetch a record by id.
    fn get(&self, id: &str) -> Result<ReceiptRecord>;

    /// Replace an existing record.
    fn update(&mut self, record: ReceiptRecord) -> Result<()>;

    /// Delete a record and return it.
    fn remove(&mut self, id: &str) -> Result<ReceiptRecord>;

    /// All records ordered by date, then creation time.
    fn list(&self) -> Result<Vec<ReceiptRecord>>;

    /// Delete everything. Returns the number of removed records.
    fn clear(&mut self) -> Result<usize>;

    /// Records whose date lies in the inclusive range. Open bounds are unlimited.
    fn list_between(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Vec<ReceiptRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| from.is_none_or(|d| r.date >= d) && to.is_none_or(|d| r.date <= d))
            .collect())
    }

    /// Resolve a full id from a unique prefix.
    fn resolve_id(&self, prefix: &str) -> Result<String> {
        let mut matches = self
            .list()?
            .into_iter()
            .filter(|r| r.id.starts_with(prefix))
            .map(|r| r.id);

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(StoreError::Ambiguous(prefix.to_string())),
            (None, _) => Err(StoreError::NotFound(prefix.to_string())),
        }
    }
}

fn sort_records(records: &mut [ReceiptRecord]) {
    records.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
}
