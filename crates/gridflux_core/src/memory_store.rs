//! In-memory record store.

use crate::{GridError, Record, RecordDraft, RecordPatch, RecordStore};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// `RecordStore` over an in-memory vector.
///
/// Behaves like a remote store from the engine's point of view: `list`
/// hands out snapshots, `update` mutates in place, `create` appends.
pub struct MemoryRecordStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records_read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records_read().is_empty()
    }

    /// Read lock on the records, recovering from poison errors.
    fn records_read(&self) -> RwLockReadGuard<'_, Vec<Record>> {
        match self.records.read() {
            Ok(guard) => guard,
            Err(poison_err) => {
                log::warn!("Record store RwLock poisoned, recovering...");
                poison_err.into_inner()
            }
        }
    }

    /// Write lock on the records, recovering from poison errors.
    fn records_write(&self) -> RwLockWriteGuard<'_, Vec<Record>> {
        match self.records.write() {
            Ok(guard) => guard,
            Err(poison_err) => {
                log::warn!("Record store RwLock poisoned, recovering...");
                poison_err.into_inner()
            }
        }
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryRecordStore {
    fn list(&self) -> Result<Vec<Record>, GridError> {
        Ok(self.records_read().clone())
    }

    fn update(&self, record_id: Uuid, patch: RecordPatch) -> Result<(), GridError> {
        let mut records = self.records_write();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| GridError::NotFound(format!("No record with id {record_id}")))?;

        patch.apply_to(record);
        Ok(())
    }

    fn create(&self, draft: RecordDraft) -> Result<Record, GridError> {
        let record = draft.into_record();
        self.records_write().push(record.clone());
        Ok(record)
    }
}
