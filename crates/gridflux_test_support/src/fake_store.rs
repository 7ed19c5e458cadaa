use gridflux_core::{GridError, Record, RecordDraft, RecordPatch, RecordStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Scripted result for a store operation. `Success` runs the normal
/// in-memory behavior, which also makes it the way to clear a previously
/// scripted error mid-test.
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Success,
    Error(String),
}

impl FakeOutcome {
    pub(crate) fn check(&self) -> Result<(), GridError> {
        match self {
            Self::Success => Ok(()),
            Self::Error(message) => Err(GridError::Persistence(message.clone())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeStoreStats {
    pub list_calls: usize,
    pub updates: Vec<(Uuid, RecordPatch)>,
    pub creates: Vec<RecordDraft>,
}

#[derive(Default)]
struct FakeStoreState {
    records: RwLock<Vec<Record>>,
    list_outcome: RwLock<Option<FakeOutcome>>,
    update_outcome: RwLock<Option<FakeOutcome>>,
    create_outcome: RwLock<Option<FakeOutcome>>,
    list_calls: AtomicUsize,
    updates: Mutex<Vec<(Uuid, RecordPatch)>>,
    creates: Mutex<Vec<RecordDraft>>,
}

/// In-memory `RecordStore` with scriptable failures and call recording.
///
/// Clones share state, so a test can hand one handle to the code under
/// test and keep another for assertions. Every call is recorded before
/// its outcome is evaluated, so failed attempts show up in `stats()` too.
#[derive(Clone, Default)]
pub struct FakeRecordStore {
    state: Arc<FakeStoreState>,
}

impl FakeRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, records: Vec<Record>) -> Self {
        *rwlock_write(&self.state.records) = records;
        self
    }

    pub fn with_list_error(self, message: impl Into<String>) -> Self {
        *rwlock_write(&self.state.list_outcome) = Some(FakeOutcome::Error(message.into()));
        self
    }

    pub fn with_update_error(self, message: impl Into<String>) -> Self {
        *rwlock_write(&self.state.update_outcome) = Some(FakeOutcome::Error(message.into()));
        self
    }

    pub fn with_create_error(self, message: impl Into<String>) -> Self {
        *rwlock_write(&self.state.create_outcome) = Some(FakeOutcome::Error(message.into()));
        self
    }

    pub fn set_update_outcome(&self, outcome: FakeOutcome) {
        *rwlock_write(&self.state.update_outcome) = Some(outcome);
    }

    pub fn set_create_outcome(&self, outcome: FakeOutcome) {
        *rwlock_write(&self.state.create_outcome) = Some(outcome);
    }

    /// Snapshot of the current store contents.
    pub fn records(&self) -> Vec<Record> {
        rwlock_read(&self.state.records).clone()
    }

    pub fn stats(&self) -> FakeStoreStats {
        FakeStoreStats {
            list_calls: self.state.list_calls.load(Ordering::Relaxed),
            updates: mutex_lock(&self.state.updates).clone(),
            creates: mutex_lock(&self.state.creates).clone(),
        }
    }
}

impl RecordStore for FakeRecordStore {
    fn list(&self) -> Result<Vec<Record>, GridError> {
        self.state.list_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(outcome) = rwlock_read(&self.state.list_outcome).clone() {
            outcome.check()?;
        }

        Ok(rwlock_read(&self.state.records).clone())
    }

    fn update(&self, record_id: Uuid, patch: RecordPatch) -> Result<(), GridError> {
        mutex_lock(&self.state.updates).push((record_id, patch.clone()));

        if let Some(outcome) = rwlock_read(&self.state.update_outcome).clone() {
            outcome.check()?;
        }

        let mut records = rwlock_write(&self.state.records);
        let record = records
            .iter_mut()
            .find(|record| record.id == record_id)
            .ok_or_else(|| GridError::NotFound(format!("No record with id {record_id}")))?;

        patch.apply_to(record);
        Ok(())
    }

    fn create(&self, draft: RecordDraft) -> Result<Record, GridError> {
        mutex_lock(&self.state.creates).push(draft.clone());

        if let Some(outcome) = rwlock_read(&self.state.create_outcome).clone() {
            outcome.check()?;
        }

        let record = draft.into_record();
        rwlock_write(&self.state.records).push(record.clone());
        Ok(record)
    }
}

pub(crate) fn rwlock_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

pub(crate) fn rwlock_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

pub(crate) fn mutex_lock<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}
