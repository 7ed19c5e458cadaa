use crate::fake_store::{FakeOutcome, rwlock_read, rwlock_write};
use gridflux_core::{ConfigPersistence, FieldSchema, GridError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default)]
pub struct FakeConfigStats {
    pub load_calls: usize,
    pub persist_calls: usize,
}

#[derive(Default)]
struct FakeConfigState {
    stored: RwLock<Vec<FieldSchema>>,
    load_outcome: RwLock<Option<FakeOutcome>>,
    persist_outcome: RwLock<Option<FakeOutcome>>,
    load_calls: AtomicUsize,
    persist_calls: AtomicUsize,
}

/// In-memory `ConfigPersistence` with scriptable failures.
///
/// A scripted persist error leaves the stored contents untouched, the way
/// a failed file write leaves the file.
#[derive(Clone, Default)]
pub struct FakeConfigPersistence {
    state: Arc<FakeConfigState>,
}

impl FakeConfigPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(self, fields: Vec<FieldSchema>) -> Self {
        *rwlock_write(&self.state.stored) = fields;
        self
    }

    pub fn with_load_error(self, message: impl Into<String>) -> Self {
        *rwlock_write(&self.state.load_outcome) = Some(FakeOutcome::Error(message.into()));
        self
    }

    pub fn with_persist_error(self, message: impl Into<String>) -> Self {
        *rwlock_write(&self.state.persist_outcome) = Some(FakeOutcome::Error(message.into()));
        self
    }

    pub fn set_persist_outcome(&self, outcome: FakeOutcome) {
        *rwlock_write(&self.state.persist_outcome) = Some(outcome);
    }

    /// Snapshot of what is currently stored.
    pub fn stored(&self) -> Vec<FieldSchema> {
        rwlock_read(&self.state.stored).clone()
    }

    pub fn stats(&self) -> FakeConfigStats {
        FakeConfigStats {
            load_calls: self.state.load_calls.load(Ordering::Relaxed),
            persist_calls: self.state.persist_calls.load(Ordering::Relaxed),
        }
    }
}

impl ConfigPersistence for FakeConfigPersistence {
    fn load(&self) -> Result<Vec<FieldSchema>, GridError> {
        self.state.load_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(outcome) = rwlock_read(&self.state.load_outcome).clone() {
            outcome.check()?;
        }

        Ok(rwlock_read(&self.state.stored).clone())
    }

    fn persist(&self, fields: &[FieldSchema]) -> Result<(), GridError> {
        self.state.persist_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(outcome) = rwlock_read(&self.state.persist_outcome).clone() {
            outcome.check()?;
        }

        *rwlock_write(&self.state.stored) = fields.to_vec();
        Ok(())
    }
}
