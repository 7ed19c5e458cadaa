use crate::{FieldSchema, GridError, Record, RecordDraft, RecordPatch};
use uuid::Uuid;

/// Backing store for record data.
///
/// The engine interacts with records exclusively through this trait and
/// never reaches into storage internals. Implementations must be thread-safe
/// (`Send + Sync`) so saves can run off the UI thread. Two cells of the same
/// record saved concurrently are last-write-wins; the store is not expected
/// to merge or version-check.
pub trait RecordStore: Send + Sync {
    /// Fetch the full record set.
    fn list(&self) -> Result<Vec<Record>, GridError>;

    /// Apply a patch to one record.
    ///
    /// Returns `GridError::NotFound` if the record no longer exists.
    fn update(&self, record_id: Uuid, patch: RecordPatch) -> Result<(), GridError>;

    /// Create a record from a draft and return it with its assigned id.
    fn create(&self, draft: RecordDraft) -> Result<Record, GridError>;

    /// Fetch one record by id.
    ///
    /// The default implementation scans `list()`; stores with indexed
    /// lookup should override it.
    fn get(&self, record_id: Uuid) -> Result<Option<Record>, GridError> {
        Ok(self.list()?.into_iter().find(|r| r.id == record_id))
    }
}

/// Persistence for the column configuration.
///
/// `load` is called once at startup; `persist` whenever the user saves
/// schema changes. Implementations decide the storage medium (a JSON file,
/// a settings service, a browser-storage shim).
pub trait ConfigPersistence: Send + Sync {
    /// Load the persisted schema set. An empty result means nothing has
    /// been stored yet and the caller should fall back to defaults.
    fn load(&self) -> Result<Vec<FieldSchema>, GridError>;

    /// Persist the full schema set, replacing whatever was stored before.
    fn persist(&self, fields: &[FieldSchema]) -> Result<(), GridError>;
}
