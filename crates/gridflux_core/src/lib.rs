mod config_store;
mod edit_session;
mod error;
mod file_store;
mod form;
mod memory_store;
mod pipeline;
mod record;
mod reorder;
mod schema;
mod traits;
mod value;

pub use config_store::ColumnConfigStore;
pub use edit_session::{CellStatus, EditKey, EditSession, EditorKind, PendingSave};
pub use error::GridError;
pub use file_store::FileConfigStore;
pub use form::{FormField, FormValues, InputKind, RecordForm, is_valid_email, is_valid_phone};
pub use memory_store::MemoryRecordStore;
pub use pipeline::{PageWindow, QueryParams, SortDirection, SortKey};
pub use record::{Record, RecordDraft, RecordPatch};
pub use reorder::{ColumnSwap, ReorderController};
pub use schema::{FieldPatch, FieldSchema, FieldType, default_fields};
pub use traits::{ConfigPersistence, RecordStore};
pub use value::Value;

pub use chrono;
