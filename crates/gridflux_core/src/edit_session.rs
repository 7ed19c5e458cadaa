//! Per-cell inline edit state machine.
//!
//! One session per rendered cell. The session owns the displayed value, the
//! edit draft, and the save lifecycle; the caller owns the actual record
//! store call. Rollback on a failed save is a guaranteed transition here,
//! not call-site discipline: the displayed value reverts to the last
//! known-good value and the error message is kept on the session until the
//! caller takes it.

use crate::{FieldSchema, FieldType, GridError, RecordPatch, Value};

/// Lifecycle state of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellStatus {
    /// Showing the current value; no edit in progress.
    Viewing,

    /// Draft open in the editor.
    Editing,

    /// Commit handed to the record store; awaiting the outcome.
    Saving,

    /// Last save failed. Displays like Viewing, with a pending message.
    Error(String),
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Viewing
    }
}

impl CellStatus {
    pub fn is_viewing(&self) -> bool {
        matches!(self, Self::Viewing)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Saving)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Keys the cell editor reacts to: Enter commits, Escape cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Commit,
    Cancel,
}

/// How the editor for a field should present itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    SingleLine,
    MultiLine,
    /// Closed choice over the field's `options`.
    Select,
}

impl EditorKind {
    pub fn for_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Select => Self::Select,
            FieldType::LongText => Self::MultiLine,
            _ => Self::SingleLine,
        }
    }
}

/// A commit waiting on the record store.
///
/// Run the update, then feed the outcome back through
/// [`EditSession::resolve_save`] with the same token.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub field_name: String,
    pub value: Value,
    pub token: u64,
}

impl PendingSave {
    /// Single-attribute patch for `RecordStore::update`.
    pub fn patch(&self) -> RecordPatch {
        RecordPatch::single(self.field_name.clone(), self.value.clone())
    }
}

/// Inline edit state for one cell of one record.
///
/// The session never talks to the store itself: `commit` returns a
/// [`PendingSave`] and the caller reports the outcome back, so only one
/// save can be in flight per cell and a failure always rolls the display
/// back to the pre-edit value.
#[derive(Debug, Clone)]
pub struct EditSession {
    field_name: String,
    field_type: FieldType,
    original: Value,
    draft: String,
    status: CellStatus,
    /// Bumped on every commit; outcomes carrying an older token are stale.
    generation: u64,
    /// Snapshot refresh that arrived mid-edit, applied once the session
    /// returns to Viewing without a successful commit.
    pending_refresh: Option<Value>,
}

impl EditSession {
    /// New session over a cell in Viewing state.
    pub fn new(field: &FieldSchema, value: Value) -> Self {
        Self {
            field_name: field.name.clone(),
            field_type: field.field_type,
            original: value,
            draft: String::new(),
            status: CellStatus::Viewing,
            generation: 0,
            pending_refresh: None,
        }
    }

    // --- Queries ---

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn status(&self) -> &CellStatus {
        &self.status
    }

    /// The value the cell currently shows. Unaffected by an open draft and
    /// restored exactly on cancel or failed save.
    pub fn displayed_value(&self) -> &Value {
        &self.original
    }

    /// Current editor buffer; empty outside of Editing.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn editor_kind(&self) -> EditorKind {
        EditorKind::for_type(self.field_type)
    }

    // --- Transitions ---

    /// Open the editor, seeding the draft from the displayed value.
    ///
    /// Returns `true` if this call opened it. Ignored while a save is in
    /// flight; re-entering from Error drops the stale message.
    pub fn begin_edit(&mut self) -> bool {
        match self.status {
            CellStatus::Viewing | CellStatus::Error(_) => {
                self.draft = self.original.as_form_string();
                self.status = CellStatus::Editing;
                true
            }
            CellStatus::Editing => false,
            CellStatus::Saving => {
                log::debug!("Ignoring edit of {} while a save is in flight", self.field_name);
                false
            }
        }
    }

    /// Replace the draft text. Ignored outside of Editing.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        if self.status.is_editing() {
            self.draft = draft.into();
        }
    }

    /// Close the editor and discard the draft. The displayed value is
    /// untouched. Cannot abort a save already in flight.
    pub fn cancel(&mut self) {
        match self.status {
            CellStatus::Editing | CellStatus::Error(_) => {
                self.draft.clear();
                self.status = CellStatus::Viewing;
                self.apply_pending_refresh();
            }
            CellStatus::Saving => {
                log::debug!("Ignoring cancel of {} while a save is in flight", self.field_name);
            }
            CellStatus::Viewing => {}
        }
    }

    /// Commit the draft.
    ///
    /// A draft equal to the displayed value's editable form goes straight
    /// back to Viewing and returns `None`; the store is not involved.
    /// Otherwise the session enters Saving and the returned [`PendingSave`]
    /// carries the typed value for the caller to persist.
    pub fn commit(&mut self) -> Option<PendingSave> {
        if !self.status.is_editing() {
            return None;
        }

        if self.draft == self.original.as_form_string() {
            self.draft.clear();
            self.status = CellStatus::Viewing;
            self.apply_pending_refresh();
            return None;
        }

        self.status = CellStatus::Saving;
        self.generation += 1;
        Some(PendingSave {
            field_name: self.field_name.clone(),
            value: self.field_type.coerce(&self.draft),
            token: self.generation,
        })
    }

    /// Feed a save outcome back into the session.
    ///
    /// Success makes the committed value the displayed value and discards
    /// any stashed refresh (the commit is newer). Failure rolls the display
    /// back to the pre-edit value and parks the message in
    /// [`CellStatus::Error`]. Outcomes for a stale token are dropped.
    pub fn resolve_save(&mut self, token: u64, outcome: Result<(), GridError>) {
        if !self.status.is_saving() || token != self.generation {
            log::warn!(
                "Dropping stale save result for {} (token {token}, current {})",
                self.field_name,
                self.generation
            );
            return;
        }

        match outcome {
            Ok(()) => {
                self.original = self.field_type.coerce(&self.draft);
                self.draft.clear();
                self.status = CellStatus::Viewing;
                self.pending_refresh = None;
            }
            Err(err) => {
                self.draft.clear();
                self.status = CellStatus::Error(err.to_string());
                self.apply_pending_refresh();
            }
        }
    }

    /// Apply a refreshed snapshot value for this cell.
    ///
    /// Applied immediately in Viewing and Error; stashed while Editing or
    /// Saving so an open draft is never clobbered, and applied when the
    /// session next returns to Viewing without a successful commit.
    pub fn external_refresh(&mut self, value: Value) {
        match self.status {
            CellStatus::Viewing | CellStatus::Error(_) => self.original = value,
            CellStatus::Editing | CellStatus::Saving => self.pending_refresh = Some(value),
        }
    }

    /// Take the pending error message, returning the cell to Viewing.
    pub fn take_error(&mut self) -> Option<String> {
        if let CellStatus::Error(msg) = &self.status {
            let msg = msg.clone();
            self.status = CellStatus::Viewing;
            return Some(msg);
        }
        None
    }

    /// Keyboard contract: Enter commits, Escape cancels.
    pub fn handle_key(&mut self, key: EditKey) -> Option<PendingSave> {
        match key {
            EditKey::Commit => self.commit(),
            EditKey::Cancel => {
                self.cancel();
                None
            }
        }
    }

    fn apply_pending_refresh(&mut self) {
        if let Some(value) = self.pending_refresh.take() {
            self.original = value;
        }
    }
}
