//! Column configuration store.
//!
//! Owns the ordered list of field schemas behind one table instance. All
//! mutations are synchronous and local; only `save` crosses the persistence
//! boundary. Unsaved-change detection compares the live set against the last
//! persisted snapshot structurally, so undoing an edit by hand also clears
//! the dirty state.

use crate::{ConfigPersistence, FieldPatch, FieldSchema, GridError, default_fields};
use uuid::Uuid;

pub struct ColumnConfigStore {
    fields: Vec<FieldSchema>,
    persisted: Vec<FieldSchema>,
}

impl ColumnConfigStore {
    /// Store seeded with an already-persisted schema set.
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self {
            persisted: fields.clone(),
            fields,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_fields())
    }

    /// Load the schema set through the persistence collaborator, falling
    /// back to the built-in defaults when nothing has been stored yet.
    pub fn load_from(persistence: &dyn ConfigPersistence) -> Result<Self, GridError> {
        let stored = persistence.load()?;
        if stored.is_empty() {
            Ok(Self::with_defaults())
        } else {
            Ok(Self::new(stored))
        }
    }

    // --- Mutations ---

    /// Append a new field, assigning it the next display position.
    ///
    /// The field's freshly generated id is returned. Fails with
    /// `GridError::Validation` on an empty name or label, or when the name
    /// collides (case-insensitively) with an existing field.
    pub fn add_field(&mut self, mut field: FieldSchema) -> Result<Uuid, GridError> {
        self.validate_name(&field.name, &field.label, None)?;

        field.order = self.fields.len();
        let id = field.id;
        self.fields.push(field);
        Ok(id)
    }

    /// Merge a patch into the field with the given id.
    ///
    /// Identity and position are untouchable through this path; renaming
    /// onto an existing field is rejected.
    pub fn edit_field(&mut self, id: Uuid, patch: FieldPatch) -> Result<(), GridError> {
        let current = self
            .fields
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| GridError::NotFound(format!("No field with id {id}")))?;

        let name = patch.name.as_deref().unwrap_or(&current.name);
        let label = patch.label.as_deref().unwrap_or(&current.label);
        self.validate_name(name, label, Some(id))?;

        // Re-borrow mutably now that validation can no longer fail.
        if let Some(field) = self.fields.iter_mut().find(|f| f.id == id) {
            patch.apply_to(field);
        }
        Ok(())
    }

    /// Remove a field. Remaining `order` values are left as-is; ordering is
    /// by relative position, not contiguity, so gaps are fine.
    pub fn delete_field(&mut self, id: Uuid) -> Result<(), GridError> {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        if self.fields.len() == before {
            return Err(GridError::NotFound(format!("No field with id {id}")));
        }
        Ok(())
    }

    /// Flip a field's visibility, returning the new state. Never touches
    /// `order` or anything else.
    pub fn toggle_visibility(&mut self, id: Uuid) -> Result<bool, GridError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| GridError::NotFound(format!("No field with id {id}")))?;
        field.visible = !field.visible;
        Ok(field.visible)
    }

    /// Swap the fields at two positions of the order-sorted list, then
    /// renumber every field's `order` to its position, 0-based.
    ///
    /// This is a transposition, not an insert: dragging column 0 onto
    /// column 2 exchanges them and leaves column 1 where it was. Out-of-range
    /// indices make the whole call a no-op.
    pub fn reorder(&mut self, from_index: usize, to_index: usize) {
        let mut by_order: Vec<usize> = (0..self.fields.len()).collect();
        by_order.sort_by_key(|&i| self.fields[i].order);

        if from_index >= by_order.len() || to_index >= by_order.len() {
            log::debug!(
                "Ignoring reorder with out-of-range index: {} -> {} (len {})",
                from_index,
                to_index,
                by_order.len()
            );
            return;
        }

        by_order.swap(from_index, to_index);
        for (position, &i) in by_order.iter().enumerate() {
            self.fields[i].order = position;
        }
    }

    /// Persist the current schema set. On success the persisted snapshot is
    /// refreshed and the store reads as clean; on failure the snapshot (and
    /// therefore the dirty state) is untouched and the error is returned for
    /// the caller to surface.
    pub fn save(&mut self, persistence: &dyn ConfigPersistence) -> Result<(), GridError> {
        if let Err(err) = persistence.persist(&self.fields) {
            log::error!("Failed to persist column configuration: {err}");
            return Err(err);
        }
        self.persisted = self.fields.clone();
        Ok(())
    }

    /// Discard in-memory changes, reverting to the last persisted snapshot.
    pub fn reset(&mut self) {
        self.fields = self.persisted.clone();
    }

    // --- Queries ---

    pub fn has_unsaved_changes(&self) -> bool {
        self.fields != self.persisted
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All fields sorted by display order, visible or not. This is what the
    /// column manager lists and what reorder indices refer to.
    pub fn ordered_fields(&self) -> Vec<&FieldSchema> {
        let mut ordered: Vec<&FieldSchema> = self.fields.iter().collect();
        ordered.sort_by_key(|f| f.order);
        ordered
    }

    /// The rendered column set: visible fields sorted by display order.
    /// Also the field list the form generator consumes.
    pub fn visible_columns(&self) -> Vec<&FieldSchema> {
        let mut columns: Vec<&FieldSchema> = self.fields.iter().filter(|f| f.visible).collect();
        columns.sort_by_key(|f| f.order);
        columns
    }

    /// Names of the fields the global search stage looks inside.
    pub fn search_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.is_searchable())
            .map(|f| f.name.clone())
            .collect()
    }

    /// Fields rendered as filter dropdowns, in display order.
    pub fn dropdown_filter_fields(&self) -> Vec<&FieldSchema> {
        let mut filters: Vec<&FieldSchema> = self
            .fields
            .iter()
            .filter(|f| f.is_dropdown_filter())
            .collect();
        filters.sort_by_key(|f| f.order);
        filters
    }

    fn validate_name(
        &self,
        name: &str,
        label: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), GridError> {
        if name.trim().is_empty() {
            return Err(GridError::Validation("Field name is required".to_string()));
        }
        if label.trim().is_empty() {
            return Err(GridError::Validation("Field label is required".to_string()));
        }

        let lower = name.to_lowercase();
        let collides = self
            .fields
            .iter()
            .any(|f| Some(f.id) != exclude && f.name.to_lowercase() == lower);
        if collides {
            return Err(GridError::Validation(format!(
                "A field named \"{name}\" already exists"
            )));
        }
        Ok(())
    }
}

impl Default for ColumnConfigStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
