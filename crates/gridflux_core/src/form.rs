//! Schema-driven create/edit forms.
//!
//! A `RecordForm` is built from the visible field schemas and renders
//! without any per-field hardcoding: each schema maps to an input
//! descriptor, validation runs over the declared constraints, and a clean
//! submit hands the full value map to the record store.

use crate::{FieldSchema, FieldType, GridError, Record, RecordDraft, RecordPatch, RecordStore};
use std::collections::HashMap;
use uuid::Uuid;

/// Values collected from a form, keyed by field name.
pub type FormValues = HashMap<String, String>;

/// Renderer selection for one input. One-to-one with the field type; the
/// semantic variants exist so a renderer can pick keyboard hints and
/// widgets without re-inspecting the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Phone,
    Number,
    Date,
    Select { options: Vec<String> },
    Boolean,
    MultiLine,
}

impl InputKind {
    pub fn for_field(field: &FieldSchema) -> Self {
        match field.field_type {
            FieldType::Text => Self::Text,
            FieldType::Email => Self::Email,
            FieldType::Phone => Self::Phone,
            FieldType::Number => Self::Number,
            FieldType::Date => Self::Date,
            // A select with no options degrades to plain text instead of
            // rendering an empty closed choice.
            FieldType::Select if field.options.is_empty() => Self::Text,
            FieldType::Select => Self::Select {
                options: field.options.clone(),
            },
            FieldType::Boolean => Self::Boolean,
            FieldType::LongText => Self::MultiLine,
        }
    }
}

/// One renderable input: schema projection plus current value and pending
/// validation message.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input: InputKind,
    pub required: bool,
    pub description: String,
    pub value: String,
    pub error: Option<String>,
}

/// Create/edit form over a set of visible fields.
///
/// Callers typically pass `ColumnConfigStore::visible_columns`. Whether
/// submit creates or updates is decided by how the form was opened, not by
/// the caller at submit time.
#[derive(Debug, Clone)]
pub struct RecordForm {
    fields: Vec<FieldSchema>,
    values: FormValues,
    errors: HashMap<String, String>,
    existing: Option<Uuid>,
}

impl RecordForm {
    /// Form for a new record. Initial values come from each field's
    /// declared default.
    pub fn create(fields: Vec<FieldSchema>) -> Self {
        Self::build(fields, None)
    }

    /// Form over an existing record. Initial values come from the record,
    /// falling back to the field default, else empty.
    pub fn edit(fields: Vec<FieldSchema>, record: &Record) -> Self {
        Self::build(fields, Some(record))
    }

    fn build(mut fields: Vec<FieldSchema>, record: Option<&Record>) -> Self {
        fields.sort_by_key(|f| f.order);

        let values = fields
            .iter()
            .map(|field| (field.name.clone(), initial_value(field, record)))
            .collect();

        Self {
            fields,
            values,
            errors: HashMap::new(),
            existing: record.map(|r| r.id),
        }
    }

    // --- Queries ---

    pub fn is_edit(&self) -> bool {
        self.existing.is_some()
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Render descriptors in display order.
    pub fn form_fields(&self) -> Vec<FormField> {
        self.fields
            .iter()
            .map(|field| FormField {
                name: field.name.clone(),
                label: field.label.clone(),
                input: InputKind::for_field(field),
                required: field.required,
                description: field.description.clone(),
                value: self.value(&field.name).to_string(),
                error: self.errors.get(&field.name).cloned(),
            })
            .collect()
    }

    // --- Mutations ---

    /// Replace one field's value. Editing a field clears its pending
    /// validation message.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.errors.remove(&name);
        self.values.insert(name, value.into());
    }

    /// Validate every field against its declared constraints, replacing the
    /// message map. Returns `true` when the form is clean.
    pub fn validate(&mut self) -> bool {
        let mut errors = HashMap::new();
        for field in &self.fields {
            if let Some(message) = validate_field(field, self.value(&field.name)) {
                errors.insert(field.name.clone(), message);
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and, when clean, persist the full value map through the
    /// record store: `update` when the form was opened over an existing
    /// record, `create` otherwise. Returns the stored record so the caller
    /// can refresh its snapshot and close the form.
    ///
    /// A failed validation leaves the per-field messages in place and never
    /// touches the store; no partial submit happens.
    pub fn submit(&mut self, store: &dyn RecordStore) -> Result<Record, GridError> {
        if !self.validate() {
            return Err(GridError::Validation(
                "Form has invalid fields".to_string(),
            ));
        }

        let changes: Vec<_> = self
            .fields
            .iter()
            .map(|field| {
                (
                    field.name.clone(),
                    field.field_type.coerce(self.value(&field.name)),
                )
            })
            .collect();

        match self.existing {
            Some(id) => {
                store.update(id, RecordPatch::new(changes))?;
                store
                    .get(id)?
                    .ok_or_else(|| GridError::NotFound(format!("No record with id {id}")))
            }
            None => {
                let mut draft = RecordDraft::new();
                for (name, value) in changes {
                    draft = draft.with_attribute(name, value);
                }
                store.create(draft)
            }
        }
    }

    /// Abandon the form, dropping all pending validation state.
    pub fn cancel(&mut self) {
        self.errors.clear();
    }
}

fn initial_value(field: &FieldSchema, record: Option<&Record>) -> String {
    let from_record = record
        .map(|r| r.form_value(&field.name))
        .unwrap_or_default();
    if from_record.is_empty() {
        field.default_value.clone()
    } else {
        from_record
    }
}

fn validate_field(field: &FieldSchema, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        if field.required {
            return Some(format!("{} is required", field.label));
        }
        return None;
    }

    match field.field_type {
        FieldType::Email if !is_valid_email(trimmed) => {
            Some("Please enter a valid email address".to_string())
        }
        FieldType::Phone if !is_valid_phone(trimmed) => {
            Some("Please enter a valid phone number".to_string())
        }
        _ => None,
    }
}

/// Simple `local@domain.tld` shape check, no full RFC parsing.
pub fn is_valid_email(input: &str) -> bool {
    if input.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Phone shape check: ignoring separators, an optional `+` followed by up
/// to 16 digits not starting with zero.
pub fn is_valid_phone(input: &str) -> bool {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    !digits.is_empty() && digits.len() <= 16 && !digits.starts_with('0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use std::sync::Mutex;
    use uuid::Uuid;

    fn sample_fields() -> Vec<FieldSchema> {
        vec![
            FieldSchema::new("name", "Client Name", FieldType::Text)
                .required()
                .with_order(0),
            FieldSchema::new("email", "Email", FieldType::Email).with_order(1),
            FieldSchema::new("phone", "Phone", FieldType::Phone).with_order(2),
            FieldSchema::new("status", "Status", FieldType::Select)
                .with_options(vec!["active", "inactive"])
                .with_default_value("active")
                .with_order(3),
            FieldSchema::new("visits", "Total Visits", FieldType::Number).with_order(4),
        ]
    }

    struct RecordingStore {
        records: Mutex<Vec<Record>>,
        created: Mutex<Vec<RecordDraft>>,
        updated: Mutex<Vec<(Uuid, RecordPatch)>>,
    }

    impl RecordingStore {
        fn new(records: Vec<Record>) -> Self {
            Self {
                records: Mutex::new(records),
                created: Mutex::new(Vec::new()),
                updated: Mutex::new(Vec::new()),
            }
        }
    }

    impl RecordStore for RecordingStore {
        fn list(&self) -> Result<Vec<Record>, GridError> {
            Ok(self.records.lock().unwrap().clone())
        }

        fn update(&self, record_id: Uuid, patch: RecordPatch) -> Result<(), GridError> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r.id == record_id)
                .ok_or_else(|| GridError::NotFound(format!("No record with id {record_id}")))?;
            patch.apply_to(record);
            self.updated.lock().unwrap().push((record_id, patch));
            Ok(())
        }

        fn create(&self, draft: RecordDraft) -> Result<Record, GridError> {
            self.created.lock().unwrap().push(draft.clone());
            let record = draft.into_record();
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }
    }

    #[test]
    fn create_form_seeds_declared_defaults() {
        let form = RecordForm::create(sample_fields());
        assert!(!form.is_edit());
        assert_eq!(form.value("status"), "active");
        assert_eq!(form.value("name"), "");
    }

    #[test]
    fn edit_form_prefers_record_values_over_defaults() {
        let record = Record::new()
            .with_attribute("name", Value::Text("Ada".to_string()))
            .with_attribute("visits", Value::Int(12));

        let form = RecordForm::edit(sample_fields(), &record);
        assert!(form.is_edit());
        assert_eq!(form.value("name"), "Ada");
        assert_eq!(form.value("visits"), "12");
        // Attribute absent from the record falls back to the default
        assert_eq!(form.value("status"), "active");
    }

    #[test]
    fn form_fields_follow_display_order() {
        let mut fields = sample_fields();
        fields.reverse();
        let form = RecordForm::create(fields);

        let descriptors = form.form_fields();
        let names: Vec<&str> = descriptors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "email", "phone", "status", "visits"]);
    }

    #[test]
    fn input_kind_mapping() {
        let select = FieldSchema::new("s", "S", FieldType::Select).with_options(vec!["a"]);
        assert_eq!(
            InputKind::for_field(&select),
            InputKind::Select {
                options: vec!["a".to_string()]
            }
        );

        // Optionless select falls back to the plain text input
        let empty_select = FieldSchema::new("s", "S", FieldType::Select);
        assert_eq!(InputKind::for_field(&empty_select), InputKind::Text);

        let long = FieldSchema::new("notes", "Notes", FieldType::LongText);
        assert_eq!(InputKind::for_field(&long), InputKind::MultiLine);
    }

    #[test]
    fn required_field_blocks_submit_with_label_message() {
        let mut form = RecordForm::create(sample_fields());
        assert!(!form.validate());
        assert_eq!(form.error("name"), Some("Client Name is required"));

        let store = RecordingStore::new(Vec::new());
        assert!(form.submit(&store).unwrap_err().is_validation());
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[test]
    fn email_shape_is_checked_only_when_present() {
        let mut form = RecordForm::create(sample_fields());
        form.set_value("name", "Ada");

        // Optional and empty: fine
        assert!(form.validate());

        form.set_value("email", "a@b");
        assert!(!form.validate());
        assert_eq!(form.error("email"), Some("Please enter a valid email address"));

        form.set_value("email", "a@b.co");
        assert!(form.validate());
    }

    #[test]
    fn email_validator_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a.b.com"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.co"));
    }

    #[test]
    fn phone_validator_shapes() {
        assert!(is_valid_phone("+15551234567"));
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(!is_valid_phone("abc"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+0555123456"));
        assert!(!is_valid_phone("12345678901234567"));
    }

    #[test]
    fn set_value_clears_that_fields_message() {
        let mut form = RecordForm::create(sample_fields());
        form.validate();
        assert!(form.error("name").is_some());

        form.set_value("name", "Ada");
        assert!(form.error("name").is_none());
    }

    #[test]
    fn submit_creates_with_coerced_values() {
        let mut form = RecordForm::create(sample_fields());
        form.set_value("name", "Ada");
        form.set_value("visits", "3");

        let store = RecordingStore::new(Vec::new());
        let record = form.submit(&store).expect("submit should create");

        assert_eq!(record.attribute("name"), Some(&Value::Text("Ada".to_string())));
        assert_eq!(record.attribute("visits"), Some(&Value::Int(3)));
        // Untouched optional fields are stored as nulls
        assert_eq!(record.attribute("email"), Some(&Value::Null));
        assert_eq!(store.created.lock().unwrap().len(), 1);
    }

    #[test]
    fn submit_updates_the_opened_record() {
        let existing = Record::new()
            .with_attribute("name", Value::Text("Ada".to_string()))
            .with_attribute("visits", Value::Int(3));
        let id = existing.id;
        let store = RecordingStore::new(vec![existing.clone()]);

        let mut form = RecordForm::edit(sample_fields(), &existing);
        form.set_value("visits", "4");
        let record = form.submit(&store).expect("submit should update");

        assert_eq!(record.id, id);
        assert_eq!(record.attribute("visits"), Some(&Value::Int(4)));
        assert_eq!(store.updated.lock().unwrap().len(), 1);
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[test]
    fn cancel_abandons_validation_state() {
        let mut form = RecordForm::create(sample_fields());
        form.validate();
        assert!(form.has_errors());

        form.cancel();
        assert!(!form.has_errors());
    }
}
