//! Field schema definitions.
//!
//! A `FieldSchema` describes one editable record attribute: its key, display
//! label, input type, behavior flags, and position. The schema set drives the
//! table columns, the filter bar, and the generated create/edit forms.

use crate::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Number,
    Date,
    Select,
    Boolean,
    LongText,
}

impl FieldType {
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Select => "Select",
            FieldType::Boolean => "Boolean",
            FieldType::LongText => "Long Text",
        }
    }

    /// Types whose values are free text a user would expect a global search
    /// to look inside. Closed enumerations, numbers, dates, and booleans are
    /// matched through field filters instead.
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::LongText
        )
    }

    /// Best-effort conversion from raw input text to a typed value.
    ///
    /// Empty input always becomes `Null`. Inputs that fail to parse for the
    /// declared type are kept as text rather than rejected; validation of
    /// shape constraints happens in the form layer, not here.
    pub fn coerce(&self, raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }

        match self {
            FieldType::Number => {
                if let Ok(i) = trimmed.parse::<i64>() {
                    Value::Int(i)
                } else if let Ok(f) = trimmed.parse::<f64>() {
                    Value::Float(f)
                } else {
                    Value::Text(trimmed.to_string())
                }
            }
            FieldType::Date => match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                Ok(d) => Value::Date(d),
                Err(_) => Value::Text(trimmed.to_string()),
            },
            FieldType::Boolean => match trimmed.to_lowercase().as_str() {
                "true" | "1" | "yes" => Value::Bool(true),
                "false" | "0" | "no" => Value::Bool(false),
                _ => Value::Text(trimmed.to_string()),
            },
            _ => Value::Text(raw.to_string()),
        }
    }
}

/// Declarative description of one editable record attribute.
///
/// `id` is assigned on creation and never changes; `order` is maintained by
/// the column configuration store and rewritten on reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub id: Uuid,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub sortable: bool,
    pub filterable: bool,
    pub visible: bool,
    pub order: usize,
    /// Choices for `Select` fields; ignored for every other type.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            sortable: false,
            filterable: false,
            visible: true,
            order: 0,
            options: Vec::new(),
            default_value: String::new(),
            description: String::new(),
        }
    }

    // --- Builder methods ---

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_options(mut self, options: Vec<impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    // --- Queries ---

    pub fn is_select(&self) -> bool {
        matches!(self.field_type, FieldType::Select)
    }

    /// Whether the global search stage looks inside this field.
    pub fn is_searchable(&self) -> bool {
        self.filterable && self.field_type.is_text_bearing()
    }

    /// Whether the field appears as a dropdown in the filter bar.
    pub fn is_dropdown_filter(&self) -> bool {
        self.visible && self.filterable && self.is_select()
    }
}

/// Patch applied to an existing field by the configuration store.
///
/// `id` and `order` are deliberately absent: identity is immutable and
/// position changes only through reorder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub label: Option<String>,
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub sortable: Option<bool>,
    pub filterable: Option<bool>,
    pub visible: Option<bool>,
    pub options: Option<Vec<String>>,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = Some(filterable);
        self
    }

    pub fn with_options(mut self, options: Vec<impl Into<String>>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn apply_to(&self, schema: &mut FieldSchema) {
        if let Some(name) = &self.name {
            schema.name = name.clone();
        }
        if let Some(label) = &self.label {
            schema.label = label.clone();
        }
        if let Some(field_type) = self.field_type {
            schema.field_type = field_type;
        }
        if let Some(required) = self.required {
            schema.required = required;
        }
        if let Some(sortable) = self.sortable {
            schema.sortable = sortable;
        }
        if let Some(filterable) = self.filterable {
            schema.filterable = filterable;
        }
        if let Some(visible) = self.visible {
            schema.visible = visible;
        }
        if let Some(options) = &self.options {
            schema.options = options.clone();
        }
        if let Some(default_value) = &self.default_value {
            schema.default_value = default_value.clone();
        }
        if let Some(description) = &self.description {
            schema.description = description.clone();
        }
    }
}

/// Starter schema used when nothing has been persisted yet.
pub fn default_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::new("name", "Client Name", FieldType::Text)
            .required()
            .sortable()
            .filterable()
            .with_order(0),
        FieldSchema::new("email", "Email", FieldType::Email)
            .sortable()
            .filterable()
            .with_order(1),
        FieldSchema::new("phone", "Phone", FieldType::Phone)
            .sortable()
            .filterable()
            .with_order(2),
        FieldSchema::new("pricing_option", "Pricing Option", FieldType::Select)
            .sortable()
            .filterable()
            .with_options(vec!["Premium", "Standard", "Basic", "Trial"])
            .with_order(3),
        FieldSchema::new("visits", "Total Visits", FieldType::Number)
            .sortable()
            .with_order(4),
        FieldSchema::new("last_visit", "Last Visit", FieldType::Date)
            .sortable()
            .with_order(5),
        FieldSchema::new("staff", "Staff", FieldType::Text)
            .sortable()
            .filterable()
            .with_order(6),
        FieldSchema::new("status", "Status", FieldType::Select)
            .sortable()
            .filterable()
            .with_options(vec!["active", "inactive"])
            .with_order(7),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_flags() {
        let field = FieldSchema::new("email", "Email", FieldType::Email)
            .required()
            .sortable()
            .filterable();

        assert!(field.required);
        assert!(field.sortable);
        assert!(field.filterable);
        assert!(field.visible);
        assert_eq!(field.order, 0);
    }

    #[test]
    fn searchable_needs_text_bearing_type() {
        let email = FieldSchema::new("email", "Email", FieldType::Email).filterable();
        let status = FieldSchema::new("status", "Status", FieldType::Select)
            .filterable()
            .with_options(vec!["active", "inactive"]);
        let visits = FieldSchema::new("visits", "Visits", FieldType::Number).sortable();

        assert!(email.is_searchable());
        assert!(!status.is_searchable());
        assert!(!visits.is_searchable());
        assert!(status.is_dropdown_filter());
        assert!(!email.is_dropdown_filter());
    }

    #[test]
    fn coerce_number() {
        assert_eq!(FieldType::Number.coerce("42"), Value::Int(42));
        assert_eq!(FieldType::Number.coerce("3.5"), Value::Float(3.5));
        assert_eq!(FieldType::Number.coerce(""), Value::Null);
        assert_eq!(
            FieldType::Number.coerce("lots"),
            Value::Text("lots".to_string())
        );
    }

    #[test]
    fn coerce_date_and_bool() {
        assert_eq!(
            FieldType::Date.coerce("2024-03-15"),
            Value::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert_eq!(
            FieldType::Date.coerce("not a date"),
            Value::Text("not a date".to_string())
        );
        assert_eq!(FieldType::Boolean.coerce("true"), Value::Bool(true));
        assert_eq!(FieldType::Boolean.coerce("No"), Value::Bool(false));
    }

    #[test]
    fn patch_leaves_unset_fields_alone() {
        let mut field = FieldSchema::new("status", "Status", FieldType::Select)
            .filterable()
            .with_options(vec!["active", "inactive"])
            .with_order(3);
        let id = field.id;

        FieldPatch::new()
            .with_label("Account Status")
            .with_required(true)
            .apply_to(&mut field);

        assert_eq!(field.id, id);
        assert_eq!(field.label, "Account Status");
        assert!(field.required);
        assert_eq!(field.name, "status");
        assert_eq!(field.order, 3);
        assert_eq!(field.options, vec!["active", "inactive"]);
    }

    #[test]
    fn field_type_serializes_lowercase() {
        let json = serde_json::to_string(&FieldType::LongText).unwrap();
        assert_eq!(json, "\"longtext\"");
        let parsed: FieldType = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(parsed, FieldType::Email);
    }

    #[test]
    fn default_fields_have_contiguous_order() {
        let fields = default_fields();
        assert_eq!(fields.len(), 8);
        for (i, field) in fields.iter().enumerate() {
            assert_eq!(field.order, i);
        }
        assert!(fields.iter().all(|f| f.visible));
        assert_eq!(fields[0].name, "name");
        assert!(fields[0].required);
    }
}
