use gridflux_core::{FieldSchema, FieldType, Record, RecordDraft, Value};

pub fn contact_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::new("name", "Name", FieldType::Text)
            .required()
            .sortable()
            .filterable()
            .with_order(0),
        FieldSchema::new("email", "Email", FieldType::Email)
            .sortable()
            .filterable()
            .with_order(1),
        FieldSchema::new("status", "Status", FieldType::Select)
            .filterable()
            .with_options(vec!["active", "inactive"])
            .with_default_value("active")
            .with_order(2),
        FieldSchema::new("visits", "Visits", FieldType::Number)
            .sortable()
            .with_order(3),
    ]
}

pub fn contact_draft(
    name: impl Into<String>,
    email: impl Into<String>,
    status: impl Into<String>,
    visits: i64,
) -> RecordDraft {
    RecordDraft::new()
        .with_attribute("name", Value::Text(name.into()))
        .with_attribute("email", Value::Text(email.into()))
        .with_attribute("status", Value::Text(status.into()))
        .with_attribute("visits", Value::Int(visits))
}

pub fn contact(
    name: impl Into<String>,
    email: impl Into<String>,
    status: impl Into<String>,
    visits: i64,
) -> Record {
    contact_draft(name, email, status, visits).into_record()
}

pub fn contact_records() -> Vec<Record> {
    vec![
        contact("Alice Lang", "alice@example.com", "active", 12),
        contact("Bruno Mata", "bruno@example.com", "inactive", 3),
        contact("Carla Reyes", "carla@example.com", "active", 7),
    ]
}
