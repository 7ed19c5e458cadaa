use gridflux_core::{GridError, RecordForm, Value};
use gridflux_test_support::{FakeRecordStore, fixtures};

#[test]
fn create_submission_stores_coerced_values() {
    let store = FakeRecordStore::new();
    let mut form = RecordForm::create(fixtures::contact_fields());
    form.set_value("name", "Dana Wolfe");
    form.set_value("email", "dana@example.com");
    form.set_value("visits", "9");

    let record = form.submit(&store).expect("a valid form should submit");

    assert_eq!(
        record.attribute("name"),
        Some(&Value::Text("Dana Wolfe".to_string()))
    );
    assert_eq!(record.attribute("visits"), Some(&Value::Int(9)));
    assert_eq!(
        record.attribute("status"),
        Some(&Value::Text("active".to_string()))
    );
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.stats().creates.len(), 1);
}

#[test]
fn invalid_form_never_reaches_the_store() {
    let store = FakeRecordStore::new();
    let mut form = RecordForm::create(fixtures::contact_fields());
    form.set_value("email", "not-an-email");

    let result = form.submit(&store);

    assert!(matches!(result, Err(GridError::Validation(_))));
    assert_eq!(form.error("name"), Some("Name is required"));
    assert_eq!(
        form.error("email"),
        Some("Please enter a valid email address")
    );
    assert!(store.records().is_empty());
    assert!(store.stats().creates.is_empty());
}

#[test]
fn edit_submission_patches_and_returns_the_fresh_record() {
    let records = fixtures::contact_records();
    let record = records[2].clone();
    let store = FakeRecordStore::new().with_records(records);

    let mut form = RecordForm::edit(fixtures::contact_fields(), &record);
    assert!(form.is_edit());
    assert_eq!(form.value("name"), "Carla Reyes");

    form.set_value("status", "inactive");
    form.set_value("visits", "8");

    let updated = form.submit(&store).expect("a valid edit should submit");

    assert_eq!(updated.id, record.id);
    assert_eq!(
        updated.attribute("status"),
        Some(&Value::Text("inactive".to_string()))
    );
    assert_eq!(updated.attribute("visits"), Some(&Value::Int(8)));

    let stats = store.stats();
    assert_eq!(stats.updates.len(), 1);
    assert_eq!(stats.updates[0].0, record.id);
}

#[test]
fn store_failure_surfaces_from_submit() {
    let store = FakeRecordStore::new().with_create_error("disk full");
    let mut form = RecordForm::create(fixtures::contact_fields());
    form.set_value("name", "Elio Park");

    let result = form.submit(&store);

    assert!(matches!(result, Err(GridError::Persistence(_))));
    assert_eq!(store.stats().creates.len(), 1);
    assert!(store.records().is_empty());
}
