use gridflux_core::{CellStatus, EditSession, RecordStore, Value};
use gridflux_test_support::{FakeOutcome, FakeRecordStore, fixtures};

#[test]
fn commit_flows_through_the_store_and_adopts_the_value() {
    let records = fixtures::contact_records();
    let record = records[0].clone();
    let store = FakeRecordStore::new().with_records(records);
    let fields = fixtures::contact_fields();

    let mut session = EditSession::new(
        &fields[0],
        record.attribute("name").cloned().expect("fixture has a name"),
    );
    assert!(session.begin_edit());
    session.set_draft("Alicia Lang");

    let pending = session.commit().expect("a changed draft should produce a save");
    let outcome = store.update(record.id, pending.patch());
    session.resolve_save(pending.token, outcome);

    assert!(session.status().is_viewing());
    assert_eq!(
        session.displayed_value(),
        &Value::Text("Alicia Lang".to_string())
    );

    let stored = store.records();
    let stored_name = stored
        .iter()
        .find(|candidate| candidate.id == record.id)
        .and_then(|candidate| candidate.attribute("name"))
        .cloned();
    assert_eq!(stored_name, Some(Value::Text("Alicia Lang".to_string())));
    assert_eq!(store.stats().updates.len(), 1);
}

#[test]
fn failed_save_rolls_back_and_a_retry_succeeds() {
    let records = fixtures::contact_records();
    let record = records[1].clone();
    let store = FakeRecordStore::new()
        .with_records(records)
        .with_update_error("connection reset");
    let fields = fixtures::contact_fields();

    let mut session = EditSession::new(
        &fields[3],
        record
            .attribute("visits")
            .cloned()
            .expect("fixture has visits"),
    );
    assert!(session.begin_edit());
    session.set_draft("4");

    let pending = session.commit().expect("a changed draft should produce a save");
    let outcome = store.update(record.id, pending.patch());
    assert!(outcome.is_err());
    session.resolve_save(pending.token, outcome);

    assert!(matches!(session.status(), CellStatus::Error(_)));
    assert_eq!(session.displayed_value(), &Value::Int(3));

    let message = session.take_error().expect("the failure should be parked");
    assert!(message.contains("connection reset"));

    store.set_update_outcome(FakeOutcome::Success);

    assert!(session.begin_edit());
    session.set_draft("4");
    let retry = session.commit().expect("the retry should produce a save");
    let outcome = store.update(record.id, retry.patch());
    session.resolve_save(retry.token, outcome);

    assert!(session.status().is_viewing());
    assert_eq!(session.displayed_value(), &Value::Int(4));
    assert_eq!(store.stats().updates.len(), 2);
}

#[test]
fn two_cells_of_one_record_save_independently() {
    let records = fixtures::contact_records();
    let record = records[2].clone();
    let store = FakeRecordStore::new().with_records(records);
    let fields = fixtures::contact_fields();

    let mut name_session = EditSession::new(
        &fields[0],
        record.attribute("name").cloned().expect("fixture has a name"),
    );
    let mut visits_session = EditSession::new(
        &fields[3],
        record
            .attribute("visits")
            .cloned()
            .expect("fixture has visits"),
    );

    assert!(name_session.begin_edit());
    name_session.set_draft("Carla M. Reyes");
    assert!(visits_session.begin_edit());
    visits_session.set_draft("8");

    let name_pending = name_session.commit().expect("name commit should save");
    let visits_pending = visits_session.commit().expect("visits commit should save");

    let visits_outcome = store.update(record.id, visits_pending.patch());
    visits_session.resolve_save(visits_pending.token, visits_outcome);
    let name_outcome = store.update(record.id, name_pending.patch());
    name_session.resolve_save(name_pending.token, name_outcome);

    assert!(name_session.status().is_viewing());
    assert!(visits_session.status().is_viewing());

    let stored = store.records();
    let fresh = stored
        .iter()
        .find(|candidate| candidate.id == record.id)
        .expect("record should still exist");
    assert_eq!(
        fresh.attribute("name"),
        Some(&Value::Text("Carla M. Reyes".to_string()))
    );
    assert_eq!(fresh.attribute("visits"), Some(&Value::Int(8)));
    assert_eq!(store.stats().updates.len(), 2);
}

#[test]
fn saving_against_a_deleted_record_parks_the_store_error() {
    let store = FakeRecordStore::new().with_records(fixtures::contact_records());
    let fields = fixtures::contact_fields();
    let deleted = fixtures::contact("Ghost", "ghost@example.com", "inactive", 0);

    let mut session = EditSession::new(
        &fields[0],
        deleted
            .attribute("name")
            .cloned()
            .expect("fixture has a name"),
    );
    assert!(session.begin_edit());
    session.set_draft("Still Here");

    let pending = session.commit().expect("a changed draft should produce a save");
    let outcome = store.update(deleted.id, pending.patch());
    session.resolve_save(pending.token, outcome);

    assert!(session.status().is_error());
    assert_eq!(
        session.displayed_value(),
        &Value::Text("Ghost".to_string())
    );
}
