use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single row of user data.
///
/// The engine never defines the shape of a record beyond "has an id and named
/// attributes"; which attributes exist is entirely the schema set's business.
/// Attributes use a `BTreeMap` so serialization and iteration order are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub attributes: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    /// Value as shown in an edit buffer or form input. Missing and null
    /// attributes both read as empty.
    pub fn form_value(&self, name: &str) -> String {
        self.attribute(name)
            .map(Value::as_form_string)
            .unwrap_or_default()
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

/// Changes to apply to a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    /// Attribute changes: (attribute_name, new_value).
    pub changes: Vec<(String, Value)>,
}

impl RecordPatch {
    pub fn new(changes: Vec<(String, Value)>) -> Self {
        Self { changes }
    }

    /// Patch touching exactly one attribute, as produced by an inline cell
    /// edit.
    pub fn single(name: impl Into<String>, value: Value) -> Self {
        Self {
            changes: vec![(name.into(), value)],
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn apply_to(&self, record: &mut Record) {
        for (name, value) in &self.changes {
            record.attributes.insert(name.clone(), value.clone());
        }
    }
}

/// Candidate record for creation. Identical to `Record` minus the id, which
/// the record store assigns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub attributes: BTreeMap<String, Value>,
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn into_record(self) -> Record {
        Record {
            id: Uuid::new_v4(),
            attributes: self.attributes,
        }
    }
}
