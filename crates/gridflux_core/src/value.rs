use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Cell value type.
///
/// Custom enum instead of `serde_json::Value` to enable type-aware sorting,
/// predictable display strings, and clean export without JSON overhead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Timestamp with timezone.
    DateTime(DateTime<Utc>),
    /// Date without time component.
    Date(NaiveDate),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Rendering form used by table cells and diagnostics. Null renders as
    /// the literal `NULL`.
    pub fn as_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Editable form used by edit buffers, form inputs, search, and
    /// filtering. Identical to `as_display_string` except Null becomes the
    /// empty string, so an untouched editor over a null cell stays a no-op.
    pub fn as_form_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.as_display_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_display_string())
    }
}

impl Value {
    fn type_order(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) => 1,
            Value::Float(_) => 2,
            Value::Text(_) => 3,
            Value::DateTime(_) => 4,
            Value::Date(_) => 5,
            Value::Null => 6,
        }
    }

    /// Ordering used by the sort stage: like `Ord`, but text compares
    /// case-insensitively. Case-insensitive ties report `Equal` so a stable
    /// sort preserves input order.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            _ => self.cmp(other),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;

        match (self, other) {
            // Nulls compare greater than any present value, so ascending
            // puts them last and a reversed (descending) sort puts them
            // first. One rule for every type.
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Greater,
            (_, Null) => Ordering::Less,

            // Same type comparisons
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),

            // Cross-type numeric promotion
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),

            // Different types: fallback to type order
            _ => self.type_order().cmp(&other.type_order()),
        }
    }
}

impl Eq for Value {}
