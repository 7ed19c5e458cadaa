use crate::{ExportError, Exporter};
use gridflux_core::{FieldSchema, Record, Value};
use std::io::Write;

/// JSON array of objects keyed by field name. Machine-facing, so cells
/// keep their types where CSV flattens everything to display strings.
pub struct JsonExporter {
    pub pretty: bool,
}

impl Exporter for JsonExporter {
    fn name(&self) -> &'static str {
        if self.pretty {
            "JSON (pretty)"
        } else {
            "JSON (compact)"
        }
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn export(
        &self,
        columns: &[&FieldSchema],
        records: &[Record],
        writer: &mut dyn Write,
    ) -> Result<(), ExportError> {
        let array = serde_json::Value::Array(
            records
                .iter()
                .map(|record| record_to_json_object(columns, record))
                .collect(),
        );

        if self.pretty {
            serde_json::to_writer_pretty(writer, &array)?;
        } else {
            serde_json::to_writer(writer, &array)?;
        }

        Ok(())
    }
}

fn record_to_json_object(columns: &[&FieldSchema], record: &Record) -> serde_json::Value {
    let mut map = serde_json::Map::new();

    for field in columns {
        let cell = record
            .attribute(&field.name)
            .map(value_to_json)
            .unwrap_or(serde_json::Value::Null);
        map.insert(field.name.clone(), cell);
    }

    serde_json::Value::Object(map)
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
        Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
    }
}
