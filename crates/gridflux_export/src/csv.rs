use crate::{ExportError, Exporter};
use csv::Writer;
use gridflux_core::{FieldSchema, Record};
use std::io::Write;

/// Comma-separated export with the csv crate's standard quoting.
///
/// The header row carries column labels, cells carry form strings, so null
/// and missing attributes both export as empty fields rather than a NULL
/// marker.
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn export(
        &self,
        columns: &[&FieldSchema],
        records: &[Record],
        writer: &mut dyn Write,
    ) -> Result<(), ExportError> {
        let mut csv_writer = Writer::from_writer(writer);

        let headers: Vec<&str> = columns.iter().map(|field| field.label.as_str()).collect();
        csv_writer.write_record(&headers)?;

        for record in records {
            for field in columns {
                csv_writer.write_field(record.form_value(&field.name))?;
            }
            csv_writer.write_record(None::<&[u8]>)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
