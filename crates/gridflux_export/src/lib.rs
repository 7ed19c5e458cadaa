mod csv;
mod json;

use gridflux_core::{FieldSchema, Record};
use std::io::Write;
use thiserror::Error;

pub use csv::CsvExporter;
pub use json::JsonExporter;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    JsonPretty,
    JsonCompact,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[Self::Csv, Self::JsonPretty, Self::JsonCompact]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::JsonPretty => "JSON (pretty)",
            Self::JsonCompact => "JSON (compact)",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::JsonPretty | Self::JsonCompact => "json",
        }
    }
}

/// Sink-agnostic export of a record set over an ordered column slice,
/// typically the visible columns and the filtered records of one view.
pub trait Exporter {
    fn name(&self) -> &'static str;

    fn extension(&self) -> &'static str;

    fn export(
        &self,
        columns: &[&FieldSchema],
        records: &[Record],
        writer: &mut dyn Write,
    ) -> Result<(), ExportError>;
}

pub fn export(
    columns: &[&FieldSchema],
    records: &[Record],
    format: ExportFormat,
    writer: &mut dyn Write,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => CsvExporter.export(columns, records, writer),
        ExportFormat::JsonPretty => JsonExporter { pretty: true }.export(columns, records, writer),
        ExportFormat::JsonCompact => {
            JsonExporter { pretty: false }.export(columns, records, writer)
        }
    }
}
