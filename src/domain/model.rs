use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// A single normalized record: field name to value, insertion order preserved.
pub type Record = serde_json::Map<String, Value>;

/// Ordered sequence of records produced once per uploaded file.
///
/// Rebuilt on every upload, never edited in place. Elements are usually
/// objects, but a JSON array of scalars passes through untouched, so the
/// element type stays [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSeq {
    records: Vec<Value>,
}

impl RecordSeq {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The two file formats the converter service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Json,
    Xml,
}

impl MediaType {
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Xml => "text/xml",
        }
    }
}

/// A file that passed the format gate, ready for preview and upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub media: MediaType,
}

/// Metadata the service reports about the uploaded file.
///
/// Field names follow the service wire format; extra server-side fields
/// (saved filename, storage path) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalFile {
    pub original_filename: String,
    pub file_size: u64,
}

/// Row/column counts and server-relative artifact paths for one conversion.
/// Paths may use forward or backward slash separators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub csv_path: String,
    pub excel_path: String,
    pub total_rows: u64,
    pub total_columns: u64,
}

/// The unit carried across the convert/result boundary.
///
/// `preview` is the table the user saw before submitting, re-read as
/// records, not a re-derivation from server data. `summary` and `preview`
/// are optional so that older or partially written stored values still
/// load and degrade to placeholder output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub original_file: OriginalFile,

    #[serde(rename = "conversion_result", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ConversionSummary>,

    #[serde(rename = "preview_data", default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_at: Option<DateTime<Utc>>,
}

/// A bounded tabular view over a record sequence.
///
/// `Empty` is an explicit marker so callers can render "no data" instead of
/// a table with zero rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Empty,
    Table(PreviewTable),
}

impl Preview {
    /// Rows as records keyed by column, every cell already rendered to text.
    pub fn to_records(&self) -> Vec<Value> {
        match self {
            Preview::Empty => Vec::new(),
            Preview::Table(table) => table.to_records(),
        }
    }
}

/// Columns come from the first record only; rows are truncated to the
/// caller's bound and every cell is rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PreviewTable {
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Record::new();
                for (column, cell) in self.columns.iter().zip(row) {
                    record.insert(column.clone(), Value::String(cell.clone()));
                }
                Value::Object(record)
            })
            .collect()
    }
}
