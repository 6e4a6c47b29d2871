use crate::domain::model::{Preview, PreviewTable, RecordSeq};
use crate::domain::ports::TableRenderer;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde_json::Value;

/// Builds a bounded preview over the first `limit` records.
///
/// The column set comes from record 0 only; a field that first appears in a
/// later record is silently dropped from the preview. Callers pass their own
/// bound, the two views deliberately use different ones.
pub fn render(sequence: &RecordSeq, limit: usize) -> Preview {
    let records = sequence.records();
    if records.is_empty() {
        return Preview::Empty;
    }

    let columns: Vec<String> = records[0]
        .as_object()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default();

    let rows = records
        .iter()
        .take(limit)
        .map(|record| columns.iter().map(|column| cell_text(record, column)).collect())
        .collect();

    Preview::Table(PreviewTable { columns, rows })
}

// "N/A" stands in for missing fields, nulls and empty strings; it is part of
// the user-visible contract and ends up verbatim in stored preview data.
fn cell_text(record: &Value, column: &str) -> String {
    match record.as_object().and_then(|fields| fields.get(column)) {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) if s.is_empty() => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Text-table presentation of a preview.
pub struct TextTableRenderer;

impl TableRenderer for TextTableRenderer {
    fn render(&self, preview: &Preview) -> String {
        match preview {
            Preview::Empty => "No data to preview".to_string(),
            Preview::Table(table) => {
                let mut out = Table::new();
                out.load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(table.columns.clone());
                for row in &table.rows {
                    out.add_row(row.clone());
                }
                out.to_string()
            }
        }
    }
}
