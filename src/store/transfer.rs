use crate::domain::model::ConversionResult;
use crate::domain::ports::KvStore;
use crate::store::RESULT_KEY;
use crate::utils::error::Result;

/// Carries one conversion result across the convert/result boundary.
///
/// Holds at most one result; writing replaces. Reading an absent or corrupt
/// value degrades to `None` so the result view can fall back to placeholder
/// output instead of failing.
pub struct ResultTransferStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> ResultTransferStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn write(&self, result: &ConversionResult) -> Result<()> {
        let json = serde_json::to_string(result)?;
        self.store.set(RESULT_KEY, &json)
    }

    pub fn read(&self) -> Option<ConversionResult> {
        let raw = match self.store.get(RESULT_KEY) {
            Ok(value) => value?,
            Err(e) => {
                tracing::warn!("Could not read stored conversion result: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!("Stored conversion result is corrupt: {}", e);
                None
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(RESULT_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ConversionSummary, OriginalFile};
    use crate::store::FileKvStore;
    use serde_json::json;

    fn sample_result() -> ConversionResult {
        ConversionResult {
            original_file: OriginalFile {
                original_filename: "records.json".to_string(),
                file_size: 2048,
            },
            summary: Some(ConversionSummary {
                csv_path: "uploads/records_converted.csv".to_string(),
                excel_path: "uploads\\records_converted.xlsx".to_string(),
                total_rows: 12,
                total_columns: 4,
            }),
            preview: Some(vec![json!({"a": "1", "b": "N/A"})]),
            converted_at: None,
        }
    }

    #[test]
    fn test_write_then_read_is_deep_equal() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultTransferStore::new(FileKvStore::new(dir.path()));

        let result = sample_result();
        store.write(&result).unwrap();
        assert_eq!(store.read(), Some(result));
    }

    #[test]
    fn test_read_without_write_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultTransferStore::new(FileKvStore::new(dir.path()));

        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_clear_removes_the_stored_result() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultTransferStore::new(FileKvStore::new(dir.path()));

        store.write(&sample_result()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_write_replaces_the_previous_result() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultTransferStore::new(FileKvStore::new(dir.path()));

        let mut first = sample_result();
        store.write(&first).unwrap();

        first.original_file.original_filename = "other.xml".to_string();
        store.write(&first).unwrap();

        assert_eq!(
            store.read().unwrap().original_file.original_filename,
            "other.xml"
        );
    }

    #[test]
    fn test_corrupt_stored_value_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKvStore::new(dir.path());
        kv.set(RESULT_KEY, "{not valid json").unwrap();

        let store = ResultTransferStore::new(kv);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_stored_result_without_summary_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKvStore::new(dir.path());
        kv.set(
            RESULT_KEY,
            r#"{"original_file": {"original_filename": "a.json", "file_size": 10}}"#,
        )
        .unwrap();

        let store = ResultTransferStore::new(kv);
        let result = store.read().unwrap();
        assert_eq!(result.summary, None);
        assert_eq!(result.preview, None);
    }
}
