use crate::core::xml;
use crate::domain::model::{MediaType, RecordSeq};
use crate::utils::error::{ConvertError, Result};
use serde_json::Value;

/// Turns raw file content into the canonical record sequence.
///
/// JSON normalization is intentionally shallow: a top-level array is used
/// as-is (non-object elements included), anything else is wrapped as a
/// one-element sequence. XML goes through structural inference.
pub fn normalize(content: &str, media: MediaType) -> Result<RecordSeq> {
    match media {
        MediaType::Json => {
            let value: Value = serde_json::from_str(content).map_err(|e| ConvertError::Parse {
                message: e.to_string(),
            })?;
            let records = match value {
                Value::Array(items) => items,
                other => vec![other],
            };
            Ok(RecordSeq::new(records))
        }
        MediaType::Xml => {
            let root = xml::parse_document(content)?;
            Ok(RecordSeq::new(xml::infer_records(&root)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_array_passes_through_unchanged() {
        let content = r#"[{"id": 1, "name": "a"}, {"id": 2}, "scalar", 7]"#;
        let seq = normalize(content, MediaType::Json).unwrap();

        assert_eq!(seq.len(), 4);
        assert_eq!(seq.records()[0], json!({"id": 1, "name": "a"}));
        assert_eq!(seq.records()[2], json!("scalar"));
        assert_eq!(seq.records()[3], json!(7));
    }

    #[test]
    fn test_json_object_wraps_as_single_record() {
        let seq = normalize(r#"{"id": 1, "name": "a"}"#, MediaType::Json).unwrap();

        assert_eq!(seq.len(), 1);
        assert_eq!(seq.records()[0], json!({"id": 1, "name": "a"}));
    }

    #[test]
    fn test_empty_json_array_yields_empty_sequence() {
        let seq = normalize("[]", MediaType::Json).unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = normalize("{not json", MediaType::Json).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
    }

    #[test]
    fn test_xml_dispatches_to_inference() {
        let content = "<Items><R><V>1</V></R><R><V>2</V></R></Items>";
        let seq = normalize(content, MediaType::Xml).unwrap();

        assert_eq!(seq.len(), 2);
        assert_eq!(seq.records()[0], json!({"V": "1"}));
    }

    #[test]
    fn test_malformed_xml_is_a_parse_error() {
        let err = normalize("<Items><R>", MediaType::Xml).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
    }
}
