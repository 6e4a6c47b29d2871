use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use tablecast::core::convert::ConverterClient;
use tablecast::core::session::Session;
use tablecast::core::{normalize, preview};
use tablecast::domain::model::{MediaType, UploadFile};
use tablecast::domain::ports::RemoteConverter;
use tablecast::store::FileKvStore;
use tablecast::utils::error::ConvertError;
use tempfile::TempDir;

fn upload_fixture() -> UploadFile {
    UploadFile {
        path: PathBuf::from("records.json"),
        file_name: "records.json".to_string(),
        size_bytes: 64,
        media: MediaType::Json,
    }
}

#[tokio::test]
async fn test_convert_sends_bearer_and_parses_result() -> Result<()> {
    let server = MockServer::start();

    let convert_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/converter/convert")
            .header("authorization", "Bearer test-token-123");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "message": "File converted successfully",
                "result": {
                    "original_file": {
                        "original_filename": "records.json",
                        "file_size": 64,
                        "saved_filename": "a1b2.json",
                        "file_extension": "json"
                    },
                    "conversion_result": {
                        "csv_path": "uploads\\a1b2_converted.csv",
                        "excel_path": "uploads/a1b2_converted.xlsx",
                        "total_rows": 2,
                        "total_columns": 3
                    }
                }
            }));
    });

    let client = ConverterClient::new(server.base_url());
    let result = client
        .convert(&upload_fixture(), b"[]".to_vec(), "test-token-123")
        .await?;

    convert_mock.assert();
    assert_eq!(result.original_file.original_filename, "records.json");
    assert_eq!(result.original_file.file_size, 64);

    let summary = result.summary.expect("summary present");
    assert_eq!(summary.csv_path, "uploads\\a1b2_converted.csv");
    assert_eq!(summary.excel_path, "uploads/a1b2_converted.xlsx");
    assert_eq!(summary.total_rows, 2);
    assert_eq!(summary.total_columns, 3);
    Ok(())
}

#[tokio::test]
async fn test_convert_failure_carries_server_message() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/converter/convert");
        then.status(400)
            .header("Content-Type", "application/json")
            .json_body(json!({"error": "Conversion failed: Invalid JSON format"}));
    });

    let client = ConverterClient::new(server.base_url());
    let err = client
        .convert(&upload_fixture(), b"{broken".to_vec(), "test-token-123")
        .await
        .unwrap_err();

    match err {
        ConvertError::Conversion { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Conversion failed: Invalid JSON format");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_convert_failure_without_json_body_is_generic() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/converter/convert");
        then.status(500).body("boom");
    });

    let client = ConverterClient::new(server.base_url());
    let err = client
        .convert(&upload_fixture(), b"[]".to_vec(), "test-token-123")
        .await
        .unwrap_err();

    match err {
        ConvertError::Conversion { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("500"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// The full hand-off: the preview shown before submitting is embedded in the
// stored result and comes back unchanged in a later invocation.
#[tokio::test]
async fn test_stored_preview_survives_the_process_boundary() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/converter/convert");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "result": {
                    "original_file": {"original_filename": "items.json", "file_size": 128},
                    "conversion_result": {
                        "csv_path": "out/items.csv",
                        "excel_path": "out/items.xlsx",
                        "total_rows": 4,
                        "total_columns": 2
                    }
                }
            }));
    });

    let content = r#"[
        {"name": "alpha", "qty": 1},
        {"name": "beta"},
        {"name": "gamma", "qty": 3},
        {"name": "delta", "qty": 4}
    ]"#;

    let records = normalize::normalize(content, MediaType::Json)?;
    let table = preview::render(&records, 3);

    let client = ConverterClient::new(server.base_url());
    let mut result = client
        .convert(&upload_fixture(), content.as_bytes().to_vec(), "tok")
        .await?;
    result.preview = Some(table.to_records());

    let state_dir = TempDir::new()?;
    Session::new(FileKvStore::new(state_dir.path()))
        .result_store()
        .write(&result)?;

    // separate session handle, as a fresh invocation would build
    let later = Session::new(FileKvStore::new(state_dir.path()));
    let restored = later.result_store().read().expect("stored result");
    assert_eq!(restored, result);

    // the embedded preview carries rendered cells, placeholder included
    let preview_records = restored.preview.expect("preview data");
    assert_eq!(preview_records.len(), 3);
    assert_eq!(preview_records[0], json!({"name": "alpha", "qty": "1"}));
    assert_eq!(preview_records[1], json!({"name": "beta", "qty": "N/A"}));
    Ok(())
}
