use crate::domain::model::{MediaType, UploadFile};
use crate::utils::error::{ConvertError, Result};
use std::ffi::OsStr;
use std::path::Path;

/// The exact allow-list the converter service accepts.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["application/json", "text/xml", "application/xml"];

/// Maps a MIME marker to its format, rejecting everything outside the
/// allow-list. There is no partial acceptance.
pub fn media_for_mime(mime: &str) -> Result<MediaType> {
    match mime {
        "application/json" => Ok(MediaType::Json),
        "text/xml" | "application/xml" => Ok(MediaType::Xml),
        other => Err(ConvertError::UnsupportedType {
            mime: other.to_string(),
        }),
    }
}

// A CLI has no browser to report a MIME type, so the marker is derived from
// the extension. Unknown extensions still get a marker so the rejection can
// name what was seen.
fn mime_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => "application/json".to_string(),
        "xml" => "text/xml".to_string(),
        "" => "application/octet-stream".to_string(),
        other => format!("application/{}", other),
    }
}

/// Admits a file into the pipeline or rejects it with `UnsupportedType`.
pub fn admit(path: &Path) -> Result<UploadFile> {
    let media = media_for_mime(&mime_for_path(path))?;
    let metadata = std::fs::metadata(path)?;
    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("upload")
        .to_string();

    Ok(UploadFile {
        path: path.to_path_buf(),
        file_name,
        size_bytes: metadata.len(),
        media,
    })
}
