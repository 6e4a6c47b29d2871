use crate::utils::error::{ConvertError, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};

/// Authenticated retrieval of converted artifacts.
///
/// Each download owns its payload exclusively; the bytes live only until
/// [`Artifact::save_to`] writes them out and the value drops.
pub struct ArtifactDownloader {
    client: Client,
    base_url: String,
}

/// One retrieved artifact, still in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ArtifactDownloader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn download_url(&self) -> String {
        format!(
            "{}/api/converter/download",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Fetches the artifact at a server-relative path. The path travels as
    /// the URL-encoded `file` query parameter; the token goes into the
    /// bearer header. Any non-success status fails without a partial file.
    pub async fn download(&self, server_path: &str, token: &str) -> Result<Artifact> {
        let url = self.download_url();
        tracing::debug!("📡 Downloading {} via {}", server_path, url);

        let response = self
            .client
            .get(&url)
            .query(&[("file", server_path)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ConvertError::Download {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::Download {
                status: Some(status.as_u16()),
                message: format!("artifact endpoint returned status {}", status),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConvertError::Download {
                status: Some(status.as_u16()),
                message: e.to_string(),
            })?;

        Ok(Artifact {
            file_name: artifact_file_name(server_path),
            bytes: bytes.to_vec(),
        })
    }
}

impl Artifact {
    /// Writes the payload under its derived filename and releases it.
    pub fn save_to(self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let target = dir.join(&self.file_name);
        std::fs::write(&target, &self.bytes)?;
        Ok(target)
    }
}

/// Last path segment of a server path. Directories are stripped on both
/// separators, backslash first, because the service reports paths in either
/// convention.
pub fn artifact_file_name(server_path: &str) -> String {
    let tail = server_path.rsplit('\\').next().unwrap_or(server_path);
    tail.rsplit('/').next().unwrap_or(tail).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_backslash_path() {
        assert_eq!(artifact_file_name("C:\\out\\file.csv"), "file.csv");
    }

    #[test]
    fn test_file_name_from_forward_slash_path() {
        assert_eq!(artifact_file_name("/srv/out/file.csv"), "file.csv");
    }

    #[test]
    fn test_file_name_from_mixed_path() {
        assert_eq!(artifact_file_name("C:\\srv/out\\data/file.xlsx"), "file.xlsx");
    }

    #[test]
    fn test_file_name_without_directories() {
        assert_eq!(artifact_file_name("file.csv"), "file.csv");
    }

    #[test]
    fn test_save_to_writes_payload_under_derived_name() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = Artifact {
            file_name: "out.csv".to_string(),
            bytes: b"a,b\n1,2".to_vec(),
        };

        let saved = artifact.save_to(dir.path()).unwrap();
        assert_eq!(saved, dir.path().join("out.csv"));
        assert_eq!(std::fs::read(saved).unwrap(), b"a,b\n1,2");
    }
}
