use crate::domain::model::{ConversionResult, UploadFile};
use crate::domain::ports::RemoteConverter;
use crate::utils::error::{ConvertError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

/// Client for the remote conversion endpoint.
pub struct ConverterClient {
    client: Client,
    base_url: String,
}

impl ConverterClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn convert_url(&self) -> String {
        format!(
            "{}/api/converter/convert",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct ConvertEnvelope {
    #[serde(default)]
    message: Option<String>,
    result: ConversionResult,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
impl RemoteConverter for ConverterClient {
    async fn convert(
        &self,
        upload: &UploadFile,
        content: Vec<u8>,
        token: &str,
    ) -> Result<ConversionResult> {
        let url = self.convert_url();
        let part = Part::bytes(content)
            .file_name(upload.file_name.clone())
            .mime_str(upload.media.mime())?;
        let form = Form::new().part("file", part);

        tracing::debug!("📡 Uploading {} to {}", upload.file_name, url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 Conversion response status: {}", status);

        if !status.is_success() {
            // the service reports failures as {"error": "..."}
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("conversion endpoint returned status {}", status));
            return Err(ConvertError::Conversion {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ConvertEnvelope = response.json().await?;
        if let Some(message) = envelope.message {
            tracing::debug!("📡 {}", message);
        }
        Ok(envelope.result)
    }
}
