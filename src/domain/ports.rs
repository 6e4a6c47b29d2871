use crate::domain::model::{ConversionResult, Preview, UploadFile};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Persistent string key/value storage shared by every invocation under the
/// same state directory. No locking; concurrent writers race and the last
/// one wins.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Renders a preview into a displayable artifact. The concrete output
/// technology stays behind this seam.
pub trait TableRenderer {
    fn render(&self, preview: &Preview) -> String;
}

/// The remote conversion service boundary.
#[async_trait]
pub trait RemoteConverter: Send + Sync {
    async fn convert(
        &self,
        upload: &UploadFile,
        content: Vec<u8>,
        token: &str,
    ) -> Result<ConversionResult>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn output_path(&self) -> &str;
    fn state_dir(&self) -> &Path;
}
