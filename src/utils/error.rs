use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("unsupported file type: {mime}")]
    UnsupportedType { mime: String },

    #[error("error parsing file: {message}")]
    Parse { message: String },

    #[error("conversion failed: {message}")]
    Conversion { status: u16, message: String },

    #[error("download failed: {message}")]
    Download {
        /// HTTP status when the endpoint answered, `None` for network-level failures.
        status: Option<u16>,
        message: String,
    },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
