pub mod config;
pub mod core;
pub mod domain;
pub mod store;
pub mod utils;

pub use crate::config::{Cli, Command, Settings};
pub use crate::core::convert::ConverterClient;
pub use crate::core::download::ArtifactDownloader;
pub use crate::core::session::Session;
pub use crate::store::FileKvStore;
pub use crate::utils::error::{ConvertError, Result};
