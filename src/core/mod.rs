pub mod convert;
pub mod download;
pub mod format;
pub mod normalize;
pub mod preview;
pub mod session;
pub mod xml;

pub use crate::domain::model::{
    ConversionResult, ConversionSummary, MediaType, OriginalFile, Preview, PreviewTable, Record,
    RecordSeq, UploadFile,
};
pub use crate::domain::ports::{ConfigProvider, KvStore, RemoteConverter, TableRenderer};
pub use crate::utils::error::Result;
