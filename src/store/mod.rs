pub mod file_kv;
pub mod transfer;

pub use file_kv::FileKvStore;
pub use transfer::ResultTransferStore;

/// Keys for the session token and the stored conversion result. Both are
/// cleared together on logout.
pub const TOKEN_KEY: &str = "token";
pub const RESULT_KEY: &str = "conversionResult";
