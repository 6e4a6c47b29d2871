use crate::domain::ports::KvStore;
use crate::store::{ResultTransferStore, TOKEN_KEY};
use crate::utils::error::Result;

/// Session context owning the credential and the result hand-off.
///
/// The token is acquired elsewhere and only carried here; logout destroys
/// the token and the stored conversion result together.
pub struct Session<S: KvStore> {
    kv: S,
    transfer: ResultTransferStore<S>,
}

impl<S: KvStore + Clone> Session<S> {
    pub fn new(kv: S) -> Self {
        Self {
            transfer: ResultTransferStore::new(kv.clone()),
            kv,
        }
    }
}

impl<S: KvStore> Session<S> {
    pub fn token(&self) -> Option<String> {
        match self.kv.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Could not read session token: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.kv.set(TOKEN_KEY, token)
    }

    pub fn result_store(&self) -> &ResultTransferStore<S> {
        &self.transfer
    }

    pub fn logout(&self) -> Result<()> {
        self.kv.remove(TOKEN_KEY)?;
        self.transfer.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ConversionResult, OriginalFile};
    use crate::store::FileKvStore;

    fn session_in(dir: &std::path::Path) -> Session<FileKvStore> {
        Session::new(FileKvStore::new(dir))
    }

    #[test]
    fn test_token_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());

        assert_eq!(session.token(), None);
        session.set_token("jwt-abc").unwrap();
        assert_eq!(session.token().as_deref(), Some("jwt-abc"));
    }

    #[test]
    fn test_logout_clears_token_and_result_together() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());

        session.set_token("jwt-abc").unwrap();
        session
            .result_store()
            .write(&ConversionResult {
                original_file: OriginalFile {
                    original_filename: "a.json".to_string(),
                    file_size: 1,
                },
                summary: None,
                preview: None,
                converted_at: None,
            })
            .unwrap();

        session.logout().unwrap();
        assert_eq!(session.token(), None);
        assert_eq!(session.result_store().read(), None);
    }

    #[test]
    fn test_logout_on_fresh_session_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        session_in(dir.path()).logout().unwrap();
    }
}
