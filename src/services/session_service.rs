use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{Result, WhisperError};

/// Registration rejects longer display names locally, before any network call.
pub const MAX_FULL_NAME_LEN: usize = 30;

/// Credential and display name persisted between application runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub full_name: String,
}

/// Persistence port for the session store, so tests can substitute an
/// in-memory implementation.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>>;
    fn save(&self, session: &StoredSession) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub fn get_app_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| WhisperError::Config("could not find data directory".to_string()))?
        .join("FileWhisper");

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

/// File-backed store under the fixed `FileWhisper` data-dir namespace.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: get_app_data_dir()?.join("session.json"),
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&content)
            .map_err(|e| WhisperError::Config(format!("failed to parse session state: {}", e)))?;
        Ok(Some(session))
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)
            .map_err(|e| WhisperError::Config(format!("failed to serialize session: {}", e)))?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory store, used by tests in place of the file-backed one.
#[derive(Default)]
pub struct MemoryCredentialStore {
    session: Mutex<Option<StoredSession>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self
            .session
            .lock()
            .map_err(|_| WhisperError::Internal("credential store poisoned".to_string()))?
            .clone())
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        *self
            .session
            .lock()
            .map_err(|_| WhisperError::Internal("credential store poisoned".to_string()))? =
            Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .session
            .lock()
            .map_err(|_| WhisperError::Internal("credential store poisoned".to_string()))? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::at(dir.path().join("session.json"));

        assert_eq!(store.load().unwrap(), None);

        let session = StoredSession {
            token: "t1".to_string(),
            full_name: "Ada".to_string(),
        };
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // clearing twice is fine
        store.clear().unwrap();
    }
}
