use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "userToken";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential store is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Source of the bearer token attached to every backend request.
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Result<Option<String>, CredentialError>;
}

/// A provider whose token is set at login and cleared at logout.
pub trait CredentialStore: CredentialProvider {
    fn set_token(&self, token: &str) -> Result<(), CredentialError>;
    fn clear(&self) -> Result<(), CredentialError>;
}

/// Token held in process memory only.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: RwLock<Option<String>>,
}

impl MemoryCredentials {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl CredentialProvider for MemoryCredentials {
    fn token(&self) -> Result<Option<String>, CredentialError> {
        Ok(self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }
}

impl CredentialStore for MemoryCredentials {
    fn set_token(&self, token: &str) -> Result<(), CredentialError> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

/// Key/value JSON file; the token lives under [`TOKEN_KEY`].
/// Other keys in the file are preserved on write.
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, CredentialError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl CredentialProvider for FileCredentials {
    fn token(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.load()?.remove(TOKEN_KEY))
    }
}

impl CredentialStore for FileCredentials {
    fn set_token(&self, token: &str) -> Result<(), CredentialError> {
        let mut entries = self.load()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.save(&entries)?;
        tracing::debug!("Stored credentials in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        let mut entries = self.load()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.save(&entries)?;
            tracing::debug!("Cleared credentials in {}", self.path.display());
        }
        Ok(())
    }
}
