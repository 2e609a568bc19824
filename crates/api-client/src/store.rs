//! Persisted session tokens
//!
//! The backend issues a short-lived access token and a longer-lived refresh
//! token. The pair is the only client state that survives a process restart,
//! so it sits behind a small key-value interface: the interceptor and the
//! session holder never touch the filesystem directly, which keeps both
//! testable against an in-memory store.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Access/refresh token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer credential for API calls
    pub access_token: String,
    /// Longer-lived credential exchanged for a new pair
    pub refresh_token: String,
}

impl TokenPair {
    /// Create a new pair
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Storage for the persisted token pair
///
/// Implementations must be cheap to call; `load` runs on every request.
pub trait TokenStore: Send + Sync {
    /// Read the stored pair, if any
    fn load(&self) -> ApiResult<Option<TokenPair>>;

    /// Persist a pair, replacing any previous one
    fn save(&self, tokens: &TokenPair) -> ApiResult<()>;

    /// Remove the stored pair; clearing an empty store is not an error
    fn clear(&self) -> ApiResult<()>;
}

/// In-memory token store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a pair
    #[must_use]
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ApiResult<Option<TokenPair>> {
        Ok(self
            .tokens
            .read()
            .map_err(|_| ApiError::storage("Token store lock poisoned"))?
            .clone())
    }

    fn save(&self, tokens: &TokenPair) -> ApiResult<()> {
        *self
            .tokens
            .write()
            .map_err(|_| ApiError::storage("Token store lock poisoned"))? = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        *self
            .tokens
            .write()
            .map_err(|_| ApiError::storage("Token store lock poisoned"))? = None;
        Ok(())
    }
}

/// File-backed token store
///
/// Persists the pair as JSON under the user config directory, the CLI analog
/// of the original browser local storage.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at the default location
    /// (`<config_dir>/velora/session.json`)
    pub fn new() -> ApiResult<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| ApiError::storage("Could not determine user config directory"))?;
        Ok(Self {
            path: base.join("velora").join("session.json"),
        })
    }

    /// Create a store at a specific path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ApiResult<Option<TokenPair>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let tokens: TokenPair = serde_json::from_str(&contents)
                    .map_err(|e| ApiError::storage(format!("Corrupt session file: {e}")))?;
                Ok(Some(tokens))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApiError::storage(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, tokens: &TokenPair) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(tokens)?;
        std::fs::write(&self.path, json).map_err(|e| {
            ApiError::storage(format!("Failed to write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600));
        }

        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::storage(format!(
                "Failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().unwrap().is_none());

        let pair = TokenPair::new("access-1", "refresh-1");
        store.save(&pair).unwrap();
        assert_eq!(store.load().unwrap(), Some(pair));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_clear_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at_path(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        let pair = TokenPair::new("access-1", "refresh-1");
        store.save(&pair).unwrap();
        assert_eq!(store.load().unwrap(), Some(pair));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing again must not fail
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::at_path(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_token_pair_camel_case_wire_format() {
        let pair = TokenPair::new("a", "r");
        let json = serde_json::to_string(&pair).unwrap();
        assert!(json.contains("accessToken"));
        assert!(json.contains("refreshToken"));
    }
}
