//! Durable storage for session bearer tokens.
//!
//! The portal persists exactly two opaque strings, the access and refresh
//! tokens, under fixed keys. Presence of the access token is the sole signal
//! that a previous session may be restorable. Only the session manager
//! writes through this interface; the HTTP client reads the access token to
//! build `Authorization` headers.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::errors::TokenStoreError;

/// Storage key for the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key for the long-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Process-wide durable key-value storage for the two session tokens.
pub trait TokenStore: Send + Sync {
    /// Returns the stored access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Returns the stored refresh token, if any.
    fn refresh_token(&self) -> Option<String>;

    /// Persists a fresh token pair, replacing whatever was stored before.
    /// A missing refresh token removes any previously stored one.
    fn store(&self, access: &str, refresh: Option<&str>) -> Result<(), TokenStoreError>;

    /// Removes both tokens. Safe to call when nothing is stored.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// [`TokenStore`] backed by a small JSON file on disk.
///
/// The file is rewritten wholesale on every mutation; there are at most two
/// keys in it, so atomicity beyond the single write is not a concern. A
/// corrupt file is treated as empty rather than as a fatal condition, the
/// same way a cleared browser storage would be.
pub struct FileTokenStore {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl FileTokenStore {
    /// Opens (or initializes) the store at `path`, creating parent
    /// directories as needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let cache = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "token file corrupt, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, cache: &HashMap<String, String>) -> Result<(), TokenStoreError> {
        let raw = serde_json::to_string_pretty(cache)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get(ACCESS_TOKEN_KEY).cloned()
    }

    fn refresh_token(&self) -> Option<String> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get(REFRESH_TOKEN_KEY).cloned()
    }

    fn store(&self, access: &str, refresh: Option<&str>) -> Result<(), TokenStoreError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.insert(ACCESS_TOKEN_KEY.to_owned(), access.to_owned());
        match refresh {
            Some(refresh) => cache.insert(REFRESH_TOKEN_KEY.to_owned(), refresh.to_owned()),
            None => cache.remove(REFRESH_TOKEN_KEY),
        };
        self.persist(&cache)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.remove(ACCESS_TOKEN_KEY);
        cache.remove(REFRESH_TOKEN_KEY);
        self.persist(&cache)
    }
}

/// In-memory [`TokenStore`] for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    cache: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get(ACCESS_TOKEN_KEY).cloned()
    }

    fn refresh_token(&self) -> Option<String> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get(REFRESH_TOKEN_KEY).cloned()
    }

    fn store(&self, access: &str, refresh: Option<&str>) -> Result<(), TokenStoreError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.insert(ACCESS_TOKEN_KEY.to_owned(), access.to_owned());
        match refresh {
            Some(refresh) => cache.insert(REFRESH_TOKEN_KEY.to_owned(), refresh.to_owned()),
            None => cache.remove(REFRESH_TOKEN_KEY),
        };
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.remove(ACCESS_TOKEN_KEY);
        cache.remove(REFRESH_TOKEN_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_round_trips_tokens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");

        let store = FileTokenStore::open(&path).unwrap();
        assert!(store.access_token().is_none());

        store.store("acc", Some("ref")).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("acc"));
        assert_eq!(store.refresh_token().as_deref(), Some("ref"));

        // A fresh handle over the same file sees the persisted pair.
        let reopened = FileTokenStore::open(&path).unwrap();
        assert_eq!(reopened.access_token().as_deref(), Some("acc"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("ref"));
    }

    #[test]
    fn storing_without_refresh_drops_the_old_one() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::open(dir.path().join("tokens.json")).unwrap();

        store.store("acc1", Some("ref1")).unwrap();
        store.store("acc2", None).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("acc2"));
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn clear_is_idempotent_and_persistent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::open(&path).unwrap();

        store.store("acc", Some("ref")).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.access_token().is_none());

        let reopened = FileTokenStore::open(&path).unwrap();
        assert!(reopened.access_token().is_none());
        assert!(reopened.refresh_token().is_none());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileTokenStore::open(&path).unwrap();
        assert!(store.access_token().is_none());
    }
}
