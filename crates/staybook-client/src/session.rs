//! Session token storage for the gateway
//!
//! The login flow stores an opaque session bearer token under a single
//! `session_id` entry; the gateway only ever reads or clears it.
//! Storage is behind an injected capability trait so the gateway can be
//! exercised deterministically in tests and embedded behind whatever
//! persistence the host application uses.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Name of the stored token entry, shared with the session cookie
pub const SESSION_TOKEN_KEY: &str = "session_id";

/// Capability interface for reading and clearing the session bearer token
///
/// Implementations must clear every representation they persist when
/// `clear` is called; the gateway relies on that after an unauthorized
/// response.
pub trait SessionStore: Send + Sync {
    /// Current bearer token, if a session exists
    fn bearer_token(&self) -> Option<String>;

    /// Persist a new bearer token (written by the login flow)
    fn store_token(&self, token: &str) -> Result<()>;

    /// Remove the stored token entirely
    fn clear(&self) -> Result<()>;
}

/// In-process store for tests and embedders that own persistence
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already present
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.token.lock().expect("session store lock poisoned").clone()
    }

    fn store_token(&self, token: &str) -> Result<()> {
        *self.token.lock().expect("session store lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().expect("session store lock poisoned") = None;
        Ok(())
    }
}

/// File-backed store persisting the token across process restarts
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the token at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the token under the user configuration directory
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| Error::Configuration {
            message: "No user configuration directory available".to_string(),
            source: None,
        })?;
        Ok(Self {
            path: base.join("staybook").join(SESSION_TOKEN_KEY),
        })
    }

    /// Path the token is persisted at
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn bearer_token(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn store_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.bearer_token(), None);

        store.store_token("tok-123").unwrap();
        assert_eq!(store.bearer_token(), Some("tok-123".to_string()));

        store.clear().unwrap();
        assert_eq!(store.bearer_token(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join(SESSION_TOKEN_KEY));

        assert_eq!(store.bearer_token(), None);

        store.store_token("tok-456").unwrap();
        assert_eq!(store.bearer_token(), Some("tok-456".to_string()));

        store.clear().unwrap();
        assert_eq!(store.bearer_token(), None);
        // Clearing an already-empty store is not an error
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_surrounding_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_TOKEN_KEY);
        fs::write(&path, "  tok-789\n").unwrap();

        let store = FileSessionStore::new(path);
        assert_eq!(store.bearer_token(), Some("tok-789".to_string()));
    }

    #[test]
    fn test_file_store_treats_empty_file_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_TOKEN_KEY);
        fs::write(&path, "\n").unwrap();

        let store = FileSessionStore::new(path);
        assert_eq!(store.bearer_token(), None);
    }
}
