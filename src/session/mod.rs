//! Session persistence for authenticated API access
//!
//! A session is the bearer token returned by login/register together with
//! the email it was issued for. Both live in one [`Session`] record, so a
//! store can only ever hold both or neither.
//!
//! The API client reads the store before every request and clears it when
//! the server rejects the token. Stores are injected as
//! `Arc<dyn SessionStore>`; there is no process-wide session.
//!
//! Implementations:
//!
//! - [`MemorySessionStore`] -- in-process only, used by tests and embedders
//! - [`file::FileSessionStore`] -- JSON file in the user's data directory
//! - [`keyring_store::KeyringSessionStore`] -- OS native credential store

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::{Result, TaskifyError};

pub mod file;
pub mod keyring_store;

pub use file::FileSessionStore;
pub use keyring_store::KeyringSessionStore;

/// Credentials of the signed-in user
///
/// No expiry is tracked locally: a token is valid until the server says
/// otherwise.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the server
    pub token: String,
    /// Email address the token was issued for
    pub email: String,
}

impl Session {
    /// Build a session, rejecting an empty token.
    ///
    /// # Errors
    ///
    /// Returns [`TaskifyError::Session`] when `token` is empty.
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TaskifyError::Session("session token cannot be empty".to_string()).into());
        }
        Ok(Self {
            token,
            email: email.into(),
        })
    }
}

// Keep tokens out of logs and panic messages.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

/// Storage for the current [`Session`]
///
/// Implementors only provide whole-record load, save and clear; the
/// accessors are derived from those, so token and email can never drift
/// apart.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Current session, if any.
    fn session(&self) -> Result<Option<Session>>;

    /// Replace the stored session in a single write.
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session. A no-op when nothing is stored.
    fn clear_session(&self) -> Result<()>;

    /// Persist `token` and `email` together.
    fn set_session(&self, token: &str, email: &str) -> Result<()> {
        let session = Session::new(token, email)?;
        self.save(&session)
    }

    /// Token of the current session.
    fn get_token(&self) -> Result<Option<String>> {
        Ok(self.session()?.map(|s| s.token))
    }

    /// Email of the current session.
    fn get_email(&self) -> Result<Option<String>> {
        Ok(self.session()?.map(|s| s.email))
    }

    /// Whether a token is present. Says nothing about server-side validity.
    fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session()?.is_some())
    }
}

/// Process-local session store
///
/// # Examples
///
/// ```
/// use taskify::session::{MemorySessionStore, SessionStore};
///
/// let store = MemorySessionStore::new();
/// store.set_session("abc", "me@example.com").unwrap();
/// assert!(store.is_authenticated().unwrap());
/// store.clear_session().unwrap();
/// assert_eq!(store.get_email().unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `session`
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn session(&self) -> Result<Option<Session>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| TaskifyError::Session("session lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| TaskifyError::Session("session lock poisoned".to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| TaskifyError::Session("session lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Open the session store selected by configuration
///
/// The keyring backend keys its entry by the API host, so `base_url` must
/// be the configured API base URL.
///
/// # Errors
///
/// Returns [`TaskifyError::Config`] for an unknown backend or an unusable
/// base URL, and [`TaskifyError::Session`] when the default session file
/// location cannot be resolved.
pub fn open_store(config: &SessionConfig, base_url: &str) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.backend.as_str() {
        "file" => match &config.path {
            Some(path) => Arc::new(FileSessionStore::new(path)),
            None => Arc::new(FileSessionStore::at_default_location()?),
        },
        "keyring" => {
            let url = url::Url::parse(base_url.trim())
                .map_err(|e| TaskifyError::Config(format!("Invalid api.base_url: {}", e)))?;
            Arc::new(KeyringSessionStore::for_base_url(&url))
        }
        "memory" => Arc::new(MemorySessionStore::new()),
        other => {
            return Err(TaskifyError::Config(format!("Invalid session backend: {}", other)).into())
        }
    };
    tracing::debug!("Using {} session store", config.backend);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_store_selects_file_backend_with_path() {
        let dir = crate::test_utils::temp_dir();
        let config = SessionConfig {
            backend: "file".to_string(),
            path: Some(dir.path().join("s.json")),
        };
        let store = open_store(&config, "http://localhost:8080/api").unwrap();
        store.set_session("tok", "a@example.com").unwrap();
        assert!(dir.path().join("s.json").exists());
    }

    #[test]
    fn test_open_store_rejects_unknown_backend() {
        let config = SessionConfig {
            backend: "cookie".to_string(),
            path: None,
        };
        assert!(open_store(&config, "http://localhost:8080/api").is_err());
    }

    #[test]
    fn test_new_store_is_unauthenticated() {
        let store = MemorySessionStore::new();
        assert!(!store.is_authenticated().unwrap());
        assert_eq!(store.get_token().unwrap(), None);
        assert_eq!(store.get_email().unwrap(), None);
    }

    #[test]
    fn test_set_session_stores_token_and_email_together() {
        let store = MemorySessionStore::new();
        store.set_session("tok-1", "a@example.com").unwrap();
        assert!(store.is_authenticated().unwrap());
        assert_eq!(store.get_token().unwrap().as_deref(), Some("tok-1"));
        assert_eq!(store.get_email().unwrap().as_deref(), Some("a@example.com"));
    }

    #[test]
    fn test_set_session_replaces_previous_session() {
        let store = MemorySessionStore::new();
        store.set_session("tok-1", "a@example.com").unwrap();
        store.set_session("tok-2", "b@example.com").unwrap();
        assert_eq!(
            store.session().unwrap(),
            Some(Session::new("tok-2", "b@example.com").unwrap())
        );
    }

    #[test]
    fn test_clear_session_removes_both_fields() {
        let store = MemorySessionStore::new();
        store.set_session("tok-1", "a@example.com").unwrap();
        store.clear_session().unwrap();
        assert_eq!(store.session().unwrap(), None);
        // clearing twice is fine
        store.clear_session().unwrap();
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let store = MemorySessionStore::new();
        let err = store.set_session("", "a@example.com").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskifyError>(),
            Some(TaskifyError::Session(_))
        ));
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new("super-secret", "a@example.com").unwrap();
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("a@example.com"));
    }
}
