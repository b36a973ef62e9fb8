//! Session persistence via OS keyring
//!
//! Stores the session record as JSON in the operating system's native
//! credential store (Keychain on macOS, Secret Service on Linux, Windows
//! Credential Manager on Windows). Entries live under the `taskify` service
//! and are keyed by an account name, normally the API host, so sessions for
//! different servers do not collide.

use super::{Session, SessionStore};
use crate::error::{Result, TaskifyError};

const SERVICE_NAME: &str = "taskify";

/// Keyring-backed session store
///
/// # Examples
///
/// ```no_run
/// use taskify::session::{KeyringSessionStore, SessionStore};
///
/// let store = KeyringSessionStore::new("localhost:8080");
/// store.set_session("token", "me@example.com").unwrap();
/// assert!(store.is_authenticated().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    account: String,
}

impl KeyringSessionStore {
    /// Store keyed by `account`
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    /// Account name derived from an API base URL (`host[:port]`)
    pub fn for_base_url(base_url: &url::Url) -> Self {
        let host = base_url.host_str().unwrap_or("default");
        let account = match base_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        Self::new(account)
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(SERVICE_NAME, &self.account)
            .map_err(|e| TaskifyError::Keyring(e).into())
    }
}

impl SessionStore for KeyringSessionStore {
    fn session(&self) -> Result<Option<Session>> {
        match self.entry()?.get_password() {
            Ok(json_str) => {
                let session: Session = serde_json::from_str(&json_str)?;
                Ok(Some(session))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(TaskifyError::Keyring(e).into()),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let json_str = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&json_str)
            .map_err(TaskifyError::Keyring)?;
        tracing::debug!("Saved session to keyring account {}", self.account);
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(TaskifyError::Keyring(e).into()),
        }
    }
}
