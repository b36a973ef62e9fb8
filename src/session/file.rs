//! File-backed session store
//!
//! The session is kept as a small JSON document, by default
//! `<data dir>/session.json` as resolved by [`directories::ProjectDirs`].
//! Writes go to a sibling temporary file that is then renamed over the
//! target, so readers never observe a half-written record.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;

use super::{Session, SessionStore};
use crate::error::{Result, TaskifyError};

/// Session store persisted to a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by the file at `path`
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the user's data directory
    ///
    /// # Errors
    ///
    /// Returns [`TaskifyError::Session`] if the platform data directory
    /// cannot be determined.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Default session file path
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "taskify", "taskify")
            .ok_or_else(|| TaskifyError::Session("Could not determine data directory".into()))?;
        Ok(proj_dirs.data_dir().join("session.json"))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

impl SessionStore for FileSessionStore {
    fn session(&self) -> Result<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TaskifyError::Session(format!(
                    "Failed to read session file {}: {}",
                    self.path.display(),
                    e
                ))
                .into())
            }
        };

        let session: Session = serde_json::from_str(&contents).map_err(|e| {
            TaskifyError::Session(format!(
                "Corrupt session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create session directory")
                .map_err(|e| TaskifyError::Session(format!("{:#}", e)))?;
        }

        let json = serde_json::to_vec_pretty(session)?;
        let tmp = self.temp_path();
        {
            let mut file = create_private(&tmp)
                .context("Failed to create session file")
                .map_err(|e| TaskifyError::Session(format!("{:#}", e)))?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)
            .context("Failed to replace session file")
            .map_err(|e| TaskifyError::Session(format!("{:#}", e)))?;

        tracing::debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed session file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TaskifyError::Session(format!(
                "Failed to remove session file {}: {}",
                self.path.display(),
                e
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::temp_dir;

    #[test]
    fn test_missing_file_means_no_session() {
        let dir = temp_dir();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.session().unwrap(), None);
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn test_session_survives_new_store_instance() {
        let dir = temp_dir();
        let path = dir.path().join("nested").join("session.json");

        FileSessionStore::new(&path)
            .set_session("tok", "me@example.com")
            .unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.get_token().unwrap().as_deref(), Some("tok"));
        assert_eq!(
            reopened.get_email().unwrap().as_deref(),
            Some("me@example.com")
        );
    }

    #[test]
    fn test_file_uses_consistent_keys() {
        let dir = temp_dir();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.set_session("tok", "me@example.com").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["token"], "tok");
        assert_eq!(value["email"], "me@example.com");
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let dir = temp_dir();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.set_session("tok", "me@example.com").unwrap();
        store.clear_session().unwrap();
        assert!(!store.path().exists());
        store.clear_session().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_a_session_error() {
        let dir = temp_dir();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let err = FileSessionStore::new(&path).session().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskifyError>(),
            Some(TaskifyError::Session(_))
        ));
    }

    #[test]
    fn test_save_error_keeps_io_cause() {
        let dir = temp_dir();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let store = FileSessionStore::new(blocker.join("session.json"));

        let err = store.set_session("tok", "me@example.com").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskifyError>(),
            Some(TaskifyError::Session(_))
        ));
        let message = err.to_string();
        let prefix = "Session error: Failed to create session directory: ";
        assert!(message.starts_with(prefix), "{}", message);
        assert!(message.len() > prefix.len(), "{}", message);
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.set_session("tok", "me@example.com").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
