use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::TempDir;
use wiremock::MockServer;

use taskify::api::{ApiClient, AuthFailureHandler};
use taskify::session::{MemorySessionStore, Session, SessionStore};

/// Auth-failure handler that counts how often it fired
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct RecordingHandler {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AuthFailureHandler for RecordingHandler {
    fn on_auth_failure(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory store, optionally pre-populated with a session
#[allow(dead_code)]
pub fn memory_store(token: Option<&str>) -> Arc<MemorySessionStore> {
    match token {
        Some(token) => Arc::new(MemorySessionStore::with_session(
            Session::new(token, "me@example.com").expect("valid session"),
        )),
        None => Arc::new(MemorySessionStore::new()),
    }
}

/// Client pointed at `<server>/api` with a recording auth-failure handler
#[allow(dead_code)]
pub fn client_for(
    server: &MockServer,
    store: Arc<dyn SessionStore>,
) -> (ApiClient, Arc<RecordingHandler>) {
    let handler = Arc::new(RecordingHandler::default());
    let client = ApiClient::new(&format!("{}/api", server.uri()), store)
        .expect("valid base url")
        .with_auth_failure_handler(handler.clone());
    (client, handler)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
