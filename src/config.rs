//! Configuration management for Taskify
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! Later sources win: file, then `TASKIFY_*` environment variables, then
//! command-line flags.

use crate::error::{Result, TaskifyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Session backends accepted by `session.backend`
pub const SESSION_BACKENDS: [&str; 3] = ["file", "keyring", "memory"];

/// Main configuration structure for Taskify
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where the login session is kept
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend: "file", "keyring" or "memory"
    #[serde(default = "default_session_backend")]
    pub backend: String,

    /// Session file location for the file backend
    ///
    /// When unset the file lives in the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_session_backend() -> String {
    "file".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            path: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TaskifyError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TaskifyError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("TASKIFY_API_URL") {
            if !base_url.trim().is_empty() {
                self.api.base_url = base_url;
            }
        }

        if let Ok(backend) = std::env::var("TASKIFY_SESSION_BACKEND") {
            self.session.backend = backend.to_lowercase();
        }

        if let Ok(path) = std::env::var("TASKIFY_SESSION_FILE") {
            if !path.trim().is_empty() {
                self.session.path = Some(PathBuf::from(path));
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            tracing::debug!("Using API URL override from CLI: {}", api_url);
            self.api.base_url = api_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`TaskifyError::Config`] for an unparsable or non-http(s)
    /// base URL, or an unknown session backend.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(TaskifyError::Config("api.base_url cannot be empty".to_string()).into());
        }

        let url = url::Url::parse(self.api.base_url.trim()).map_err(|e| {
            TaskifyError::Config(format!(
                "Invalid api.base_url {}: {}",
                self.api.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TaskifyError::Config(format!(
                "api.base_url must use http or https, got: {}",
                url.scheme()
            ))
            .into());
        }

        if !SESSION_BACKENDS.contains(&self.session.backend.as_str()) {
            return Err(TaskifyError::Config(format!(
                "Invalid session backend: {}. Must be one of: {}",
                self.session.backend,
                SESSION_BACKENDS.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
