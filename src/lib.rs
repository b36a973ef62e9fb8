//! Taskify - task and appointment client library
//!
//! This library talks to a Taskify server: it keeps the signed-in session,
//! attaches the session token to outgoing requests, reacts to rejected
//! tokens, and derives the dashboard summary from fetched data.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Session record and pluggable stores (file, keyring, memory)
//! - `api`: HTTP access layer with bearer-token injection and 401 handling
//! - `account`: Registration validation and the login/logout lifecycle
//! - `models`: Task and appointment wire types
//! - `dashboard`: Summary statistics over tasks and appointments
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskify::api::ApiClient;
//! use taskify::session::MemorySessionStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:8080/api", Arc::new(MemorySessionStore::new()))?;
//!     taskify::account::login(&client, "me@example.com", "secret").await?;
//!
//!     let stats = taskify::dashboard::load_dashboard(&client, chrono::Local::now().naive_local()).await?;
//!     println!("{}% done", stats.completion_rate());
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use api::{ApiClient, AuthFailureHandler};
pub use config::Config;
pub use dashboard::DashboardStats;
pub use error::{Result, TaskifyError};
pub use models::{Appointment, Task, TaskStatus};
pub use session::{Session, SessionStore};

#[cfg(test)]
pub mod test_utils;
