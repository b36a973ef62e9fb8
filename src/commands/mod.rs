/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `auth`         -- register, login, logout, whoami
- `tasks`        -- task CRUD and status toggling
- `appointments` -- appointment CRUD
- `dashboard`    -- summary statistics

Handlers are thin: they build an [`ApiClient`] from configuration, call
the library, and print the result as a table or JSON.
*/

use std::sync::Arc;

use colored::Colorize;
use serde::Serialize;

use crate::account::display_message;
use crate::api::{ApiClient, AuthFailureHandler};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::{Result, TaskifyError};
use crate::session;

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod tasks;

/// Sends the user back to `taskify login` when the server rejects the
/// stored session.
#[derive(Debug, Default)]
pub struct LoginRedirect;

impl AuthFailureHandler for LoginRedirect {
    fn on_auth_failure(&self) {
        tracing::warn!("Session rejected by server; stored credentials cleared");
        eprintln!(
            "{} Run {} to sign in again.",
            "Your session has expired.".yellow(),
            "taskify login".cyan()
        );
    }
}

/// Build the API client described by `config`, with the CLI's
/// auth-failure handler installed
pub fn build_client(config: &Config) -> Result<ApiClient> {
    let store = session::open_store(&config.session, &config.api.base_url)?;
    Ok(ApiClient::from_config(config, store)?.with_auth_failure_handler(Arc::new(LoginRedirect)))
}

/// Client for `register` and `login`
///
/// A 401 there means bad credentials, not an expired session, so the
/// "sign in again" hint is not shown.
pub fn build_sign_in_client(config: &Config) -> Result<ApiClient> {
    let store = session::open_store(&config.session, &config.api.base_url)?;
    ApiClient::from_config(config, store)
}

/// Fail fast, without a request, when nobody is signed in
pub fn require_session(client: &ApiClient) -> Result<()> {
    if !client.session().is_authenticated()? {
        return Err(TaskifyError::NotLoggedIn.into());
    }
    Ok(())
}

/// Replace a failure with the message the user should see
///
/// The full error chain is kept in the debug log.
pub(crate) fn user_facing(err: anyhow::Error, fallback: &str) -> anyhow::Error {
    tracing::debug!("{}: {:#}", fallback, err);
    anyhow::anyhow!(display_message(&err, fallback))
}

/// Print `value` as pretty JSON
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Shorten `text` to at most `max` characters for table cells
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Dispatch a parsed command line
pub async fn run(config: Config, cli: Cli) -> Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Register {
            email,
            password,
            confirm_password,
        } => {
            let client = build_sign_in_client(&config)?;
            auth::register(&client, email, password, confirm_password).await
        }
        Commands::Login { email, password } => {
            let client = build_sign_in_client(&config)?;
            auth::login(&client, email, password).await
        }
        Commands::Logout => auth::logout(&build_client(&config)?).await,
        Commands::Whoami => auth::whoami(&build_client(&config)?, json),
        Commands::Tasks { command } => {
            tasks::handle_tasks(&build_client(&config)?, command, json).await
        }
        Commands::Appointments { command } => {
            appointments::handle_appointments(&build_client(&config)?, command, json).await
        }
        Commands::Dashboard => dashboard::show_dashboard(&build_client(&config)?, json).await,
    }
}
