//! Account commands: register, login, logout, whoami

use colored::Colorize;

use super::{print_json, user_facing};
use crate::account::{self, RegisterForm};
use crate::api::ApiClient;
use crate::error::{Result, TaskifyError};

fn require_password(password: Option<String>) -> Result<String> {
    password.ok_or_else(|| {
        TaskifyError::Validation(
            "Password is required (pass --password or set TASKIFY_PASSWORD)".to_string(),
        )
        .into()
    })
}

/// Create an account and store its session
pub async fn register(
    client: &ApiClient,
    email: String,
    password: Option<String>,
    confirm_password: Option<String>,
) -> Result<()> {
    let password = require_password(password)?;
    let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
    let form = RegisterForm {
        email,
        password,
        confirm_password,
    };

    let response = account::register(client, &form)
        .await
        .map_err(|e| user_facing(e, "Registration failed. Please try again."))?;
    println!(
        "{} {}",
        "Account created. Signed in as".green(),
        response.email.cyan()
    );
    Ok(())
}

/// Sign in and store the session
pub async fn login(client: &ApiClient, email: String, password: Option<String>) -> Result<()> {
    let password = require_password(password)?;
    let response = account::login(client, &email, &password)
        .await
        .map_err(|e| user_facing(e, "Login failed. Please try again."))?;
    println!("{} {}", "Signed in as".green(), response.email.cyan());
    Ok(())
}

/// Sign out
pub async fn logout(client: &ApiClient) -> Result<()> {
    account::logout(client).await?;
    println!("{}", "Signed out.".green());
    Ok(())
}

/// Print the signed-in account
pub fn whoami(client: &ApiClient, json: bool) -> Result<()> {
    let email = client.session().get_email()?;
    if json {
        return print_json(&serde_json::json!({
            "authenticated": email.is_some(),
            "email": email,
        }));
    }
    match email {
        Some(email) => println!("{}", email),
        None => println!("{}", "Not logged in".yellow()),
    }
    Ok(())
}
