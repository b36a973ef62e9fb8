//! Register, login and logout workflows
//!
//! These wrap the raw `/auth` calls with the client-side rules: input is
//! validated before anything goes over the network, and a successful
//! register or login stores the returned token and email as one session.

use crate::api::{ApiClient, AuthResponse};
use crate::error::{Result, TaskifyError};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 4;

/// Registration input
#[derive(Clone)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegisterForm {
    /// Check the form without contacting the server
    ///
    /// # Errors
    ///
    /// Returns [`TaskifyError::Validation`] when the email is blank, the
    /// confirmation differs from the password, or the password is shorter
    /// than [`MIN_PASSWORD_LEN`] characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskify::account::RegisterForm;
    ///
    /// let form = RegisterForm {
    ///     email: "me@example.com".to_string(),
    ///     password: "abcd".to_string(),
    ///     confirm_password: "abce".to_string(),
    /// };
    /// assert_eq!(form.validate().unwrap_err().to_string(), "Passwords do not match");
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(TaskifyError::Validation("Email is required".to_string()).into());
        }
        if self.password != self.confirm_password {
            return Err(TaskifyError::Validation("Passwords do not match".to_string()).into());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TaskifyError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ))
            .into());
        }
        Ok(())
    }
}

/// Create an account and sign in as it
///
/// Nothing is sent when [`RegisterForm::validate`] fails.
pub async fn register(client: &ApiClient, form: &RegisterForm) -> Result<AuthResponse> {
    form.validate()?;
    let response = client
        .auth()
        .register(form.email.trim(), &form.password)
        .await?;
    client
        .session()
        .set_session(&response.token, &response.email)?;
    tracing::info!("Registered and signed in as {}", response.email);
    Ok(response)
}

/// Sign in and store the returned session
///
/// Blank email or password is rejected locally.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthResponse> {
    if email.trim().is_empty() {
        return Err(TaskifyError::Validation("Email is required".to_string()).into());
    }
    if password.is_empty() {
        return Err(TaskifyError::Validation("Password is required".to_string()).into());
    }

    let response = client.auth().login(email.trim(), password).await?;
    client
        .session()
        .set_session(&response.token, &response.email)?;
    tracing::info!("Signed in as {}", response.email);
    Ok(response)
}

/// Sign out
///
/// The server call is best effort; the local session is cleared even when
/// it fails.
pub async fn logout(client: &ApiClient) -> Result<()> {
    if let Err(e) = client.auth().logout().await {
        tracing::warn!("Logout request failed: {:#}", e);
    }
    client.session().clear_session()?;
    tracing::info!("Signed out");
    Ok(())
}

/// Message to show the user for a failed operation
///
/// Uses the validation text or the server-provided `error` field when one
/// exists, otherwise `fallback`.
///
/// # Examples
///
/// ```
/// use taskify::account::display_message;
/// use taskify::error::TaskifyError;
///
/// let err = anyhow::Error::from(TaskifyError::Api {
///     status: 400,
///     message: Some("Email already exists".to_string()),
/// });
/// assert_eq!(display_message(&err, "Registration failed"), "Email already exists");
///
/// let err = anyhow::Error::from(TaskifyError::Api { status: 500, message: None });
/// assert_eq!(display_message(&err, "Registration failed"), "Registration failed");
/// ```
pub fn display_message(err: &anyhow::Error, fallback: &str) -> String {
    match err.downcast_ref::<TaskifyError>() {
        Some(TaskifyError::Api {
            message: Some(message),
            ..
        })
        | Some(TaskifyError::Unauthorized {
            message: Some(message),
        }) => message.clone(),
        Some(e @ TaskifyError::Validation(_)) => e.to_string(),
        Some(e) if e.is_auth_failure() => e.to_string(),
        _ => fallback.to_string(),
    }
}
