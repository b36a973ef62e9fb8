//! `/auth` endpoints
//!
//! These calls only talk to the server. Validating form input and storing
//! the returned session are the job of [`crate::account`].

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ApiClient, Credential};
use crate::error::Result;

/// Request body for register and login
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful register/login response
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Email the token was issued for
    pub email: String,
    /// Informational message from the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("message", &self.message)
            .finish()
    }
}

/// Authentication endpoint group, obtained from [`ApiClient::auth`]
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/register`
    ///
    /// Sent without a bearer token.
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.post_credentials("auth/register", email, password)
            .await
    }

    /// `POST /auth/login`
    ///
    /// Sent without a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.post_credentials("auth/login", email, password).await
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<()> {
        let req = self
            .client
            .request(Method::POST, "auth/logout", Credential::Session)?;
        self.client.execute_empty(req).await
    }

    async fn post_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let req = self
            .client
            .request(Method::POST, path, Credential::Anonymous)?
            .json(&body);
        self.client.execute_json(req).await
    }
}
