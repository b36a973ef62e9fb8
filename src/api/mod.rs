//! Authenticated access to the Taskify REST API
//!
//! [`ApiClient`] wraps a single `reqwest::Client` bound to a base URL and a
//! [`SessionStore`]. Every request goes through the same pipeline:
//!
//! - **Outbound**: when the store holds a token it is attached as
//!   `Authorization: Bearer <token>`. The public auth endpoints (register,
//!   login) are sent without it.
//! - **Inbound**: a `401 Unauthorized` clears the session store, then calls
//!   the configured [`AuthFailureHandler`] once, then returns
//!   [`TaskifyError::Unauthorized`]. The handler is a notification only; the
//!   caller still sees the failure.
//! - Any other non-2xx status becomes [`TaskifyError::Api`] carrying the
//!   body's `error` field when the server supplied one.
//!
//! One call is one HTTP attempt: no retries, no backoff and no client-side
//! timeout beyond the transport defaults.
//!
//! Endpoints are grouped by entity:
//!
//! - [`ApiClient::auth`] -- register, login, logout
//! - [`ApiClient::tasks`] -- CRUD on `/tasks`
//! - [`ApiClient::appointments`] -- CRUD on `/appointments`

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::error::{Result, TaskifyError};
use crate::session::SessionStore;

pub mod auth;
pub mod resource;

pub use auth::{AuthApi, AuthResponse, Credentials};
pub use resource::{Appointments, Resource, ResourceApi, Tasks};

/// Callback fired when the server rejects the session token
///
/// The store has already been cleared when this runs. Hosts use it to send
/// the user back to their login flow; the access layer itself knows nothing
/// about navigation.
#[cfg_attr(test, mockall::automock)]
pub trait AuthFailureHandler: Send + Sync {
    /// Called exactly once per `401` response.
    fn on_auth_failure(&self);
}

/// Handler that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuthFailureHandler;

impl AuthFailureHandler for NoopAuthFailureHandler {
    fn on_auth_failure(&self) {}
}

/// Adapts a closure into an [`AuthFailureHandler`]
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use taskify::api::{AuthFailureHandler, FnAuthFailureHandler};
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// let handler = FnAuthFailureHandler::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// handler.on_auth_failure();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct FnAuthFailureHandler<F>(F);

impl<F> FnAuthFailureHandler<F>
where
    F: Fn() + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> AuthFailureHandler for FnAuthFailureHandler<F>
where
    F: Fn() + Send + Sync,
{
    fn on_auth_failure(&self) {
        (self.0)()
    }
}

/// Whether a request carries the session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Credential {
    /// Attach `Authorization: Bearer` when a token is stored
    Session,
    /// Never attach a token
    Anonymous,
}

/// Optional error payload on failed responses
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Client for the Taskify API
///
/// Cloning is cheap; clones share the connection pool, the session store
/// and the auth-failure handler.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use taskify::api::ApiClient;
/// use taskify::session::MemorySessionStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = ApiClient::new("http://localhost:8080/api", Arc::new(MemorySessionStore::new()))?;
/// client.auth().login("me@example.com", "secret").await?;
/// let tasks = client.tasks().get_all().await?;
/// println!("{} tasks", tasks.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    on_auth_failure: Arc<dyn AuthFailureHandler>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session)
            .finish()
    }
}

impl ApiClient {
    /// Build a client for `base_url` reading credentials from `session`
    ///
    /// The base URL must be an absolute `http` or `https` URL. Its path is
    /// kept: endpoint paths are resolved below it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskifyError::InvalidUrl`] or [`TaskifyError::Config`] for
    /// an unusable base URL, and [`TaskifyError::Http`] if the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("taskify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TaskifyError::Http)?;

        Ok(Self {
            http,
            base_url,
            session,
            on_auth_failure: Arc::new(NoopAuthFailureHandler),
        })
    }

    /// Build a client from loaded configuration
    pub fn from_config(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self> {
        Self::new(&config.api.base_url, session)
    }

    /// Replace the handler invoked on `401` responses
    pub fn with_auth_failure_handler(mut self, handler: Arc<dyn AuthFailureHandler>) -> Self {
        self.on_auth_failure = handler;
        self
    }

    /// Normalized base URL (always ends with `/`)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session store this client reads and clears
    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// Authentication endpoints
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Task endpoints
    pub fn tasks(&self) -> ResourceApi<'_, Tasks> {
        ResourceApi::new(self)
    }

    /// Appointment endpoints
    pub fn appointments(&self) -> ResourceApi<'_, Appointments> {
        ResourceApi::new(self)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(TaskifyError::InvalidUrl)?)
    }

    /// Start a request with the outbound headers applied
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        credential: Credential,
    ) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut req = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        if credential == Credential::Session {
            if let Some(token) = self.session.get_token()? {
                req = req.bearer_auth(token);
            }
        }

        Ok(req)
    }

    /// Send a prepared request and apply the inbound response rules
    pub(crate) async fn execute(&self, req: RequestBuilder) -> Result<reqwest::Response> {
        let req = req.build().map_err(TaskifyError::Http)?;
        let method = req.method().clone();
        let path = req.url().path().to_string();
        tracing::debug!("{} {}", method, path);

        let response = self.http.execute(req).await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, path, e);
            TaskifyError::Http(e)
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let (message, _) = error_message(response).await;
            tracing::warn!("{} {} returned 401; clearing session", method, path);
            if let Err(e) = self.session.clear_session() {
                tracing::error!("Failed to clear session after 401: {:#}", e);
            }
            self.on_auth_failure.on_auth_failure();
            return Err(TaskifyError::Unauthorized { message }.into());
        }

        if !status.is_success() {
            let (message, body) = error_message(response).await;
            tracing::warn!("{} {} returned {}: {}", method, path, status, body);
            return Err(TaskifyError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        tracing::debug!("{} {} -> {}", method, path, status);
        Ok(response)
    }

    /// Execute and decode a JSON body
    pub(crate) async fn execute_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let response = self.execute(req).await?;
        let bytes = response.bytes().await.map_err(TaskifyError::Http)?;
        let value = serde_json::from_slice(&bytes).map_err(TaskifyError::Serialization)?;
        Ok(value)
    }

    /// Execute and discard any body
    pub(crate) async fn execute_empty(&self, req: RequestBuilder) -> Result<()> {
        self.execute(req).await?;
        Ok(())
    }
}

/// Read a failed response's body, returning its non-blank `error` field
/// and the raw text
async fn error_message(response: reqwest::Response) -> (Option<String>, String) {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());
    (message, body)
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(TaskifyError::InvalidUrl)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TaskifyError::Config(format!(
            "API base URL must use http or https: {}",
            raw
        ))
        .into());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base: &str, store: Arc<MemorySessionStore>) -> ApiClient {
        ApiClient::new(base, store).expect("client")
    }

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let client = client_for(
            "http://localhost:8080/api",
            Arc::new(MemorySessionStore::new()),
        );
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            client.endpoint("/tasks/4").unwrap().as_str(),
            "http://localhost:8080/api/tasks/4"
        );
    }

    #[test]
    fn test_base_url_rejects_non_http_scheme() {
        let err = ApiClient::new("ftp://example.com", Arc::new(MemorySessionStore::new()))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskifyError>(),
            Some(TaskifyError::Config(_))
        ));
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        let err = ApiClient::new("not a url", Arc::new(MemorySessionStore::new())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskifyError>(),
            Some(TaskifyError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_invokes_handler_once_after_clearing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        store.set_session("expired", "me@example.com").unwrap();

        let observed = Arc::clone(&store);
        let mut handler = MockAuthFailureHandler::new();
        handler
            .expect_on_auth_failure()
            .times(1)
            .returning(move || {
                // the store is already empty when the handler runs
                assert!(!observed.is_authenticated().unwrap());
            });

        let client = client_for(&server.uri(), Arc::clone(&store))
            .with_auth_failure_handler(Arc::new(handler));

        let err = client.tasks().get_all().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskifyError>(),
            Some(TaskifyError::Unauthorized { message: None })
        ));
        assert!(!store.is_authenticated().unwrap());
    }

    #[tokio::test]
    async fn test_non_auth_failure_does_not_invoke_handler() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());
        store.set_session("tok", "me@example.com").unwrap();

        let mut handler = MockAuthFailureHandler::new();
        handler.expect_on_auth_failure().times(0);

        let client = client_for(&server.uri(), Arc::clone(&store))
            .with_auth_failure_handler(Arc::new(handler));

        let err = client.tasks().get_all().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskifyError>(),
            Some(TaskifyError::Api {
                status: 500,
                message: None
            })
        ));
        assert!(store.is_authenticated().unwrap());
    }
}
