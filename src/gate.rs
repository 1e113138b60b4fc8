//! Session gate: the authenticated request wrapper.
//!
//! Every authenticated API call goes through [`SessionGate::fetch`], which
//!
//! 1. attaches the stored credential as a bearer header when there is one,
//! 2. defaults the content type to JSON unless the caller passed headers,
//! 3. on 401/403 clears the session fields, queues a redirect to the login
//!    page and fails with [`ClientError::SessionExpired`] so the caller never
//!    parses the body,
//! 4. otherwise hands back the raw response, whatever its status.
//!
//! Transport failures propagate unchanged. Nothing here retries.
//!
//! [`SessionGate::fetch_with_credential`] attaches the credential the same
//! way but leaves 401/403 to the caller. Background notification traffic
//! uses it, so a rejected poll or acknowledgement never signs the user out.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::navigation::{Navigator, Page};
use crate::session::SessionContext;

/// Per-request configuration.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Explicit headers. `None` means "JSON content type".
    pub headers: Option<HeaderMap>,
    /// JSON body, sent verbatim.
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: None,
            body: None,
        }
    }
}

impl RequestOptions {
    /// Plain GET.
    pub fn get() -> Self {
        Self::default()
    }

    /// POST with a JSON body.
    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            headers: None,
            body: Some(body),
        }
    }

    /// DELETE with a JSON body.
    pub fn delete(body: serde_json::Value) -> Self {
        Self {
            method: Method::DELETE,
            headers: None,
            body: Some(body),
        }
    }

    /// Replaces the default headers wholesale.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// Headers used when the caller does not supply any.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Authenticated HTTP wrapper bound to one API base URL.
#[derive(Debug, Clone)]
pub struct SessionGate {
    client: Client,
    base_url: String,
    session: SessionContext,
    navigator: Navigator,
}

impl SessionGate {
    /// Creates a gate with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: SessionContext,
        navigator: Navigator,
    ) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, session, navigator))
    }

    /// Creates a gate around a pre-configured HTTP client.
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        session: SessionContext,
        navigator: Navigator,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
            navigator,
        }
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session state this gate reads and clears.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Navigator that receives the login redirect.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends an authenticated request.
    ///
    /// Non-auth failure statuses (404, 500, ...) are returned as `Ok`; the
    /// caller inspects them.
    pub async fn fetch(&self, path: &str, options: RequestOptions) -> ClientResult<Response> {
        let token = self.session.token();
        if token.is_none() {
            log::debug!("No credential stored, sending {path} unauthenticated");
        }

        let response = self.build(path, options, token)?.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.expire_session(path, status);
            return Err(ClientError::SessionExpired);
        }

        Ok(response)
    }

    /// Sends a request with the stored credential but without expiry
    /// handling. Every status, 401/403 included, comes back as `Ok`.
    pub async fn fetch_with_credential(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<Response> {
        let token = self.session.token();
        Ok(self.build(path, options, token)?.send().await?)
    }

    /// Sends a request without credential or expiry handling.
    ///
    /// Used for the endpoints that establish a session (`/login`,
    /// `/signup`).
    pub async fn fetch_unauthenticated(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<Response> {
        Ok(self.build(path, options, None)?.send().await?)
    }

    fn build(
        &self,
        path: &str,
        options: RequestOptions,
        token: Option<String>,
    ) -> ClientResult<RequestBuilder> {
        let headers = options.headers.unwrap_or_else(default_headers);
        let mut request = self
            .client
            .request(options.method, self.url(path))
            .headers(headers);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Some(body) = options.body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        Ok(request)
    }

    fn expire_session(&self, path: &str, status: StatusCode) {
        log::warn!("Server rejected credential on {path} ({status}); signing out");

        if let Err(e) = self.session.clear_auth() {
            log::error!("Failed to clear session state: {e}");
        }
        self.navigator.redirect(Page::Login);
    }
}
