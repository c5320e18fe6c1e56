//! Shared HTTP transport for every remote call of the console.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use workforce_auth::Session;

use crate::error::ApiError;

/// Where the bearer token comes from.
#[derive(Debug)]
enum TokenSource {
    None,
    Static(String),
    /// Read from the session store on every request.
    Session(watch::Receiver<Session>),
}

/// Thin wrapper over `reqwest::Client` that owns the base URL, the request
/// timeout and the bearer token of the current session.
#[derive(Debug)]
pub struct ApiClient {
    api_url: String,
    http: reqwest::Client,
    token: RwLock<TokenSource>,
}

impl ApiClient {
    /// Build a client. Timeouts surface as [`ApiError::Network`].
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            http,
            token: RwLock::new(TokenSource::None),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Attach (or detach) a fixed token sent as `Authorization: Bearer`.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token.map_or(TokenSource::None, TokenSource::Static);
        }
    }

    /// Follow the session store: requests carry whatever token the session
    /// holds at send time, and none after logout.
    pub fn attach_session(&self, session: watch::Receiver<Session>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = TokenSource::Session(session);
        }
    }

    fn current_token(&self) -> Option<String> {
        let guard = self.token.read().ok()?;
        match &*guard {
            TokenSource::None => None,
            TokenSource::Static(token) => Some(token.clone()),
            TokenSource::Session(rx) => rx.borrow().token().map(str::to_string),
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Send and decode a JSON reply.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let body = self.execute_raw(req, fallback).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "reply did not match the expected shape");
            ApiError::Decode(e.to_string())
        })
    }

    /// Send and return the reply body of a 2xx response.
    pub(crate) async fn execute_raw(
        &self,
        mut req: RequestBuilder,
        fallback: &str,
    ) -> Result<String, ApiError> {
        if let Some(token) = self.current_token() {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed before a response was received");
            ApiError::network(&e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::network(&e))?;
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "request succeeded");
            return Ok(body);
        }

        let err = ApiError::from_response(status.as_u16(), &body, fallback);
        tracing::warn!(status = status.as_u16(), error = %err, "request rejected");
        Err(err)
    }
}
