//! HTTP implementation of the credential exchange.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use workforce_auth::{AccessRole, AuthError, AuthGateway, Credentials, LoginGrant, User};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Token-issuing credential endpoint used unless another path is configured.
///
/// Backends that only expose the boolean `/admin/validate-credentials` check
/// must either add this route or be targeted with
/// [`HttpAuthGateway::with_path`]; a bare boolean reply then surfaces as
/// [`AuthError::MissingToken`].
pub const LOGIN_PATH: &str = "/admin/login";

/// Boolean-only credential check of older backends.
pub const LEGACY_VALIDATE_PATH: &str = "/admin/validate-credentials";

#[derive(Debug, Deserialize)]
struct TokenReply {
    access_token: String,
    #[serde(default)]
    user: Option<User>,
}

/// Posts credentials to the login path and requires a backend-issued token.
///
/// A bare `false` reply (or 401) means invalid credentials. A bare `true`
/// reply is rejected with [`AuthError::MissingToken`]: no token is fabricated
/// on the client.
pub struct HttpAuthGateway {
    api: Arc<ApiClient>,
    path: String,
}

impl HttpAuthGateway {
    /// Gateway posting to [`LOGIN_PATH`].
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_path(api, LOGIN_PATH)
    }

    pub fn with_path(api: Arc<ApiClient>, path: impl Into<String>) -> Self {
        Self { api, path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant, AuthError> {
        let req = self.api.post(&self.path).json(credentials);
        let body: Value = self
            .api
            .execute(req, "error while validating credentials")
            .await
            .map_err(|err| match err {
                ApiError::Unauthorized(_) => AuthError::InvalidCredentials,
                ApiError::Network(msg) => AuthError::Network(msg),
                other => AuthError::Server(other.to_string()),
            })?;

        match body {
            Value::Bool(false) => Err(AuthError::InvalidCredentials),
            Value::Bool(true) => Err(AuthError::MissingToken),
            reply @ Value::Object(_) => {
                let reply: TokenReply = serde_json::from_value(reply)
                    .map_err(|e| AuthError::Server(format!("unexpected login reply: {e}")))?;
                if reply.access_token.is_empty() {
                    return Err(AuthError::MissingToken);
                }
                let user = reply.user.unwrap_or_else(|| User {
                    username: credentials.username.clone(),
                    role: AccessRole::ADMIN,
                });
                Ok(LoginGrant {
                    access_token: reply.access_token,
                    user,
                })
            }
            other => Err(AuthError::Server(format!("unexpected login reply: {other}"))),
        }
    }
}
