//! Credential exchange contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Credentials, User};

/// Token and identity returned by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGrant {
    /// Opaque bearer token issued by the backend. Never inspected client-side.
    pub access_token: String,
    pub user: User,
}

/// Normalized authentication failure. `Display` is the operator-facing text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("could not reach the server: {0}")]
    Network(String),

    #[error("server error: {0}")]
    Server(String),

    /// The backend accepted the credentials but issued no token.
    #[error("the server accepted the credentials but did not issue a session token")]
    MissingToken,
}

/// Translates a credential pair into a session token via one remote call.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant, AuthError>;
}
