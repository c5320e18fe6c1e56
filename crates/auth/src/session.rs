//! Client-side session state.

use crate::User;

/// In-memory representation of the current authenticated identity.
///
/// Only [`crate::SessionStore`] mutates a session. Authentication is derived
/// from the token, so `is_authenticated()` can never disagree with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub(crate) user: Option<User>,
    pub(crate) token: Option<String>,
    pub(crate) is_loading: bool,
    pub(crate) error: Option<String>,
}

impl Session {
    /// The signed-out state.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
