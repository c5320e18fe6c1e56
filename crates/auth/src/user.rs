//! Signed-in operator identity and the credentials used to obtain it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::AccessRole;

/// The operator identity held by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub role: AccessRole,
}

/// Username/password pair submitted on the login screen.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Client-side check run before any remote call.
    pub fn validate(&self) -> LoginValidation {
        let mut errors = BTreeMap::new();
        if self.username.trim().is_empty() {
            errors.insert(LoginField::Username, "username is required");
        }
        if self.password.trim().is_empty() {
            errors.insert(LoginField::Password, "password is required");
        }
        LoginValidation { errors }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    Username,
    Password,
}

/// Per-field outcome of [`Credentials::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginValidation {
    errors: BTreeMap<LoginField, &'static str>,
}

impl LoginValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: LoginField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }
}
