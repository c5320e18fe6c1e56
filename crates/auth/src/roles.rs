use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Access role of the signed-in operator (e.g. `"admin"`).
///
/// Distinct from the worker categories managed in the console; this is the
/// operator's own authorization label, kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessRole(Cow<'static, str>);

impl AccessRole {
    pub const ADMIN: AccessRole = AccessRole(Cow::Borrowed("admin"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccessRole {
    fn default() -> Self {
        Self::ADMIN
    }
}

impl core::fmt::Display for AccessRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
