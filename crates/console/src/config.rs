//! Console configuration.

use std::path::PathBuf;
use std::time::Duration;

use workforce_client::gateway::LOGIN_PATH;

/// Runtime settings of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Base URL of the remote API.
    pub api_url: String,
    /// Credential endpoint under `api_url`.
    pub login_path: String,
    /// Upper bound for a single remote call.
    pub request_timeout: Duration,
    /// How long a notification stays fully visible.
    pub notification_visible: Duration,
    /// Exit-transition grace before a notification is removed.
    pub notification_exit: Duration,
    /// Persist the session to this file instead of memory.
    pub session_file: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            login_path: LOGIN_PATH.to_string(),
            request_timeout: Duration::from_secs(10),
            notification_visible: Duration::from_millis(3000),
            notification_exit: Duration::from_millis(300),
            session_file: None,
        }
    }
}

impl ConsoleConfig {
    /// Load from `WORKFORCE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup; unset or unparsable values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        Self {
            api_url: lookup("WORKFORCE_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_url),
            login_path: lookup("WORKFORCE_LOGIN_PATH")
                .map(|v| v.trim().to_string())
                .filter(|v| v.starts_with('/'))
                .unwrap_or(defaults.login_path),
            request_timeout: lookup("WORKFORCE_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            notification_visible: millis("WORKFORCE_NOTIFICATION_VISIBLE_MS", defaults.notification_visible),
            notification_exit: millis("WORKFORCE_NOTIFICATION_EXIT_MS", defaults.notification_exit),
            session_file: lookup("WORKFORCE_SESSION_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_notification_timing(mut self, visible: Duration, exit: Duration) -> Self {
        self.notification_visible = visible;
        self.notification_exit = exit;
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }
}
