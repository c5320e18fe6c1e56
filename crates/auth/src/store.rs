//! Session store: the single writer of [`Session`] state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::storage::{AUTH_TOKEN_KEY, SessionStorage, USER_DATA_KEY};
use crate::{AuthGateway, Credentials, LoginGrant, Session, User};

/// Error reported by a login whose result arrived after a logout.
pub const LOGIN_CANCELLED: &str = "login cancelled by logout";

/// Tagged result of [`SessionStore::login`]; login never returns an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { error: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success)
    }
}

/// Logins issued since the last logout.
#[derive(Debug, Default)]
struct Epoch {
    generation: u64,
    in_flight: usize,
}

/// Explicitly constructed session container.
///
/// Observers (route guards, pages) subscribe to a `watch` channel and are
/// re-evaluated on every change. Overlapping logins resolve to the call that
/// settles last. `logout` starts a new epoch: logins issued before it are
/// discarded when they settle, so they cannot resurrect a signed-out session.
/// The epoch check and the resulting write happen under one lock.
pub struct SessionStore {
    state: watch::Sender<Session>,
    gateway: Arc<dyn AuthGateway>,
    storage: Arc<dyn SessionStorage>,
    epoch: Mutex<Epoch>,
}

impl SessionStore {
    /// Create a store, hydrating from `storage` when a token is persisted.
    pub fn new(gateway: Arc<dyn AuthGateway>, storage: Arc<dyn SessionStorage>) -> Self {
        let session = hydrate(storage.as_ref());
        if session.is_authenticated() {
            tracing::info!("restored persisted session");
        }
        let (state, _) = watch::channel(session);
        Self {
            state,
            gateway,
            storage,
            epoch: Mutex::new(Epoch::default()),
        }
    }

    fn epoch(&self) -> MutexGuard<'_, Epoch> {
        self.epoch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current session state.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Change feed for guards and pages.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub async fn login(&self, credentials: Credentials) -> LoginOutcome {
        let generation = {
            let mut epoch = self.epoch();
            epoch.in_flight += 1;
            self.state.send_modify(|s| {
                s.is_loading = true;
                s.error = None;
            });
            epoch.generation
        };
        tracing::info!(username = %credentials.username, "login started");

        let result = self.gateway.authenticate(&credentials).await;

        let mut epoch = self.epoch();
        if epoch.generation != generation {
            tracing::debug!(username = %credentials.username, "login settled after logout; result discarded");
            return LoginOutcome::Failure {
                error: LOGIN_CANCELLED.to_string(),
            };
        }
        epoch.in_flight = epoch.in_flight.saturating_sub(1);
        let still_loading = epoch.in_flight > 0;

        match result {
            Ok(grant) => {
                self.persist(&grant);
                let LoginGrant { access_token, user } = grant;
                self.state.send_replace(Session {
                    user: Some(user),
                    token: Some(access_token),
                    is_loading: still_loading,
                    error: None,
                });
                tracing::info!(username = %credentials.username, "login succeeded");
                LoginOutcome::Success
            }
            Err(err) => {
                if let Err(storage_err) = self.storage.clear_session() {
                    tracing::warn!(error = %storage_err, "failed to clear persisted session");
                }
                let message = err.to_string();
                self.state.send_replace(Session {
                    error: Some(message.clone()),
                    is_loading: still_loading,
                    ..Session::empty()
                });
                tracing::warn!(username = %credentials.username, error = %message, "login failed");
                LoginOutcome::Failure { error: message }
            }
        }
    }

    /// Clear persisted storage and reset to the empty session. Idempotent.
    pub fn logout(&self) {
        let mut epoch = self.epoch();
        epoch.generation += 1;
        epoch.in_flight = 0;
        if let Err(err) = self.storage.clear_session() {
            tracing::warn!(error = %err, "failed to clear persisted session");
        }
        let was_authenticated = self.state.send_replace(Session::empty()).is_authenticated();
        if was_authenticated {
            tracing::info!("logged out");
        }
    }

    /// Clear only the error field.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    fn persist(&self, grant: &LoginGrant) {
        let user_json = match serde_json::to_string(&grant.user) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode user for persistence");
                return;
            }
        };
        let result = self
            .storage
            .set(AUTH_TOKEN_KEY, &grant.access_token)
            .and_then(|_| self.storage.set(USER_DATA_KEY, &user_json));
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to persist session; continuing in memory");
        }
    }
}

fn hydrate(storage: &dyn SessionStorage) -> Session {
    let token = match storage.get(AUTH_TOKEN_KEY) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(error = %err, "could not read persisted session");
            None
        }
    };
    let Some(token) = token else {
        return Session::empty();
    };
    let user = storage
        .get(USER_DATA_KEY)
        .ok()
        .flatten()
        .and_then(|raw| serde_json::from_str::<User>(&raw).ok());
    Session {
        user,
        token: Some(token),
        is_loading: false,
        error: None,
    }
}
