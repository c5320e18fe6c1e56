//! Assembly of every console component around one session store.

use std::sync::Arc;

use workforce_auth::{
    FileSessionStorage, Guarded, InMemorySessionStorage, Route, SessionStorage, SessionStore, resolve,
};
use workforce_client::{ApiClient, HttpAuthGateway, HttpResourceClient, ResourceClient, Roles, Workers};
use workforce_core::{RoleDirectory, WorkerRow};

use crate::config::ConsoleConfig;
use crate::crud::CrudController;
use crate::error::ConsoleError;
use crate::login::LoginController;
use crate::notification::NotificationCenter;
use crate::verification::VerificationController;

/// The admin console: session, guards, pages and the notification slot.
///
/// Everything is constructed explicitly and shared by `Arc`; there is no
/// process-wide state.
pub struct AdminConsole {
    api: Arc<ApiClient>,
    store: Arc<SessionStore>,
    notifications: NotificationCenter,
    workers: Arc<CrudController<Workers>>,
    roles: Arc<CrudController<Roles>>,
    login: LoginController,
    verification: VerificationController,
}

impl AdminConsole {
    /// Wire the console against the HTTP API described by `config`.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let api = Arc::new(ApiClient::new(config.api_url.clone(), config.request_timeout)?);
        let storage: Arc<dyn SessionStorage> = match &config.session_file {
            Some(path) => Arc::new(FileSessionStorage::new(path.clone())),
            None => Arc::new(InMemorySessionStorage::new()),
        };
        let gateway = Arc::new(HttpAuthGateway::with_path(api.clone(), config.login_path.clone()));
        let store = Arc::new(SessionStore::new(gateway, storage));
        let notifications = NotificationCenter::new(config.notification_visible, config.notification_exit);

        tracing::info!(api_url = %config.api_url, login_path = %config.login_path, "admin console configured");
        Ok(Self::from_parts(
            api.clone(),
            store,
            Arc::new(HttpResourceClient::<Workers>::new(api.clone())),
            Arc::new(HttpResourceClient::<Roles>::new(api)),
            notifications,
        ))
    }

    /// Wire the console from prebuilt parts. Requests sent through `api`
    /// carry the token held by `store`.
    pub fn from_parts(
        api: Arc<ApiClient>,
        store: Arc<SessionStore>,
        workers_client: Arc<dyn ResourceClient<Workers>>,
        roles_client: Arc<dyn ResourceClient<Roles>>,
        notifications: NotificationCenter,
    ) -> Self {
        api.attach_session(store.subscribe());

        let workers = Arc::new(CrudController::new(workers_client, notifications.clone()));
        let roles = Arc::new(CrudController::new(roles_client, notifications.clone()));
        // worker rows show role names, so role mutations refresh workers too
        roles.add_dependent(workers.clone());

        Self {
            login: LoginController::new(store.clone()),
            verification: VerificationController::new(api.clone(), notifications.clone()),
            api,
            store,
            notifications,
            workers,
            roles,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn workers(&self) -> &Arc<CrudController<Workers>> {
        &self.workers
    }

    pub fn roles(&self) -> &Arc<CrudController<Roles>> {
        &self.roles
    }

    pub fn login(&self) -> &LoginController {
        &self.login
    }

    pub fn verification(&self) -> &VerificationController {
        &self.verification
    }

    /// Resolve `path` against the route table and the current session.
    pub fn navigate(&self, path: &str) -> Guarded<Route> {
        let outcome = resolve(path, &self.store.snapshot());
        tracing::debug!(path, outcome = ?outcome, "navigation resolved");
        outcome
    }

    /// Fetch both collections.
    pub async fn load(&self) -> Result<(), ConsoleError> {
        tokio::try_join!(self.roles.load(), self.workers.load())?;
        Ok(())
    }

    /// Workers joined with the latest role cache.
    pub fn worker_rows(&self) -> Vec<WorkerRow> {
        RoleDirectory::new(&self.roles.items()).rows(&self.workers.items())
    }

    /// Sign out and return where to navigate.
    pub fn logout(&self) -> Route {
        self.store.logout();
        Route::Login
    }

    /// Stop pending work from touching page state.
    pub fn unmount(&self) {
        self.workers.unmount();
        self.roles.unmount();
        self.verification.unmount();
        self.notifications.shutdown();
    }
}
