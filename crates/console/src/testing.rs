//! In-memory [`ResourceClient`] used by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use workforce_auth::{AccessRole, AuthError, AuthGateway, Credentials, LoginGrant, User};
use workforce_client::{ApiError, IdOf, Resource, ResourceClient, Roles, Workers};
use workforce_core::{Entity, Role, RoleId, RolePayload, Worker, WorkerId, WorkerPayload};

/// Builds a stored entity from an accepted payload.
pub(crate) trait Seeded: Resource {
    fn build(id: i64, payload: Self::Payload) -> Self::Entity;
}

impl Seeded for Roles {
    fn build(id: i64, payload: RolePayload) -> Role {
        Role {
            id: RoleId::new(id),
            name: payload.name,
            color: payload.color,
        }
    }
}

impl Seeded for Workers {
    fn build(id: i64, payload: WorkerPayload) -> Worker {
        Worker {
            id: WorkerId::new(id),
            name: payload.name,
            document: payload.document,
            role: payload.role,
            photo: payload.photo,
        }
    }
}

pub(crate) struct FakeClient<R: Resource> {
    items: Mutex<Vec<R::Entity>>,
    next_id: AtomicI64,
    fail_with: Mutex<Option<ApiError>>,
    /// Held by a test to keep mutations pending.
    pub latch: tokio::sync::Mutex<()>,
    pub lists: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl<R: Seeded> FakeClient<R> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_with: Mutex::new(None),
            latch: tokio::sync::Mutex::new(()),
            lists: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn seed(&self, payload: R::Payload) -> R::Entity {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entity = R::build(id, payload);
        self.items.lock().unwrap().push(entity.clone());
        entity
    }

    /// Make every following mutation fail with `err`.
    pub fn fail_with(&self, err: ApiError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    pub fn stored(&self) -> Vec<R::Entity> {
        self.items.lock().unwrap().clone()
    }

    fn failure(&self) -> Option<ApiError> {
        self.fail_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl<R: Seeded> ResourceClient<R> for FakeClient<R> {
    async fn list_all(&self) -> Result<Vec<R::Entity>, ApiError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored())
    }

    async fn get_by_id(&self, id: IdOf<R>) -> Result<R::Entity, ApiError> {
        self.stored()
            .into_iter()
            .find(|e| e.id() == id)
            .ok_or_else(|| ApiError::NotFound(format!("{} not found", R::LABEL)))
    }

    async fn create(&self, form: &R::Form) -> Result<R::Entity, ApiError> {
        let payload = R::to_payload(form)?;
        let _pending = self.latch.lock().await;
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.seed(payload))
    }

    async fn update(&self, id: IdOf<R>, form: &R::Form) -> Result<R::Entity, ApiError> {
        let payload = R::to_payload(form)?;
        let _pending = self.latch.lock().await;
        if let Some(err) = self.failure() {
            return Err(err);
        }
        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| ApiError::NotFound(format!("{} not found", R::LABEL)))?;
        let raw = id.to_string().parse::<i64>().unwrap();
        *slot = R::build(raw, payload);
        Ok(slot.clone())
    }

    async fn delete(&self, id: IdOf<R>) -> Result<(), ApiError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let _pending = self.latch.lock().await;
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.items.lock().unwrap().retain(|e| e.id() != id);
        Ok(())
    }
}

/// Gateway accepting exactly one credential pair.
pub(crate) struct FixedGateway {
    pub username: &'static str,
    pub password: &'static str,
    pub calls: AtomicUsize,
    /// Per-username latency.
    pub delays: Vec<(&'static str, Duration)>,
}

impl FixedGateway {
    pub fn admin() -> Self {
        Self {
            username: "admin",
            password: "s3cret",
            calls: AtomicUsize::new(0),
            delays: Vec::new(),
        }
    }
}

#[async_trait]
impl AuthGateway for FixedGateway {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((_, delay)) = self.delays.iter().find(|(user, _)| *user == credentials.username) {
            tokio::time::sleep(*delay).await;
        }
        if credentials.username == self.username && credentials.password == self.password {
            Ok(LoginGrant {
                access_token: "token-1".to_string(),
                user: User {
                    username: self.username.to_string(),
                    role: AccessRole::default(),
                },
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
