//! Resource Client: list/get/create/update/delete over one collection.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use workforce_core::{DomainResult, Entity, Role, RoleForm, RolePayload, Worker, WorkerForm, WorkerPayload};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Identifier type of a resource's entity.
pub type IdOf<R> = <<R as Resource>::Entity as Entity>::Id;

/// Static description of one backend collection.
pub trait Resource: Send + Sync + 'static {
    type Entity: Entity + Clone + DeserializeOwned + Send + Sync + core::fmt::Debug;
    /// Form state bound to the create/edit modal.
    type Form: Clone + Default + Send + Sync + core::fmt::Debug + for<'a> From<&'a Self::Entity>;
    type Payload: Serialize + Send + Sync;

    /// Path segment under the API root (`/workers/`).
    const COLLECTION: &'static str;
    /// Singular, lower-case name used in messages.
    const LABEL: &'static str;

    fn to_payload(form: &Self::Form) -> DomainResult<Self::Payload>;
}

/// The `workers` collection.
#[derive(Debug, Clone, Copy)]
pub struct Workers;

/// The `roles` collection.
#[derive(Debug, Clone, Copy)]
pub struct Roles;

impl Resource for Workers {
    type Entity = Worker;
    type Form = WorkerForm;
    type Payload = WorkerPayload;

    const COLLECTION: &'static str = "workers";
    const LABEL: &'static str = "worker";

    fn to_payload(form: &WorkerForm) -> DomainResult<WorkerPayload> {
        form.to_payload()
    }
}

impl Resource for Roles {
    type Entity = Role;
    type Form = RoleForm;
    type Payload = RolePayload;

    const COLLECTION: &'static str = "roles";
    const LABEL: &'static str = "role";

    fn to_payload(form: &RoleForm) -> DomainResult<RolePayload> {
        form.to_payload()
    }
}

/// Remote CRUD contract. Every method settles to a value or one normalized
/// [`ApiError`].
#[async_trait]
pub trait ResourceClient<R: Resource>: Send + Sync {
    async fn list_all(&self) -> Result<Vec<R::Entity>, ApiError>;

    async fn get_by_id(&self, id: IdOf<R>) -> Result<R::Entity, ApiError>;

    async fn create(&self, form: &R::Form) -> Result<R::Entity, ApiError>;

    async fn update(&self, id: IdOf<R>, form: &R::Form) -> Result<R::Entity, ApiError>;

    async fn delete(&self, id: IdOf<R>) -> Result<(), ApiError>;
}

/// [`ResourceClient`] over the JSON API.
pub struct HttpResourceClient<R> {
    api: Arc<ApiClient>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpResourceClient<R> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    fn collection_path() -> String {
        format!("/{}/", R::COLLECTION)
    }

    fn item_path(id: IdOf<R>) -> String {
        format!("/{}/{}", R::COLLECTION, id)
    }
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for HttpResourceClient<R> {
    async fn list_all(&self) -> Result<Vec<R::Entity>, ApiError> {
        tracing::debug!(collection = R::COLLECTION, "listing");
        let fallback = format!("failed to load {}s", R::LABEL);
        self.api.execute(self.api.get(&Self::collection_path()), &fallback).await
    }

    async fn get_by_id(&self, id: IdOf<R>) -> Result<R::Entity, ApiError> {
        tracing::debug!(collection = R::COLLECTION, %id, "fetching");
        let fallback = format!("failed to load {}", R::LABEL);
        self.api.execute(self.api.get(&Self::item_path(id)), &fallback).await
    }

    async fn create(&self, form: &R::Form) -> Result<R::Entity, ApiError> {
        let payload = R::to_payload(form)?;
        tracing::debug!(collection = R::COLLECTION, "creating");
        let fallback = format!("failed to create {}", R::LABEL);
        let req = self.api.post(&Self::collection_path()).json(&payload);
        self.api.execute(req, &fallback).await
    }

    async fn update(&self, id: IdOf<R>, form: &R::Form) -> Result<R::Entity, ApiError> {
        let payload = R::to_payload(form)?;
        tracing::debug!(collection = R::COLLECTION, %id, "updating");
        let fallback = format!("failed to update {}", R::LABEL);
        let req = self.api.put(&Self::item_path(id)).json(&payload);
        self.api.execute(req, &fallback).await
    }

    async fn delete(&self, id: IdOf<R>) -> Result<(), ApiError> {
        tracing::debug!(collection = R::COLLECTION, %id, "deleting");
        let fallback = format!("failed to delete {}", R::LABEL);
        self.api.execute_raw(self.api.delete(&Self::item_path(id)), &fallback).await?;
        Ok(())
    }
}
