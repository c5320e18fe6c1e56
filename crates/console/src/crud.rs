//! CRUD orchestrator: one page of workers or roles.
//!
//! A controller owns the cached collection and the open modal, and drives the
//! [`ResourceClient`] for create, edit and delete. Every mutation outcome is
//! surfaced exactly once through the [`NotificationCenter`]. Only one mutation
//! may be in flight per controller; conflicting actions are refused with
//! [`ConsoleError::Busy`] until it settles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use workforce_client::{ApiError, Resource, ResourceClient, Workers};
use workforce_core::Entity;

use crate::error::ConsoleError;
use crate::modal::{DeleteConfirmation, Modal};
use crate::notification::{Notification, NotificationCenter};

/// Something that can re-fetch its collection.
#[async_trait]
pub trait Reload: Send + Sync {
    async fn reload(&self) -> Result<(), ConsoleError>;
}

struct PageState<R: Resource> {
    items: Vec<R::Entity>,
    modal: Modal<R>,
    busy: bool,
}

impl<R: Resource> Default for PageState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            modal: Modal::Closed,
            busy: false,
        }
    }
}

enum Mutation<R: Resource> {
    Create(R::Form),
    Update(R::Entity, R::Form),
}

pub struct CrudController<R: Resource> {
    client: Arc<dyn ResourceClient<R>>,
    notifications: NotificationCenter,
    state: Mutex<PageState<R>>,
    /// Reloaded after every successful mutation of this collection.
    dependents: Mutex<Vec<Arc<dyn Reload>>>,
    mounted: AtomicBool,
}

impl<R: Resource> CrudController<R> {
    pub fn new(client: Arc<dyn ResourceClient<R>>, notifications: NotificationCenter) -> Self {
        Self {
            client,
            notifications,
            state: Mutex::new(PageState::default()),
            dependents: Mutex::new(Vec::new()),
            mounted: AtomicBool::new(true),
        }
    }

    /// Reload `dependent` after each successful mutation here.
    pub fn add_dependent(&self, dependent: Arc<dyn Reload>) {
        self.dependents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(dependent);
    }

    fn state(&self) -> MutexGuard<'_, PageState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_mounted(&self) -> Result<(), ConsoleError> {
        if self.mounted.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ConsoleError::Unmounted)
        }
    }

    pub fn items(&self) -> Vec<R::Entity> {
        self.state().items.clone()
    }

    pub fn modal(&self) -> Modal<R> {
        self.state().modal.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    /// Full re-fetch of the collection. The cache is replaced, never merged.
    pub async fn load(&self) -> Result<(), ConsoleError> {
        self.ensure_mounted()?;
        let result = self.client.list_all().await;
        self.ensure_mounted()?;

        match result {
            Ok(items) => {
                tracing::debug!(collection = R::COLLECTION, count = items.len(), "collection loaded");
                self.state().items = items;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(collection = R::COLLECTION, error = %err, "failed to load collection");
                self.notifications.show(Notification::error("Error", err.to_string()));
                Err(err.into())
            }
        }
    }

    fn open(&self, modal: Modal<R>) -> Result<(), ConsoleError> {
        self.ensure_mounted()?;
        let mut state = self.state();
        if state.busy {
            return Err(ConsoleError::Busy);
        }
        state.modal = modal;
        Ok(())
    }

    pub fn request_create(&self) -> Result<(), ConsoleError> {
        self.open(Modal::Creating { form: R::Form::default() })
    }

    pub fn request_edit(&self, entity: &R::Entity) -> Result<(), ConsoleError> {
        self.open(Modal::Editing {
            target: entity.clone(),
            form: R::Form::from(entity),
        })
    }

    pub fn request_delete(&self, entity: &R::Entity) -> Result<(), ConsoleError> {
        self.open(Modal::ConfirmingDelete(DeleteConfirmation::new(entity.clone())))
    }

    pub fn close_modal(&self) {
        self.state().modal = Modal::Closed;
    }

    /// Edit the bound form of the create/edit modal.
    pub fn edit_form(&self, edit: impl FnOnce(&mut R::Form)) -> Result<(), ConsoleError> {
        let mut state = self.state();
        match &mut state.modal {
            Modal::Creating { form } | Modal::Editing { form, .. } => {
                edit(form);
                Ok(())
            }
            _ => Err(ConsoleError::NoActiveForm),
        }
    }

    /// Update the typed confirmation text; returns whether it now matches.
    pub fn type_delete_confirmation(&self, typed: impl Into<String>) -> Result<bool, ConsoleError> {
        let mut state = self.state();
        match &mut state.modal {
            Modal::ConfirmingDelete(confirmation) => {
                confirmation.typed = typed.into();
                Ok(confirmation.matches())
            }
            _ => Err(ConsoleError::NoActiveForm),
        }
    }

    /// Whether the confirm-delete action is enabled.
    pub fn can_confirm_delete(&self) -> bool {
        let state = self.state();
        !state.busy && matches!(&state.modal, Modal::ConfirmingDelete(c) if c.matches())
    }

    /// Submit the open create/edit form.
    ///
    /// On success the modal closes, a success notification is shown and the
    /// collection (plus dependents) is reloaded. On failure the modal stays
    /// open with its form intact and one error notification is shown.
    pub async fn submit(&self) -> Result<R::Entity, ConsoleError> {
        self.ensure_mounted()?;
        let mutation = {
            let mut state = self.state();
            if state.busy {
                return Err(ConsoleError::Busy);
            }
            let mutation: Mutation<R> = match &state.modal {
                Modal::Creating { form } => Mutation::Create(form.clone()),
                Modal::Editing { target, form } => Mutation::Update(target.clone(), form.clone()),
                _ => return Err(ConsoleError::NoActiveForm),
            };
            state.busy = true;
            mutation
        };

        let (verb, result) = match &mutation {
            Mutation::Create(form) => ("created", self.client.create(form).await),
            Mutation::Update(target, form) => ("updated", self.client.update(target.id(), form).await),
        };

        self.state().busy = false;
        self.ensure_mounted()?;

        match result {
            Ok(entity) => {
                tracing::info!(collection = R::COLLECTION, id = %entity.id(), verb, "mutation succeeded");
                self.state().modal = Modal::Closed;
                self.notifications
                    .show(Notification::success("Success", format!("{} {verb}", capitalized(R::LABEL))));
                self.refresh().await;
                Ok(entity)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Delete the pending target if the typed name matches.
    ///
    /// A mismatch never reaches the client. Once the call settles the
    /// confirmation modal closes whatever the outcome.
    pub async fn confirm_delete(&self) -> Result<(), ConsoleError> {
        self.ensure_mounted()?;
        let target = {
            let mut state = self.state();
            if state.busy {
                return Err(ConsoleError::Busy);
            }
            let Modal::ConfirmingDelete(confirmation) = &state.modal else {
                return Err(ConsoleError::NoActiveForm);
            };
            if !confirmation.matches() {
                return Err(ConsoleError::NotConfirmable);
            }
            let target = confirmation.target.clone();
            state.busy = true;
            target
        };

        let result = self.client.delete(target.id()).await;

        {
            let mut state = self.state();
            state.busy = false;
            state.modal = Modal::Closed;
        }
        self.ensure_mounted()?;

        match result {
            Ok(()) => {
                tracing::info!(collection = R::COLLECTION, id = %target.id(), "deleted");
                self.notifications.show(Notification::success(
                    "Success",
                    format!("{} {} deleted", capitalized(R::LABEL), target.display_name()),
                ));
                self.refresh().await;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Stop settling calls from touching state or notifications.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    fn fail(&self, err: ApiError) -> ConsoleError {
        tracing::warn!(collection = R::COLLECTION, error = %err, "mutation failed");
        self.notifications.show(Notification::error("Error", err.to_string()));
        ConsoleError::Api(err)
    }

    async fn refresh(&self) {
        // load() notifies its own failures
        if let Err(err) = self.load().await {
            tracing::debug!(collection = R::COLLECTION, error = %err, "reload after mutation failed");
        }
        let dependents = self
            .dependents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for dependent in dependents {
            if let Err(err) = dependent.reload().await {
                tracing::debug!(error = %err, "dependent reload failed");
            }
        }
    }
}

impl CrudController<Workers> {
    /// Open the read-only worker view.
    pub fn request_view(&self, worker: &<Workers as Resource>::Entity) -> Result<(), ConsoleError> {
        self.open(Modal::Viewing { target: worker.clone() })
    }
}

#[async_trait]
impl<R: Resource> Reload for CrudController<R> {
    async fn reload(&self) -> Result<(), ConsoleError> {
        self.load().await
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
