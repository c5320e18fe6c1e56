//! Modal state of one CRUD page.

use workforce_client::Resource;
use workforce_core::Entity;

/// Typed delete confirmation. The operator must re-type the target's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation<E> {
    pub target: E,
    pub typed: String,
}

impl<E: Entity> DeleteConfirmation<E> {
    pub fn new(target: E) -> Self {
        Self {
            target,
            typed: String::new(),
        }
    }

    /// Case-insensitive exact match of the typed text against the target name.
    pub fn matches(&self) -> bool {
        self.typed.to_lowercase() == self.target.display_name().to_lowercase()
    }
}

/// Which modal is open, together with its bound state.
pub enum Modal<R: Resource> {
    Closed,
    Creating { form: R::Form },
    Editing { target: R::Entity, form: R::Form },
    /// Read-only.
    Viewing { target: R::Entity },
    ConfirmingDelete(DeleteConfirmation<R::Entity>),
}

impl<R: Resource> Clone for Modal<R> {
    fn clone(&self) -> Self {
        match self {
            Modal::Closed => Modal::Closed,
            Modal::Creating { form } => Modal::Creating { form: form.clone() },
            Modal::Editing { target, form } => Modal::Editing {
                target: target.clone(),
                form: form.clone(),
            },
            Modal::Viewing { target } => Modal::Viewing { target: target.clone() },
            Modal::ConfirmingDelete(confirmation) => Modal::ConfirmingDelete(confirmation.clone()),
        }
    }
}

impl<R: Resource> core::fmt::Debug for Modal<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Modal::Closed => f.write_str("Closed"),
            Modal::Creating { form } => f.debug_struct("Creating").field("form", form).finish(),
            Modal::Editing { target, form } => f
                .debug_struct("Editing")
                .field("target", target)
                .field("form", form)
                .finish(),
            Modal::Viewing { target } => f.debug_struct("Viewing").field("target", target).finish(),
            Modal::ConfirmingDelete(confirmation) => f.debug_tuple("ConfirmingDelete").field(confirmation).finish(),
        }
    }
}

impl<R: Resource> Default for Modal<R> {
    fn default() -> Self {
        Modal::Closed
    }
}

impl<R: Resource> Modal<R> {
    pub fn is_closed(&self) -> bool {
        matches!(self, Modal::Closed)
    }

    pub fn form(&self) -> Option<&R::Form> {
        match self {
            Modal::Creating { form } | Modal::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn pending_delete(&self) -> Option<&R::Entity> {
        match self {
            Modal::ConfirmingDelete(confirmation) => Some(&confirmation.target),
            _ => None,
        }
    }

    pub fn visibility(&self) -> ModalVisibility {
        ModalVisibility {
            form: matches!(self, Modal::Creating { .. } | Modal::Editing { .. } | Modal::Viewing { .. }),
            read_only: matches!(self, Modal::Viewing { .. }),
            confirm_delete: matches!(self, Modal::ConfirmingDelete(_)),
        }
    }
}

/// Flags a rendering layer binds its modals to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalVisibility {
    pub form: bool,
    pub read_only: bool,
    pub confirm_delete: bool,
}
