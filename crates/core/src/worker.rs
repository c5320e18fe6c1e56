//! Worker entity: an employee with a document number and identity photo.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::{RoleId, WorkerId};

/// Worker record as returned by the backend.
///
/// `role` is a reference into the role collection; display name and color are
/// resolved through [`crate::RoleDirectory`], never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub document: String,
    pub role: RoleId,
    /// Base64 data URI or URL.
    #[serde(default)]
    pub photo: String,
}

impl Entity for Worker {
    type Id = WorkerId;

    fn id(&self) -> WorkerId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Editable worker form state, as bound to the create/edit/view modal.
///
/// `role` holds the raw value of the role select control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerForm {
    pub name: String,
    pub document_id: String,
    pub role: String,
    pub photo: Option<String>,
}

impl From<&Worker> for WorkerForm {
    fn from(worker: &Worker) -> Self {
        Self {
            name: worker.name.clone(),
            document_id: worker.document.clone(),
            role: worker.role.to_string(),
            photo: (!worker.photo.is_empty()).then(|| worker.photo.clone()),
        }
    }
}

/// Wire shape for worker create/update: `{name, document, role, photo}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPayload {
    pub name: String,
    pub document: String,
    pub role: RoleId,
    pub photo: String,
}

impl WorkerForm {
    /// Map form fields onto the wire payload, coercing `role` to an id.
    ///
    /// Only the role is checked here. Name, document and photo rules belong to
    /// the backend, whose field messages are surfaced verbatim.
    pub fn to_payload(&self) -> DomainResult<WorkerPayload> {
        if self.role.trim().is_empty() {
            return Err(DomainError::validation("role", "a role must be selected"));
        }
        let role = self
            .role
            .parse::<RoleId>()
            .map_err(|_| DomainError::validation("role", "must be a numeric role id"))?;

        Ok(WorkerPayload {
            name: self.name.clone(),
            document: self.document_id.clone(),
            role,
            photo: self.photo.clone().unwrap_or_default(),
        })
    }
}
