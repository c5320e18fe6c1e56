//! Role join for worker listings.
//!
//! Workers reference roles by id. The join is performed once per data load
//! from the latest role collection, so a role rename shows up on every worker
//! row as soon as the role collection is reloaded.

use std::collections::HashMap;

use crate::id::RoleId;
use crate::role::Role;
use crate::worker::Worker;

/// Lookup table built from the current role collection.
#[derive(Debug, Clone, Default)]
pub struct RoleDirectory {
    by_id: HashMap<RoleId, Role>,
}

impl RoleDirectory {
    pub fn new(roles: &[Role]) -> Self {
        Self {
            by_id: roles.iter().map(|r| (r.id, r.clone())).collect(),
        }
    }

    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.by_id.get(&id)
    }

    pub fn label(&self, id: RoleId) -> RoleLabel {
        match self.get(id) {
            Some(role) => RoleLabel::Known {
                name: role.name.clone(),
                color: role.color.clone(),
            },
            None => RoleLabel::Unknown(id),
        }
    }

    /// Join workers with their roles, numbering rows from 1.
    pub fn rows(&self, workers: &[Worker]) -> Vec<WorkerRow> {
        workers
            .iter()
            .enumerate()
            .map(|(i, w)| WorkerRow {
                index: i + 1,
                worker: w.clone(),
                role: self.label(w.role),
            })
            .collect()
    }
}

/// Resolved role display for one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleLabel {
    Known { name: String, color: String },
    /// The worker points at a role id missing from the directory.
    Unknown(RoleId),
}

impl RoleLabel {
    pub fn name(&self) -> Option<&str> {
        match self {
            RoleLabel::Known { name, .. } => Some(name),
            RoleLabel::Unknown(_) => None,
        }
    }
}

impl core::fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RoleLabel::Known { name, .. } => f.write_str(name),
            RoleLabel::Unknown(_) => f.write_str("Unassigned"),
        }
    }
}

/// One display row of the worker table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRow {
    pub index: usize,
    pub worker: Worker,
    pub role: RoleLabel,
}
