//! `workforce-core`: domain building blocks for the workforce console.
//!
//! This crate contains **pure domain** types (no IO): identifiers, the worker
//! and role entities, client-side field normalization and the role join used
//! when listing workers.

pub mod entity;
pub mod error;
pub mod id;
pub mod role;
pub mod roster;
pub mod value_object;
pub mod worker;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{RoleId, WorkerId};
pub use role::{Role, RoleColor, RoleForm, RolePayload};
pub use roster::{RoleDirectory, RoleLabel, WorkerRow};
pub use value_object::ValueObject;
pub use worker::{Worker, WorkerForm, WorkerPayload};
