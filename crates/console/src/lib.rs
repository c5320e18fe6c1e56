//! `workforce-console`
//!
//! **Responsibility:** the admin console's page logic, free of any UI toolkit.
//!
//! This crate provides:
//! - [`NotificationCenter`]: the single-slot notification timer
//! - [`CrudController`]: create/edit/view/delete orchestration per collection
//! - [`LoginController`] and [`VerificationController`]
//! - [`AdminConsole`]: everything wired around one session store
//!
//! Rendering layers bind to controller state and turn [`workforce_auth::Guarded`]
//! outcomes into navigation.

pub mod config;
pub mod console;
pub mod crud;
pub mod error;
pub mod login;
pub mod modal;
pub mod notification;
pub mod verification;

#[cfg(test)]
mod testing;

pub use config::ConsoleConfig;
pub use console::AdminConsole;
pub use crud::{CrudController, Reload};
pub use error::ConsoleError;
pub use login::{LoginController, LoginForm};
pub use modal::{DeleteConfirmation, Modal, ModalVisibility};
pub use notification::{LiveNotification, Notification, NotificationCenter, NotificationKind, Phase};
pub use verification::{Capture, VerificationController, VerificationForm};
