//! `workforce-auth`: operator session boundary.
//!
//! This crate is decoupled from HTTP: the credential exchange sits behind
//! [`AuthGateway`] and persistence behind [`SessionStorage`], so the store and
//! guards can be exercised in isolation.

pub mod gateway;
pub mod guard;
pub mod roles;
pub mod session;
pub mod storage;
pub mod store;
pub mod user;

pub use gateway::{AuthError, AuthGateway, LoginGrant};
pub use guard::{Guarded, Route, authenticated_only, public_only, resolve};
pub use roles::AccessRole;
pub use session::Session;
pub use storage::{FileSessionStorage, InMemorySessionStorage, SessionStorage, StorageError};
pub use store::{LOGIN_CANCELLED, LoginOutcome, SessionStore};
pub use user::{Credentials, LoginField, LoginValidation, User};
