//! `workforce-client`
//!
//! **Responsibility:** every remote call the console makes.
//!
//! This crate provides:
//! - [`ApiClient`]: base URL, request timeout and bearer token
//! - [`ResourceClient`] over the `workers` and `roles` collections
//! - [`HttpAuthGateway`] for the credential exchange
//! - worker identity verification
//!
//! Failures are normalized into [`ApiError`] before they leave this crate.

pub mod error;
pub mod gateway;
pub mod http;
pub mod resource;
pub mod verify;

pub use error::ApiError;
pub use gateway::HttpAuthGateway;
pub use http::ApiClient;
pub use resource::{HttpResourceClient, IdOf, Resource, ResourceClient, Roles, Workers};
pub use verify::{VerificationRequest, VerificationResult};
