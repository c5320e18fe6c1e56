//! Console-level errors returned by page controllers.

use thiserror::Error;

use workforce_client::ApiError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// A mutation is already in flight; the triggering control is disabled.
    #[error("another operation is still in progress")]
    Busy,

    /// The action needs a modal that is not open.
    #[error("no form is open for this action")]
    NoActiveForm,

    /// The typed name does not match the delete target.
    #[error("typed name does not match")]
    NotConfirmable,

    /// The page was unmounted while the call was pending.
    #[error("page is no longer mounted")]
    Unmounted,

    /// Input rejected before any remote call.
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
