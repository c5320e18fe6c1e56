//! Login screen controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use workforce_auth::{Credentials, LoginField, LoginOutcome, LoginValidation, Route, SessionStore};

/// Bound state of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Result of the last submit attempt that failed validation.
    pub validation: LoginValidation,
}

impl LoginForm {
    pub fn field_error(&self, field: LoginField) -> Option<&'static str> {
        self.validation.error(field)
    }
}

/// Drives the public login page against the session store.
pub struct LoginController {
    store: Arc<SessionStore>,
    form: Mutex<LoginForm>,
}

impl LoginController {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            form: Mutex::new(LoginForm::default()),
        }
    }

    fn form_mut(&self) -> MutexGuard<'_, LoginForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn form(&self) -> LoginForm {
        self.form_mut().clone()
    }

    /// Editing a field clears a failed-login message from the store.
    pub fn set_username(&self, value: impl Into<String>) {
        self.form_mut().username = value.into();
        self.store.clear_error();
    }

    pub fn set_password(&self, value: impl Into<String>) {
        self.form_mut().password = value.into();
        self.store.clear_error();
    }

    /// Validate, then log in. Returns the route to navigate to when the
    /// session is authenticated once this call settles.
    ///
    /// Invalid input is reported per field and never reaches the store.
    pub async fn submit(&self) -> Option<Route> {
        let credentials = {
            let mut form = self.form_mut();
            let credentials = Credentials::new(form.username.clone(), form.password.clone());
            form.validation = credentials.validate();
            if !form.validation.is_valid() {
                tracing::debug!("login form rejected before submit");
                return None;
            }
            credentials
        };

        match self.store.login(credentials).await {
            LoginOutcome::Success if self.store.snapshot().is_authenticated() => Some(Route::LANDING),
            _ => None,
        }
    }
}
