//! Route guards and the console route table.
//!
//! Guards are pure functions of [`Session`]; they hold no state and are meant
//! to be re-evaluated whenever the session store publishes a change.

use crate::Session;

/// Navigable locations of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Monitoring,
    Health,
    Info,
    ServicesHealth,
    Workers,
}

impl Route {
    /// Where an authenticated operator lands.
    pub const LANDING: Route = Route::Monitoring;

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/admin",
            Route::Monitoring => "/monitoring",
            Route::Health => "/health",
            Route::Info => "/info",
            Route::ServicesHealth => "/services/health",
            Route::Workers => "/workers",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        [
            Route::Root,
            Route::Login,
            Route::Monitoring,
            Route::Health,
            Route::Info,
            Route::ServicesHealth,
            Route::Workers,
        ]
        .into_iter()
        .find(|r| r.path() == trimmed)
    }
}

/// Outcome of a guard: render the child, show a placeholder, or navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<C> {
    Render(C),
    Loading,
    Redirect(Route),
}

/// Render `child` only for signed-out visitors.
pub fn public_only<C>(session: &Session, child: C) -> Guarded<C> {
    if session.is_authenticated() {
        Guarded::Redirect(Route::LANDING)
    } else {
        Guarded::Render(child)
    }
}

/// Render `child` only for authenticated operators; placeholder while a login
/// is settling.
pub fn authenticated_only<C>(session: &Session, child: C) -> Guarded<C> {
    if session.is_loading() {
        Guarded::Loading
    } else if session.is_authenticated() {
        Guarded::Render(child)
    } else {
        Guarded::Redirect(Route::Login)
    }
}

/// Resolve a requested path against the route table.
///
/// Unknown paths and `/` redirect to the login route; guarded routes resolve
/// through the matching guard.
pub fn resolve(path: &str, session: &Session) -> Guarded<Route> {
    match Route::from_path(path) {
        None | Some(Route::Root) => Guarded::Redirect(Route::Login),
        Some(Route::Login) => public_only(session, Route::Login),
        Some(route) => authenticated_only(session, route),
    }
}
