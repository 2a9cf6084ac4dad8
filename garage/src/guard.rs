//! Route guards
//!
//! Guards only read the session. Redirects are ordinary outcomes, not errors.

use std::sync::Arc;

use tracing::debug;

use crate::routes::{self, Area, Route};
use crate::session::{Session, SessionStore};

/// Guard decision for a requested subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Render the requested screen unchanged
    Render,
    /// Navigate to the given path instead
    Redirect(&'static str),
}

/// Gate in front of a route subtree
pub trait Guard {
    fn admit(&self, session: &Session) -> Admission;
}

/// Admits only authenticated sessions, sending others to the login screen
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivateGuard;

impl Guard for PrivateGuard {
    fn admit(&self, session: &Session) -> Admission {
        if session.is_authenticated {
            Admission::Render
        } else {
            Admission::Redirect(routes::LOGIN)
        }
    }
}

/// Admits only anonymous sessions, sending others to the private landing screen
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicGuard;

impl Guard for PublicGuard {
    fn admit(&self, session: &Session) -> Admission {
        if session.is_authenticated {
            Admission::Redirect(routes::PRIVATE)
        } else {
            Admission::Render
        }
    }
}

impl Area {
    /// Guard protecting this area
    pub fn guard(self) -> &'static dyn Guard {
        match self {
            Area::Public => &PublicGuard,
            Area::Private => &PrivateGuard,
        }
    }
}

/// Result of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(String),
    NotFound,
}

/// Resolves paths and applies guards using the shared session
#[derive(Clone)]
pub struct Router {
    session: Arc<SessionStore>,
}

impl Router {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Decides what navigating to `path` ends with
    pub fn navigate(&self, path: &str) -> Navigation {
        let Some(route) = Route::resolve(path) else {
            debug!(path, "No route");
            return Navigation::NotFound;
        };

        match route.area.guard().admit(&self.session.current()) {
            Admission::Render => Navigation::Render(route),
            Admission::Redirect(to) => {
                debug!(path, to, "Navigation redirected");
                Navigation::Redirect(to.to_owned())
            }
        }
    }
}
