//! Application facade tying the session, routing and backend together

use std::sync::Arc;

use color_eyre::Result;
use garage::{Navigation, Route, Router, Screen, SessionStore, routes};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::api::ApiClient;

pub mod account;
pub mod loaders;
pub mod login;


pub use loaders::LoaderData;
pub use login::LoginForm;

/// Redirects followed for a single navigation before giving up
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No screen at {path}")]
    NotFound { path: String },
    #[error("Too many redirects navigating to {path}")]
    RedirectLoop { path: String },
}

/// Screen ready to be presented
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Path the navigation ended at
    pub path: String,
    /// Path originally requested, if the navigation was redirected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<String>,
    pub route: Route,
    pub data: LoaderData,
}

#[derive(Clone)]
pub struct App {
    session: Arc<SessionStore>,
    api: ApiClient,
    router: Router,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        let session = api.session().clone();
        Self {
            router: Router::new(session.clone()),
            session,
            api,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Navigates to `path`, following guard redirects, and loads the screen data
    ///
    /// Reaching the logout screen terminates the session and continues at the login screen.
    #[instrument(skip(self))]
    pub async fn open(&self, path: &str) -> Result<Page> {
        let mut current = path.to_owned();

        for _ in 0..=MAX_REDIRECTS {
            let route = match self.router.navigate(&current) {
                Navigation::Render(route) => route,
                Navigation::Redirect(to) => {
                    current = to;
                    continue;
                }
                Navigation::NotFound => {
                    return Err(Error::NotFound { path: current }.into());
                }
            };

            if route.screen == Screen::Logout {
                self.session.logout().await?;
                info!("Logged out");
                current = routes::LOGIN.to_owned();
                continue;
            }

            let data = loaders::load(&self.api, &route, self.session.user().as_ref()).await?;
            debug!(path = current, "Screen loaded");

            return Ok(Page {
                requested: (current != path).then(|| path.to_owned()),
                path: current,
                route,
                data,
            });
        }

        Err(Error::RedirectLoop {
            path: path.to_owned(),
        }
        .into())
    }
}
