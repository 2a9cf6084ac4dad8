//! Login form flow

use color_eyre::Result;
use garage::{SessionStore, UserClaims, routes};
use tracing::{error, info, instrument};

use crate::api::{self, ApiClient};
use crate::model::auth::Credentials;

/// Shown when the backend fails without explaining why
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Shown when the backend could not be reached or answered nonsense
pub const CONNECTION_ERROR: &str = "Connection or server error.";

/// State of the login form between submissions
#[derive(Debug, Default)]
pub struct LoginForm {
    errors: Vec<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors of the last submission
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Submits credentials
    ///
    /// On success the bearer token is stored, the session logged in, and the path to navigate
    /// to is returned. On failure `errors` describe what happened and the session is left
    /// untouched.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        session: &SessionStore,
        credentials: &Credentials,
    ) -> Option<&'static str> {
        self.errors.clear();

        match Self::authenticate(api, session, credentials).await {
            Ok(()) => Some(routes::PRIVATE),
            Err(err) => {
                let message = match api::Error::backend_detail(&err) {
                    Some(detail) => detail.unwrap_or(UNKNOWN_ERROR).to_owned(),
                    None => {
                        error!(?err, "Login request failed");
                        CONNECTION_ERROR.to_owned()
                    }
                };
                self.errors.push(message);
                None
            }
        }
    }

    async fn authenticate(
        api: &ApiClient,
        session: &SessionStore,
        credentials: &Credentials,
    ) -> Result<()> {
        let response = api.login(credentials).await?;
        let claims = UserClaims::decode(&response.access_token)?;

        session.set_token(&response.access_token).await?;
        session.login(claims).await?;

        info!("Login succeeded");
        Ok(())
    }
}
