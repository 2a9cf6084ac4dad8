//! Sign-up and password recovery flows

use garage::{Route, Screen, routes};
use reqwest::Url;
use serde::Serialize;
use tracing::{error, instrument};

use crate::api::{self, ApiClient};
use crate::model::auth::{Registration, ResetPassword};

const PASSWORD_MISMATCH: &str = "Passwords do not match";
const REQUEST_FAILED: &str = "Error processing the request.";

/// Notification presented to the user after a flow finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Outcome of an account flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub toast: Toast,
    /// Path to navigate to, if any
    pub redirect: Option<&'static str>,
}

impl Feedback {
    fn success(message: impl Into<String>) -> Self {
        Self {
            toast: Toast::Success(message.into()),
            redirect: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            toast: Toast::Error(message.into()),
            redirect: None,
        }
    }

    fn redirect(mut self, to: &'static str) -> Self {
        self.redirect = Some(to);
        self
    }

    /// Maps a failed request to an error toast, preferring the backend's explanation
    fn failure(err: color_eyre::Report) -> Self {
        match api::Error::backend_detail(&err) {
            Some(Some(detail)) => Self::error(detail),
            Some(None) => Self::error(REQUEST_FAILED),
            None => {
                error!(?err, "Account request failed");
                Self::error(REQUEST_FAILED)
            }
        }
    }
}

/// Registers a new user
#[instrument(skip_all, fields(email = %registration.email))]
pub async fn register(
    api: &ApiClient,
    registration: &Registration,
    password_confirmation: &str,
) -> Feedback {
    if registration.password != password_confirmation {
        return Feedback::error(PASSWORD_MISMATCH);
    }

    match api.register(registration).await {
        Ok(message) => {
            Feedback::success(message.detail.unwrap_or_else(|| "User registered".to_owned()))
        }
        Err(err) => Feedback::failure(err),
    }
}

/// Requests a password recovery e-mail
#[instrument(skip(api))]
pub async fn recover_password(api: &ApiClient, email: &str) -> Feedback {
    match api.recover_password(email).await {
        Ok(_) => Feedback::success("A recovery e-mail has been sent"),
        Err(err) => Feedback::failure(err),
    }
}

/// Recovery token carried by a recovery link
///
/// Accepts the full e-mailed link or just its path. Links to screens other than password recovery
/// carry no token.
pub fn recovery_token(link: &str) -> Option<String> {
    let path = match Url::parse(link) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_owned(),
        },
        Err(_) => link.to_owned(),
    };

    let route = Route::resolve(&path).filter(|route| route.screen == Screen::RecoverPassword)?;
    route.query_param("token").map(str::to_owned)
}

/// Sets a new password using the token from a recovery link
///
/// Without a token there is nothing to reset and the user is sent back to the start.
#[instrument(skip_all)]
pub async fn reset_password(
    api: &ApiClient,
    token: Option<&str>,
    password: &str,
    password_confirmation: &str,
) -> Feedback {
    let Some(token) = token.filter(|token| !token.is_empty()) else {
        return Feedback::error("Missing recovery token").redirect("/");
    };

    if password != password_confirmation {
        return Feedback::error(PASSWORD_MISMATCH);
    }

    let reset = ResetPassword {
        new_password: password.to_owned(),
        token: token.to_owned(),
    };

    match api.reset_password(&reset).await {
        Ok(_) => Feedback::success("Password changed").redirect(routes::LOGIN),
        Err(err) => {
            if api::Error::backend_detail(&err).is_none() {
                error!(?err, "Password reset failed");
            }
            Feedback::error("The recovery link is no longer valid, request a new one")
        }
    }
}
