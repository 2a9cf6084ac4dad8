//! Authentication payloads

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Login form fields, sent form-url-encoded
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Signed JWT carrying the user claims
    pub access_token: String,
}

/// Response of endpoints answering with an optional message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Sign-up payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "NumeroDocumento")]
    pub document_number: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Contrasena")]
    pub password: String,
    /// Phone number with the country prefix
    #[serde(rename = "Telefono")]
    pub phone: String,
    /// Uploaded photo file id, empty when none
    #[serde(rename = "FotoPerfil")]
    pub photo: String,
    #[serde(rename = "TipoUsuario")]
    pub user_type: String,
    /// ISO 8601 timestamp with milliseconds
    #[serde(rename = "FechaRegistro")]
    pub registered_at: String,
    #[serde(rename = "Activo")]
    pub active: bool,
}

impl Registration {
    /// Registration of a regular, active user
    pub fn new(
        name: impl Into<String>,
        document_number: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        phone: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            document_number: document_number.into(),
            email: email.into(),
            password: password.into(),
            phone: phone.into(),
            photo: String::new(),
            user_type: "Normal".to_owned(),
            registered_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecoverPassword {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPassword {
    pub new_password: String,
    /// Recovery token from the e-mailed link
    pub token: String,
}
