//! User profile

use serde::{Deserialize, Serialize};

/// Profile of the logged in user as kept by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "NumeroDocumento")]
    pub document_number: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Telefono", default)]
    pub phone: String,
    #[serde(rename = "FotoPerfil", default)]
    pub photo: Option<String>,
    #[serde(rename = "TipoUsuario", default)]
    pub user_type: String,
    #[serde(rename = "FechaRegistro", default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    #[serde(rename = "Activo", default)]
    pub active: bool,
    #[serde(rename = "IdRol", default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    /// Only sent when changing the password
    #[serde(rename = "Contrasena", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
