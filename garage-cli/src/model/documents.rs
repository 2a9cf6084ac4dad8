//! Vehicle documents

use serde::{Deserialize, Serialize};

use super::lenient;

/// Document attached to a vehicle, like insurance or inspection certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "IdDocumento", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "IdVehiculo", deserialize_with = "lenient::string")]
    pub vehicle_id: String,
    #[serde(rename = "TipoDocumento")]
    pub kind: String,
    #[serde(rename = "NombreDocumento")]
    pub name: String,
    #[serde(rename = "FechaEmision")]
    pub issued_on: String,
    #[serde(rename = "FechaVencimiento", default)]
    pub expires_on: Option<String>,
    #[serde(rename = "TieneFechaVencimiento", default)]
    pub has_expiry: bool,
    #[serde(rename = "CostoDocumento", default)]
    pub cost: f64,
    #[serde(rename = "IdArchivo", default, deserialize_with = "lenient::string")]
    pub file_id: String,
    /// Computed by the backend
    #[serde(rename = "EstaVencido", default, skip_serializing)]
    pub expired: bool,
    /// Computed by the backend
    #[serde(rename = "DiasParaVencer", default, skip_serializing)]
    pub days_to_expiry: Option<i64>,
    #[serde(rename = "urlFoto", default, skip_serializing)]
    pub url: Option<String>,
}
