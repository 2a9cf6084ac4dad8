//! Vehicles

use serde::{Deserialize, Serialize};

/// Registered vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Assigned by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// License plate, also used as vehicle identifier in paths
    #[serde(rename = "Placa")]
    pub plate: String,
    #[serde(rename = "Tipo")]
    pub kind: String,
    #[serde(rename = "Marca")]
    pub brand: String,
    #[serde(rename = "Modelo")]
    pub model: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "TipoCombustible")]
    pub fuel_type: String,
    #[serde(rename = "NumeroMotor")]
    pub engine_number: String,
    #[serde(rename = "NumeroChasis")]
    pub chassis_number: String,
    #[serde(rename = "KilometrajeActual")]
    pub mileage: i64,
    #[serde(rename = "IdFoto", default)]
    pub photo_id: Option<i64>,
    #[serde(rename = "IdUsuario", default)]
    pub owner_id: Option<i64>,
    #[serde(rename = "urlFoto", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}
