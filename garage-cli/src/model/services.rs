//! Services performed on vehicles

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    #[serde(rename = "Taller")]
    Workshop,
    #[serde(rename = "Parqueadero")]
    Parking,
    #[serde(rename = "Lavadero")]
    CarWash,
}

/// Record of a service performed on a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformedService {
    #[serde(
        rename = "IdServicioRealizado",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(rename = "PlacaVehiculo")]
    pub plate: String,
    #[serde(rename = "TipoServicio")]
    pub kind: ServiceKind,
    #[serde(rename = "NombreNegocio")]
    pub business: String,
    #[serde(rename = "ValorServicio")]
    pub cost: f64,
    #[serde(rename = "Duracion", default)]
    pub duration: f64,
    #[serde(rename = "Kilometraje", default)]
    pub mileage: i64,
    #[serde(rename = "Concepto", default)]
    pub concept: String,
    #[serde(rename = "Repuestos", default)]
    pub spare_parts: String,
    #[serde(rename = "DescripcionFalla", default)]
    pub failure: String,
    #[serde(rename = "Diagnostico", default)]
    pub diagnosis: String,
    #[serde(rename = "Comentarios", default)]
    pub comments: String,
    #[serde(rename = "Fecha", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Uploaded photo file id
    #[serde(rename = "FotoServicio", default, skip_serializing_if = "Option::is_none")]
    pub photo_id: Option<i64>,
}
