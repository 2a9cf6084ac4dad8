//! Preventive maintenance plans

use serde::{Deserialize, Serialize};

use super::lenient;

/// What triggers the next maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyKind {
    #[serde(rename = "Tiempo")]
    Time,
    #[serde(rename = "Kilometraje")]
    Mileage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "Días")]
    Days,
    #[serde(rename = "Semanas")]
    Weeks,
    #[serde(rename = "Meses")]
    Months,
    #[serde(rename = "Años")]
    Years,
}

/// Maintenance plan of a single vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreventiveMaintenance {
    #[serde(
        rename = "IdMantenimientoPreventivo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(rename = "IdVehiculo", deserialize_with = "lenient::string")]
    pub vehicle_id: String,
    #[serde(rename = "IdServicio", deserialize_with = "lenient::string")]
    pub service_id: String,
    #[serde(rename = "FrecuenciaTipo")]
    pub frequency: FrequencyKind,
    #[serde(rename = "FrecuenciaKilometraje", default)]
    pub mileage_frequency: i64,
    #[serde(rename = "FrecuenciaTiempo", default)]
    pub time_frequency: i64,
    #[serde(rename = "FrecuenciaTiempoTipo", default)]
    pub time_unit: Option<TimeUnit>,
    #[serde(rename = "FechaUltimoMantenimiento")]
    pub last_date: String,
    #[serde(rename = "KilometrajeUltimoMantenimiento")]
    pub last_mileage: i64,
    #[serde(rename = "Notas", default)]
    pub notes: String,
}

/// Entry of the maintenance services catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceService {
    #[serde(rename = "IdServicio")]
    pub id: i64,
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Descripcion", default)]
    pub description: String,
    #[serde(rename = "CreadoPorUsuario", default)]
    pub user_created: bool,
    #[serde(rename = "IdImagenServicio", default)]
    pub image_id: Option<serde_json::Value>,
}
