//! Fuel refills

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRefill {
    #[serde(
        rename = "IdRecargaCombustible",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(rename = "IdVehiculo", deserialize_with = "lenient::string")]
    pub vehicle_id: String,
    #[serde(rename = "Fecha")]
    pub date: String,
    #[serde(rename = "EstacionServicio")]
    pub station: String,
    #[serde(rename = "GalonesTanqueados", deserialize_with = "lenient::f64")]
    pub gallons: f64,
    #[serde(rename = "PrecioGalon", deserialize_with = "lenient::f64")]
    pub price_per_gallon: f64,
    #[serde(rename = "CostoTotal", deserialize_with = "lenient::f64")]
    pub total_cost: f64,
    #[serde(rename = "Kilometraje")]
    pub mileage: i64,
    #[serde(rename = "TipoCombustible")]
    pub fuel_type: String,
    #[serde(rename = "IdUbicacion", default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
}
