//! Curated links of interest

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestLink {
    #[serde(rename = "IdEnlace")]
    pub id: i64,
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Descripcion", default)]
    pub description: String,
    #[serde(rename = "URL")]
    pub url: String,
}
