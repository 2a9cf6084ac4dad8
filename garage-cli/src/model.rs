//! Backend data model
//!
//! The backend speaks JSON with Spanish PascalCase keys. Types here use English names and map
//! them with serde renames.

pub mod auth;
pub mod documents;
pub mod fuel;
pub mod links;
pub mod maintenance;
pub mod services;
pub mod users;
pub mod vehicles;

use serde::Deserialize;

/// Error payload returned by the backend on failures
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Either a message or a list of validation errors
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human readable form of `detail`
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(message) if message.is_empty() => None,
            serde_json::Value::String(message) => Some(message.clone()),
            detail => Some(detail.to_string()),
        }
    }
}

/// Deserializers tolerating numbers sent as strings and the other way around
///
/// Form driven endpoints of the backend are not consistent about it.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(serde_json::Number),
        String(String),
    }

    pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(number) => number
                .as_f64()
                .ok_or_else(|| de::Error::custom("number out of range")),
            NumberOrString::String(s) => s.trim().parse().map_err(de::Error::custom),
        }
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(number) => Ok(number.to_string()),
            NumberOrString::String(s) => Ok(s),
        }
    }
}
