//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use derivative::Derivative;
use serde::{Deserialize, Deserializer};
use tracing_subscriber::filter::Directive;

/// Logging output format
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Logging {
    /// Additional filtering directives
    #[serde(default, deserialize_with = "Logging::deserialize_filters")]
    pub filters: Vec<Directive>,

    /// Logging format
    #[serde(default)]
    pub format: LogFormat,
}

impl Logging {
    fn deserialize_filters<'de, D>(deserializer: D) -> Result<Vec<Directive>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dirs: Vec<String> = Deserialize::deserialize(deserializer)?;
        dirs.into_iter()
            .map(|dir| dir.parse().map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Derivative)]
#[derivative(Default)]
pub struct Backend {
    /// Base URL of the backend
    #[serde(default = "Backend::default_url")]
    #[derivative(Default(value = "Backend::default_url()"))]
    pub url: String,
}

impl Backend {
    fn default_url() -> String {
        "http://204.48.27.211:5000".to_owned()
    }
}

/// Where the session is persisted
#[derive(Debug, Clone, Deserialize, Default)]
pub enum Storage {
    /// Forgotten when the process exits
    #[default]
    Memory,
    SqLite {
        path: PathBuf,
        /// Create the storage table if missing
        #[serde(default = "Storage::default_migrate")]
        migrate: bool,
    },
}

impl Storage {
    fn default_migrate() -> bool {
        true
    }
}

/// Session expiry checks
#[derive(Debug, Clone, Deserialize, Derivative)]
#[derivative(Default)]
pub struct Expiry {
    /// Seconds between checks
    #[serde(default = "Expiry::default_interval")]
    #[derivative(Default(value = "Expiry::default_interval()"))]
    pub check_interval: u64,
}

impl Expiry {
    fn default_interval() -> u64 {
        60
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.check_interval.max(1))
    }
}

/// Top level client configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub storage: Storage,

    #[serde(default)]
    pub expiry: Expiry,

    #[serde(default)]
    pub logging: Logging,
}
