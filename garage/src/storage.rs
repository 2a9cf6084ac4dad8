//! Durable key-value storage
//!
//! Session state survives restarts by being written to a string-to-string store, the way a
//! browser keeps it in local storage. Values are plain, unencrypted strings.

use async_trait::async_trait;
use color_eyre::Result;

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Marker set to `"true"` while a user is logged in
pub const AUTHORIZED_KEY: &str = "isAuthorized";

/// JSON serialized `UserClaims` of the logged in user
pub const USER_DATA_KEY: &str = "userData";

/// Raw bearer token as returned by the backend
pub const TOKEN_KEY: &str = "token";

/// String key-value store
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
