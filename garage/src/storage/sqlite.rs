//! SQLite backed storage

use std::path::Path;

use async_trait::async_trait;
use color_eyre::Result;
use color_eyre::eyre::OptionExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::debug;

use super::Storage;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Invalid SQLite path: {path}")]
    InvalidSQLitePath { path: String },
}

/// Storage persisted in an SQLite database, in a single `storage` table
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db: sqlx::SqlitePool,
}

impl SqliteStorage {
    /// Storage in an in-memory database - for testing purposes
    pub async fn memory() -> Result<Self> {
        let opts = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true)
            .shared_cache(true);

        // Single connection kept alive forever, as closing it drops the database
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(opts);

        sqlx::migrate!("./migrations").run(&db).await?;
        Ok(Self { db })
    }

    /// Opens the database file, creating it if missing
    ///
    /// Migrations are executed only if `migrate` is set.
    pub async fn open(path: &Path, migrate: bool) -> Result<Self> {
        let path = path.to_str().ok_or_eyre(Error::InvalidSQLitePath {
            path: path.display().to_string(),
        })?;

        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_lazy_with(opts);

        if migrate {
            sqlx::migrate!("./migrations").run(&db).await?;
        }

        debug!(path, migrate, "Storage opened");
        Ok(Self { db })
    }

    /// Accesses the DB pool
    pub fn db(&self) -> &sqlx::SqlitePool {
        &self.db
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("select value from storage where key = ?")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "insert into storage (key, value) values (?, ?) on conflict(key) do update set value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("delete from storage where key = ?")
            .bind(key)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
