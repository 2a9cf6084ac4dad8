//! Vehicle management dashboard client

use std::io::read_to_string;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use garage::{ExpiryWatcher, MemoryStorage, SessionStore, SqliteStorage, Storage, SystemClock};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::{Config, LogFormat};
use crate::opt::Opt;
use crate::service::App;

mod api;
mod commands;
mod config;
mod model;
mod opt;
mod service;

/// Initializes tracing collection
fn setup_tracing(config: config::Logging) -> Result<()> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let fmt_layer = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let filter_layer = config
        .filters
        .into_iter()
        .fold(filter_layer, |layer, filter| layer.add_directive(filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

/// Opens the configured session storage
async fn storage(config: config::Storage) -> Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match config {
        config::Storage::Memory => Arc::new(MemoryStorage::new()),
        config::Storage::SqLite { path, migrate } => {
            Arc::new(SqliteStorage::open(&path, migrate).await?)
        }
    };
    Ok(storage)
}

#[tokio::main]
async fn main() -> Result<()> {
    let Opt {
        config: mut config_file,
        command,
    } = Opt::parse();

    let config = read_to_string(&mut config_file)?;
    let config: Config = toml::from_str(&config).wrap_err("Invalid configuration file")?;

    setup_tracing(config.logging)?;
    color_eyre::install()?;

    info!(
        config = ?config_file.path().path(),
        "Tracing initialized, loading session"
    );

    let session = Arc::new(SessionStore::load(storage(config.storage).await?).await?);
    let watcher = ExpiryWatcher::new(session.clone(), Arc::new(SystemClock))
        .with_interval(config.expiry.interval());
    if watcher.check().await? {
        warn!("Stored session expired");
    }
    let watcher = watcher.spawn();

    let api = ApiClient::new(&config.backend.url, session)?;
    let app = App::new(api);
    let result = commands::execute(&app, command).await;

    watcher.shutdown().await?;
    info!("Done, tearing down");
    result
}
