//! # catalogd: product catalog daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse CLI arguments and load configuration (file + env vars)
//! - Initialize logging
//! - Open the `SQLite` pool and run migrations, refusing to start otherwise
//! - Construct the repository, the service and the axum router
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//! - Close the pool on the way out
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_adapter_http_axum::state::AppState;
use catalog_adapter_storage_sqlite_sqlx::{Database, SqliteProductRepository, StorageError};
use catalog_app::services::product_service::ProductService;

use crate::config::Config;

/// Product catalog HTTP API.
#[derive(Debug, Parser)]
#[command(name = "catalogd", version, about, long_about = None)]
struct Cli {
    /// Delete every product, reset the id sequence, then exit.
    #[arg(long)]
    clear: bool,

    /// Path to the TOML configuration file.
    #[arg(long, short, env = "CATALOG_CONFIG", default_value = "catalog.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let db = match connect(&config).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(error = %err, url = %config.database.url, "cannot reach database");
            return Err(err.into());
        }
    };

    let repo = SqliteProductRepository::new(db.pool().clone());
    let service = ProductService::new(repo);

    if cli.clear {
        let outcome = service.clear_products().await;
        db.close().await;
        let removed = outcome?;
        tracing::info!(removed, "catalog cleared");
        return Ok(());
    }

    let app = catalog_adapter_http_axum::router::build(AppState::new(service));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "catalogd listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db.close().await;
    served?;
    tracing::info!("catalogd stopped");
    Ok(())
}

async fn connect(config: &Config) -> Result<Database, StorageError> {
    catalog_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database.url.clone(),
    }
    .build()
    .await
}

/// Resolve once the process receives Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown requested, draining connections");
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn should_have_consistent_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_serve_by_default() {
        let cli = Cli::try_parse_from(["catalogd"]).unwrap();
        assert!(!cli.clear);
    }

    #[test]
    fn should_parse_clear_flag() {
        let cli = Cli::try_parse_from(["catalogd", "--clear"]).unwrap();
        assert!(cli.clear);
    }

    #[test]
    fn should_parse_config_path() {
        let cli = Cli::try_parse_from(["catalogd", "--config", "/etc/catalog.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/catalog.toml"));
    }

    #[test]
    fn should_reject_unknown_flag() {
        assert!(Cli::try_parse_from(["catalogd", "--purge"]).is_err());
    }
}
