//! Malta Auctions Server
//!
//! Main entry point for the seized-asset catalog HTTP server.
//! This binary sets up the repository, compliance engine, services, and HTTP
//! server with graceful shutdown.

mod config;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use malta_auctions_api::{build_api_server_with_config, CorsConfig, MiddlewareConfig, RouteConfig};
use malta_auctions_core::ComplianceEngine;
use malta_auctions_db::{
    close_pool, create_pool, mask_password, AssetRepository, InMemoryAssetRepository, PgPool,
    PoolConfig, PostgresAssetRepository,
};
use malta_auctions_service::ServiceRegistry;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

use config::{DatabaseBackend, ServerConfig};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration directory
    #[arg(short, long, env = "CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment (development, production, etc.)
    #[arg(short, long, env = "ENVIRONMENT", default_value = "development")]
    environment: String,

    /// Server host
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Server port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Keep the catalog in memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,

    /// Directory holding the catalog front end
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database_url) = self.database_url {
            config.database.url = database_url;
        }
        if self.in_memory {
            config.database.backend = DatabaseBackend::Memory;
        }
        if let Some(static_dir) = self.static_dir {
            config.server.static_dir = Some(static_dir);
        }
        if let Some(log_level) = self.log_level {
            config.logging.level = log_level;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let environment = args.environment.clone();

    let mut config = ServerConfig::load(&args.config_dir, &environment)
        .with_context(|| format!("Failed to load configuration from {}", args.config_dir))?;
    args.apply(&mut config);

    telemetry::init_with_config(&telemetry::TelemetryConfig::from(&config.logging))
        .context("Failed to initialise logging")?;

    info!("Starting Malta Auctions Server");
    info!("Environment: {}", environment);
    info!("Server: {}", config.bind_address());

    let engine = Arc::new(
        ComplianceEngine::new(&config.compliance).context("Invalid compliance rules")?,
    );

    let (repository, pool) = setup_repository(&config).await?;

    let services = ServiceRegistry::new(repository, engine, config.ingestion.transport_malta())
        .context("Failed to build services")?;

    let mut routes = RouteConfig::new();
    match &config.server.static_dir {
        Some(dir) if dir.is_dir() => {
            info!("Serving front end from {}", dir.display());
            routes = routes.with_static_dir(dir.clone());
        }
        Some(dir) => warn!("Static directory {} not found, front end disabled", dir.display()),
        None => {}
    }

    let middleware = MiddlewareConfig::new()
        .with_timeout(config.server.timeout_seconds)
        .with_cors(CorsConfig {
            allowed_origins: config.cors.allowed_origins.clone(),
            max_age_seconds: Some(config.cors.max_age_seconds),
        });

    let app = build_api_server_with_config(services, routes, middleware);

    let http_addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("Invalid HTTP bind address")?;

    let listener = tokio::net::TcpListener::bind(http_addr)
        .await
        .context("Failed to bind HTTP server")?;

    info!("HTTP Server listening on http://{}", http_addr);

    let serve = axum::serve(listener, app.into_make_service());
    if config.server.graceful_shutdown {
        serve
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP Server error")?;
    } else {
        serve.await.context("HTTP Server error")?;
    }

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Build the configured repository, returning the pool when one was opened
async fn setup_repository(
    config: &ServerConfig,
) -> Result<(Arc<dyn AssetRepository>, Option<PgPool>)> {
    match config.database.backend {
        DatabaseBackend::Memory => {
            warn!("Using in-memory catalog; assets are lost on shutdown");
            Ok((Arc::new(InMemoryAssetRepository::new()), None))
        }
        DatabaseBackend::Postgres => {
            info!("Database: {}", mask_password(&config.database.url));

            let pool_config = PoolConfig::new(&config.database.url)
                .min_connections(config.database.min_connections)
                .max_connections(config.database.max_connections)
                .connect_timeout(Duration::from_secs(config.database.connect_timeout_seconds))
                .idle_timeout(Duration::from_secs(config.database.idle_timeout_seconds))
                .run_migrations(config.database.run_migrations)
                .enable_logging(config.logging.level == "trace");

            let pool = create_pool(&pool_config)
                .await
                .context("Failed to create database connection pool")?;

            info!("Database connection established");
            Ok((Arc::new(PostgresAssetRepository::new(pool.clone())), Some(pool)))
        }
    }
}

/// Graceful shutdown signal handler
///
/// Resolves on SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "malta-auctions-server",
            "--port",
            "8080",
            "--in-memory",
            "--static-dir",
            "public",
        ]);
        let mut config = ServerConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.server.static_dir, Some(PathBuf::from("public")));
    }

    #[tokio::test]
    async fn test_memory_backend_needs_no_database() {
        let mut config = ServerConfig::default();
        config.database.backend = DatabaseBackend::Memory;

        let (repository, pool) = setup_repository(&config).await.unwrap();
        assert!(pool.is_none());
        assert_eq!(repository.count().await.unwrap(), 0);
    }
}
