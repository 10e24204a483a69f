//! Database layer for Malta Auctions
//!
//! This crate provides persistence for the auction catalog:
//! - Connection pool management and migrations for PostgreSQL
//! - The `AssetRepository` trait abstraction
//! - A PostgreSQL implementation with SQLx
//! - An in-memory implementation for development and tests
//!
//! # Example
//!
//! ```rust,no_run
//! use malta_auctions_db::{create_pool, AssetRepository, PoolConfig, PostgresAssetRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PoolConfig::new("postgres://localhost/malta_auctions").max_connections(10);
//! let pool = create_pool(&config).await?;
//!
//! let repo = PostgresAssetRepository::new(pool);
//! let assets = repo.list_all().await?;
//! # Ok(())
//! # }
//! ```

// Re-export core domain types for convenience
pub use malta_auctions_core;

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repository;

pub use error::{DbError, DbResult};
pub use memory::InMemoryAssetRepository;
pub use pool::{
    close_pool, create_pool, mask_password, run_migrations, verify_pool_health, PoolConfig,
};
pub use postgres::PostgresAssetRepository;
pub use repository::{newest_first, AssetRepository};

// Re-export sqlx types that users may need
pub use sqlx::postgres::PgPool;

/// Database layer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default database URL environment variable name
pub const DEFAULT_DATABASE_URL_ENV: &str = "DATABASE_URL";
