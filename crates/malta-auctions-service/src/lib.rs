//! Service layer for Malta Auctions
//!
//! This crate sits between the API and database layers. It applies the
//! compliance engine to everything read from or written to the catalog and
//! runs the upstream ingestion connectors.
//!
//! # Architecture
//!
//! - **CatalogService**: display-processed listings, asset creation through
//!   the storage pipeline, bidder eligibility
//! - **IngestionService**: Customs Department CSV reports and Transport
//!   Malta warrant notices
//!
//! # Example
//!
//! ```rust,no_run
//! use malta_auctions_core::ComplianceEngine;
//! use malta_auctions_db::InMemoryAssetRepository;
//! use malta_auctions_service::{ServiceRegistry, TransportMaltaConfig};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = Arc::new(InMemoryAssetRepository::new());
//! let engine = Arc::new(ComplianceEngine::with_defaults()?);
//! let services = ServiceRegistry::new(repository, engine, TransportMaltaConfig::default())?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod connectors;
pub mod dto;
pub mod error;
pub mod ingestion;

// Re-export main types for convenience
pub use dto::*;
pub use error::{ServiceError, ServiceResult};

// Re-export service traits and implementations
pub use catalog::{CatalogService, DefaultCatalogService};
pub use connectors::{CustomsConnector, TransportMaltaConfig, TransportMaltaConnector};
pub use ingestion::{DefaultIngestionService, IngestionService};

use malta_auctions_core::ComplianceEngine;
use malta_auctions_db::AssetRepository;
use std::sync::Arc;

/// Service registry that holds all service instances
#[derive(Clone)]
pub struct ServiceRegistry {
    /// Catalog service
    pub catalog: Arc<dyn CatalogService>,
    /// Ingestion service
    pub ingestion: Arc<dyn IngestionService>,
}

impl ServiceRegistry {
    /// Create a new service registry with default implementations
    pub fn new(
        repository: Arc<dyn AssetRepository>,
        engine: Arc<ComplianceEngine>,
        transport_malta: TransportMaltaConfig,
    ) -> ServiceResult<Self> {
        let catalog = Arc::new(DefaultCatalogService::new(
            repository.clone(),
            engine.clone(),
        ));

        let ingestion = Arc::new(DefaultIngestionService::new(
            repository,
            engine,
            transport_malta,
        )?);

        Ok(Self { catalog, ingestion })
    }

    /// Create a service registry with custom implementations
    pub fn with_services(
        catalog: Arc<dyn CatalogService>,
        ingestion: Arc<dyn IngestionService>,
    ) -> Self {
        Self { catalog, ingestion }
    }

    /// Get the catalog service
    pub fn catalog(&self) -> &Arc<dyn CatalogService> {
        &self.catalog
    }

    /// Get the ingestion service
    pub fn ingestion(&self) -> &Arc<dyn IngestionService> {
        &self.ingestion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malta_auctions_db::InMemoryAssetRepository;

    #[tokio::test]
    async fn test_registry_shares_one_repository() {
        let repository = Arc::new(InMemoryAssetRepository::new());
        let engine = Arc::new(ComplianceEngine::with_defaults().unwrap());
        let services =
            ServiceRegistry::new(repository, engine, TransportMaltaConfig::default()).unwrap();

        services
            .ingestion()
            .ingest_customs_report("type,origin\nTruck,Malta\n")
            .await
            .unwrap();

        assert_eq!(services.catalog().count_assets().await.unwrap(), 1);
    }
}
