//! Catalog service
//!
//! Reads go through the display pipeline so every asset leaving the service
//! is redacted and annotated. Writes go through validation and the storage
//! pipeline before they reach the repository.

use async_trait::async_trait;
use malta_auctions_core::{AssetId, AssetType, AuctionAsset, BidderInfo, ComplianceEngine};
use malta_auctions_db::AssetRepository;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::dto::{CreateAssetResponse, EligibilityResponse};
use crate::error::{ServiceError, ServiceResult};

/// Trait for catalog operations
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List every asset, display-processed
    async fn list_assets(&self) -> ServiceResult<Vec<AuctionAsset>>;

    /// List assets of one type, display-processed
    async fn list_assets_by_type(&self, asset_type: AssetType) -> ServiceResult<Vec<AuctionAsset>>;

    /// List assets by stored UN sanctions compliance, display-processed
    async fn list_assets_by_compliance(&self, compliant: bool) -> ServiceResult<Vec<AuctionAsset>>;

    /// Get one asset, display-processed
    async fn get_asset(&self, id: &AssetId) -> ServiceResult<AuctionAsset>;

    /// Validate and store a new asset
    async fn create_asset(&self, asset: AuctionAsset) -> ServiceResult<CreateAssetResponse>;

    /// Decide whether a bidder may bid on a stored asset
    async fn check_eligibility(
        &self,
        id: &AssetId,
        bidder: &BidderInfo,
    ) -> ServiceResult<EligibilityResponse>;

    /// Number of stored assets
    async fn count_assets(&self) -> ServiceResult<i64>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> ServiceResult<()>;
}

/// Default implementation of CatalogService
pub struct DefaultCatalogService {
    repository: Arc<dyn AssetRepository>,
    engine: Arc<ComplianceEngine>,
}

impl DefaultCatalogService {
    /// Create a new catalog service
    pub fn new(repository: Arc<dyn AssetRepository>, engine: Arc<ComplianceEngine>) -> Self {
        Self { repository, engine }
    }

    fn for_display(&self, assets: Vec<AuctionAsset>) -> Vec<AuctionAsset> {
        assets
            .iter()
            .map(|asset| self.engine.prepare_for_display(asset))
            .collect()
    }

    async fn find(&self, id: &AssetId) -> ServiceResult<AuctionAsset> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl CatalogService for DefaultCatalogService {
    #[instrument(skip(self))]
    async fn list_assets(&self) -> ServiceResult<Vec<AuctionAsset>> {
        let assets = self.repository.list_all().await?;
        debug!(count = assets.len(), "Listing all assets");
        Ok(self.for_display(assets))
    }

    #[instrument(skip(self), fields(asset_type = %asset_type))]
    async fn list_assets_by_type(&self, asset_type: AssetType) -> ServiceResult<Vec<AuctionAsset>> {
        let assets = self.repository.list_by_type(asset_type).await?;
        Ok(self.for_display(assets))
    }

    #[instrument(skip(self))]
    async fn list_assets_by_compliance(&self, compliant: bool) -> ServiceResult<Vec<AuctionAsset>> {
        let assets = self.repository.list_by_compliance(compliant).await?;
        Ok(self.for_display(assets))
    }

    #[instrument(skip(self), fields(asset_id = %id))]
    async fn get_asset(&self, id: &AssetId) -> ServiceResult<AuctionAsset> {
        let asset = self.find(id).await?;
        Ok(self.engine.prepare_for_display(&asset))
    }

    #[instrument(skip(self, asset), fields(asset_type = %asset.asset_type, source = %asset.source))]
    async fn create_asset(&self, asset: AuctionAsset) -> ServiceResult<CreateAssetResponse> {
        asset.validate()?;

        let stored = self.engine.prepare_for_storage(&asset);
        let id = self.repository.create(stored).await?;

        info!(asset_id = %id, "Asset added to catalog");
        Ok(CreateAssetResponse { id, success: true })
    }

    #[instrument(skip(self, bidder), fields(asset_id = %id))]
    async fn check_eligibility(
        &self,
        id: &AssetId,
        bidder: &BidderInfo,
    ) -> ServiceResult<EligibilityResponse> {
        let asset = self.find(id).await?;

        let eligibility = self.engine.check_eligibility(&asset, bidder);
        let decision = self.engine.can_bid(&asset, bidder);
        debug!(eligible = eligibility.eligible, "Checked bidder eligibility");

        Ok(EligibilityResponse::new(eligibility, decision))
    }

    async fn count_assets(&self) -> ServiceResult<i64> {
        Ok(self.repository.count().await?)
    }

    async fn health_check(&self) -> ServiceResult<()> {
        Ok(self.repository.health_check().await?)
    }
}
