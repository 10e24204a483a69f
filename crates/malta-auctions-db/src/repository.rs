//! Repository trait abstraction for asset persistence
//!
//! The `AssetRepository` trait hides the storage backend so the catalog can
//! run against PostgreSQL in production and an in-memory map in tests.

use async_trait::async_trait;
use malta_auctions_core::{AssetId, AssetType, AuctionAsset};
use std::cmp::Ordering;

use crate::error::DbResult;

/// Repository trait for asset persistence operations
///
/// Every listing is ordered newest first by `date_added` and carries the
/// asset's serial numbers. Stored assets never carry display-only fields.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Persist a new asset and return its generated identifier
    ///
    /// Any `id` already present on the asset is replaced.
    async fn create(&self, asset: AuctionAsset) -> DbResult<AssetId>;

    /// Find an asset by its identifier
    async fn find_by_id(&self, id: &AssetId) -> DbResult<Option<AuctionAsset>>;

    /// List every asset
    async fn list_all(&self) -> DbResult<Vec<AuctionAsset>>;

    /// List assets of one type
    async fn list_by_type(&self, asset_type: AssetType) -> DbResult<Vec<AuctionAsset>>;

    /// List assets by their stored UN sanctions compliance flag
    async fn list_by_compliance(&self, compliant: bool) -> DbResult<Vec<AuctionAsset>>;

    /// Count stored assets
    async fn count(&self) -> DbResult<i64>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> DbResult<()>;
}

/// Listing order shared by all backends: newest `date_added` first, ties
/// broken by descending id so results are deterministic.
pub fn newest_first(a: &AuctionAsset, b: &AuctionAsset) -> Ordering {
    b.date_added
        .cmp(&a.date_added)
        .then_with(|| b.id.cmp(&a.id))
}

/// Prepare an asset for persistence under `id`
pub(crate) fn normalize_for_storage(mut asset: AuctionAsset, id: AssetId) -> AuctionAsset {
    asset.id = Some(id);
    asset.clear_display_fields();
    if asset.serial_numbers.as_ref().is_some_and(|s| s.is_empty()) {
        asset.serial_numbers = None;
    }
    asset
}
