//! In-memory implementation of AssetRepository
//!
//! Backs the development server and the test suites. State lives in a
//! `HashMap` behind a tokio `RwLock` and is lost when the process exits.

use async_trait::async_trait;
use malta_auctions_core::{AssetId, AssetType, AuctionAsset};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::DbResult;
use crate::repository::{newest_first, normalize_for_storage, AssetRepository};

/// In-memory asset repository
#[derive(Debug, Default)]
pub struct InMemoryAssetRepository {
    assets: RwLock<HashMap<AssetId, AuctionAsset>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn list_where<F>(&self, predicate: F) -> Vec<AuctionAsset>
    where
        F: Fn(&AuctionAsset) -> bool,
    {
        let assets = self.assets.read().await;
        let mut matching: Vec<AuctionAsset> =
            assets.values().filter(|a| predicate(a)).cloned().collect();
        matching.sort_by(newest_first);
        matching
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    #[instrument(skip(self, asset), fields(asset_type = %asset.asset_type))]
    async fn create(&self, asset: AuctionAsset) -> DbResult<AssetId> {
        let id = AssetId::new();
        let asset = normalize_for_storage(asset, id);

        self.assets.write().await.insert(id, asset);

        debug!(asset_id = %id, "Stored asset in memory");
        Ok(id)
    }

    async fn find_by_id(&self, id: &AssetId) -> DbResult<Option<AuctionAsset>> {
        Ok(self.assets.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> DbResult<Vec<AuctionAsset>> {
        Ok(self.list_where(|_| true).await)
    }

    async fn list_by_type(&self, asset_type: AssetType) -> DbResult<Vec<AuctionAsset>> {
        Ok(self.list_where(|a| a.asset_type == asset_type).await)
    }

    async fn list_by_compliance(&self, compliant: bool) -> DbResult<Vec<AuctionAsset>> {
        Ok(self
            .list_where(|a| a.legal_status.un_sanctions_compliance == compliant)
            .await)
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.assets.read().await.len() as i64)
    }

    async fn health_check(&self) -> DbResult<()> {
        Ok(())
    }
}
