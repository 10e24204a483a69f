//! Ingestion connectors
//!
//! Each connector turns one upstream format into `AuctionAsset`s. Records
//! that cannot be mapped are reported back instead of failing the batch.

pub mod customs;
pub mod transport_malta;

pub use customs::{CustomsConnector, CUSTOMS_SOURCE};
pub use transport_malta::{
    TransportMaltaConfig, TransportMaltaConnector, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_NOTICES_URL, TRANSPORT_MALTA_SOURCE,
};

use malta_auctions_core::AuctionAsset;

use crate::dto::SkippedRecord;

/// Assets mapped from one upstream document
#[derive(Debug, Clone, Default)]
pub struct ConnectorOutput {
    /// Mapped assets paired with their 1-based record position
    pub assets: Vec<(usize, AuctionAsset)>,
    pub skipped: Vec<SkippedRecord>,
}

impl ConnectorOutput {
    pub fn push(&mut self, record: usize, asset: AuctionAsset) {
        self.assets.push((record, asset));
    }

    pub fn skip(&mut self, record: usize, reason: impl Into<String>) {
        self.skipped.push(SkippedRecord::new(record, reason));
    }
}
