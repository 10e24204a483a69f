//! Core domain models and compliance engine for Malta Auctions
//!
//! This crate contains the seized-asset record, bidder attributes and the
//! rule-based compliance screening engine that classifies, redacts and
//! annotates assets before they are shown to the public. It performs no I/O.

pub mod asset;
pub mod bidder;
pub mod compliance;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use asset::{
    AssetType, AuctionAsset, AuctionAssetBuilder, ContrabandType, LegalStatus, SeizureReason,
};
pub use bidder::BidderInfo;
pub use compliance::{
    BidDecision, ComplianceConfig, ComplianceEngine, Eligibility, IneligibilityReason,
};
pub use error::{RegistryError, Result};
pub use types::{AssetId, Disposition};
