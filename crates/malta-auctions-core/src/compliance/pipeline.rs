//! Display and storage pipelines over the compliance engine

use serde::{Deserialize, Serialize};

use super::ComplianceEngine;
use crate::asset::AuctionAsset;
use crate::bidder::BidderInfo;

/// Eligibility as presented to the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidDecision {
    pub can_bid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComplianceEngine {
    /// Produce the copy of an asset shown to the public.
    ///
    /// The disclaimer and sanction status are computed on the redacted copy,
    /// so they reflect exactly the text a visitor sees.
    pub fn prepare_for_display(&self, asset: &AuctionAsset) -> AuctionAsset {
        let mut display = self.redact(asset);
        display.compliance_disclaimer = Some(self.disclaimer(&display).to_string());
        display.sanction_status = Some(self.classify(&display));
        display
    }

    /// Normalise an asset before it is persisted.
    ///
    /// UN sanctions compliance is derived from the classifier rather than
    /// trusted from the caller, and display-only fields are dropped.
    pub fn prepare_for_storage(&self, asset: &AuctionAsset) -> AuctionAsset {
        let mut stored = asset.clone();
        stored.clear_display_fields();
        stored.legal_status.un_sanctions_compliance = self.classify(&stored).is_clear();
        stored
    }

    pub fn can_bid(&self, asset: &AuctionAsset, bidder: &BidderInfo) -> BidDecision {
        let eligibility = self.check_eligibility(asset, bidder);
        BidDecision {
            can_bid: eligibility.eligible,
            message: eligibility.message(),
        }
    }
}
