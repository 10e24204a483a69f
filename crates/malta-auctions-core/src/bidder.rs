//! Prospective bidder attributes used by the eligibility gate

use serde::{Deserialize, Serialize};

/// What the catalog knows about a bidder when they ask to bid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidderInfo {
    /// Verification tier reached by the bidder; higher is stronger
    pub verification_level: u32,

    pub country: String,

    /// Sub-national region, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Whether the bidder completed a sanctions check
    #[serde(default)]
    pub sanctions_checked: bool,
}

impl BidderInfo {
    pub fn new(verification_level: u32, country: impl Into<String>) -> Self {
        Self {
            verification_level,
            country: country.into(),
            region: None,
            sanctions_checked: false,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_sanctions_checked(mut self, checked: bool) -> Self {
        self.sanctions_checked = checked;
        self
    }
}
