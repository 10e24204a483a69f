//! Data Transfer Objects (DTOs) for the service layer
//!
//! Request and response shapes used at the service boundary. Field names
//! serialize in camelCase to match the catalog front end.

use malta_auctions_core::{AssetId, BidDecision, Eligibility};
use serde::{Deserialize, Serialize};

// ============================================================================
// Catalog DTOs
// ============================================================================

/// Response from creating an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAssetResponse {
    pub id: AssetId,
    pub success: bool,
}

/// Bidder eligibility for a stored asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    pub eligible: bool,

    /// Same verdict as `eligible`, under the name the front end reads
    pub can_bid: bool,

    /// Human-readable explanation when the bidder is turned away
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Machine-readable reason code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl EligibilityResponse {
    pub fn new(eligibility: Eligibility, decision: BidDecision) -> Self {
        Self {
            eligible: eligibility.eligible,
            can_bid: decision.can_bid,
            reason: decision.message,
            code: eligibility.reason.map(|r| r.code().to_string()),
        }
    }
}

// ============================================================================
// Ingestion DTOs
// ============================================================================

/// A source record that could not be turned into an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// 1-based position of the record in the source
    pub record: usize,
    pub reason: String,
}

impl SkippedRecord {
    pub fn new(record: usize, reason: impl Into<String>) -> Self {
        Self {
            record,
            reason: reason.into(),
        }
    }
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionReport {
    /// Name of the ingestion source
    pub source: String,

    /// Identifiers of the assets stored by this run
    pub ingested: Vec<AssetId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRecord>,
}

impl IngestionReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ingested: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn ingested_count(&self) -> usize {
        self.ingested.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malta_auctions_core::IneligibilityReason;

    #[test]
    fn test_eligibility_response_for_denied_bidder() {
        let eligibility = Eligibility::denied(IneligibilityReason::SanctionedRegion);
        let decision = BidDecision {
            can_bid: false,
            message: eligibility.message(),
        };

        let json = serde_json::to_value(EligibilityResponse::new(eligibility, decision)).unwrap();
        assert_eq!(json["eligible"], false);
        assert_eq!(json["canBid"], false);
        assert_eq!(json["code"], "sanctioned_region");
        assert_eq!(
            json["reason"],
            "Bidders from sanctioned regions are not eligible for this auction."
        );
    }

    #[test]
    fn test_eligible_response_omits_reason() {
        let decision = BidDecision {
            can_bid: true,
            message: None,
        };
        let json =
            serde_json::to_value(EligibilityResponse::new(Eligibility::eligible(), decision))
                .unwrap();
        assert!(json.get("reason").is_none());
        assert!(json.get("code").is_none());
    }
}
