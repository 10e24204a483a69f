//! Bidder eligibility gate

use serde::{Deserialize, Serialize};
use std::fmt;

use super::classifier::{contains_any, normalize_terms};
use crate::bidder::BidderInfo;
use crate::types::Disposition;

/// Why a bidder was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// Blocked asset and the bidder's verification is below the top level
    VerificationLevelTooLow { required: u32 },
    /// Bidder country or region is sanctioned
    SanctionedRegion,
    /// Asset is not clear and the bidder skipped the sanctions check
    SanctionsCheckRequired,
}

impl IneligibilityReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::VerificationLevelTooLow { .. } => "verification_level_too_low",
            Self::SanctionedRegion => "sanctioned_region",
            Self::SanctionsCheckRequired => "sanctions_check_required",
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerificationLevelTooLow { required } => write!(
                f,
                "This asset requires Level {} verification. Please upgrade your verification status.",
                required
            ),
            Self::SanctionedRegion => {
                f.write_str("Bidders from sanctioned regions are not eligible for this auction.")
            }
            Self::SanctionsCheckRequired => {
                f.write_str("Sanctions compliance check required before bidding.")
            }
        }
    }
}

/// Outcome of the eligibility gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub eligible: bool,
    pub reason: Option<IneligibilityReason>,
}

impl Eligibility {
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    pub fn denied(reason: IneligibilityReason) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
        }
    }

    /// Human-readable explanation, present only when denied
    pub fn message(&self) -> Option<String> {
        self.reason.map(|r| r.to_string())
    }
}

/// Decides whether a bidder may bid on an asset of a given disposition
#[derive(Debug, Clone)]
pub struct EligibilityGate {
    sanctioned_regions: Vec<String>,
    top_verification_level: u32,
}

impl EligibilityGate {
    pub fn new(sanctioned_regions: &[String], top_verification_level: u32) -> Self {
        Self {
            sanctioned_regions: normalize_terms(sanctioned_regions),
            top_verification_level,
        }
    }

    /// Whether the bidder's country or region matches a sanctioned region
    pub fn is_sanctioned_region(&self, bidder: &BidderInfo) -> bool {
        contains_any(&bidder.country.to_lowercase(), &self.sanctioned_regions)
            || bidder
                .region
                .as_deref()
                .map(|r| contains_any(&r.to_lowercase(), &self.sanctioned_regions))
                .unwrap_or(false)
    }

    /// Check the bidder against an asset classified as `disposition`.
    /// The first failing check wins.
    pub fn check(&self, disposition: Disposition, bidder: &BidderInfo) -> Eligibility {
        if disposition == Disposition::Blocked
            && bidder.verification_level < self.top_verification_level
        {
            return Eligibility::denied(IneligibilityReason::VerificationLevelTooLow {
                required: self.top_verification_level,
            });
        }

        if self.is_sanctioned_region(bidder) {
            return Eligibility::denied(IneligibilityReason::SanctionedRegion);
        }

        if !disposition.is_clear() && !bidder.sanctions_checked {
            return Eligibility::denied(IneligibilityReason::SanctionsCheckRequired);
        }

        Eligibility::eligible()
    }
}
