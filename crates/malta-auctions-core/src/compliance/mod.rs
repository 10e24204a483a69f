//! Compliance screening engine
//!
//! Four rule-driven operations make up the screening pipeline:
//!
//! - [`Classifier`] assigns a [`Disposition`](crate::Disposition) to an asset
//! - [`Redactor`] masks serials and strips identifiers from descriptions
//! - [`DisclaimerGenerator`] picks the legal notice shown with the asset
//! - [`EligibilityGate`] decides whether a bidder may bid
//!
//! [`ComplianceEngine`] owns one of each, built from a [`ComplianceConfig`].
//! It is immutable after construction and safe to share across threads.

mod classifier;
mod config;
mod disclaimer;
mod eligibility;
mod pipeline;
mod redactor;

pub use classifier::Classifier;
pub use config::{ComplianceConfig, DisclaimerTexts, RedactionConfig};
pub use disclaimer::DisclaimerGenerator;
pub use eligibility::{Eligibility, EligibilityGate, IneligibilityReason};
pub use pipeline::BidDecision;
pub use redactor::Redactor;

use crate::asset::AuctionAsset;
use crate::bidder::BidderInfo;
use crate::error::Result;
use crate::types::Disposition;

/// Screening engine combining the four compliance components
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    classifier: Classifier,
    redactor: Redactor,
    disclaimers: DisclaimerGenerator,
    gate: EligibilityGate,
}

impl ComplianceEngine {
    /// Build an engine from a rule set
    ///
    /// Fails with a configuration error if a redaction pattern does not
    /// compile or a marker or disclaimer text is empty.
    pub fn new(config: &ComplianceConfig) -> Result<Self> {
        Ok(Self {
            classifier: Classifier::new(
                &config.blocked_entities,
                &config.sanctioned_origins,
                &config.sanctioned_keywords,
            ),
            redactor: Redactor::new(&config.redaction)?,
            disclaimers: DisclaimerGenerator::new(
                &config.disclaimers,
                config.top_verification_level,
            )?,
            gate: EligibilityGate::new(
                &config.sanctioned_regions,
                config.top_verification_level,
            ),
        })
    }

    /// Engine with the built-in rule set
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ComplianceConfig::default())
    }

    pub fn classify(&self, asset: &AuctionAsset) -> Disposition {
        self.classifier.classify(asset)
    }

    pub fn redact(&self, asset: &AuctionAsset) -> AuctionAsset {
        self.redactor.redact(asset)
    }

    pub fn disclaimer(&self, asset: &AuctionAsset) -> &str {
        self.disclaimers.generate(asset, self.classify(asset))
    }

    pub fn is_sanctioned_origin(&self, origin: &str) -> bool {
        self.classifier.is_sanctioned_origin(origin)
    }

    pub fn is_sanctioned_region(&self, bidder: &BidderInfo) -> bool {
        self.gate.is_sanctioned_region(bidder)
    }

    pub fn check_eligibility(&self, asset: &AuctionAsset, bidder: &BidderInfo) -> Eligibility {
        self.gate.check(self.classify(asset), bidder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetType, SeizureReason};
    use crate::error::RegistryError;

    #[test]
    fn test_engine_from_defaults() {
        let engine = ComplianceEngine::with_defaults().unwrap();
        let asset = AuctionAsset::builder(
            AssetType::Vessel,
            SeizureReason::Sanctions,
            "Tanker chartered by the LNA",
            "Transport Malta",
        )
        .build()
        .unwrap();

        assert_eq!(engine.classify(&asset), Disposition::Blocked);
        assert!(engine.disclaimer(&asset).starts_with("WARNING:"));
    }

    #[test]
    fn test_bad_config_is_rejected() {
        let mut config = ComplianceConfig::default();
        config.redaction.name_pattern = "[".to_string();
        assert!(matches!(
            ComplianceEngine::new(&config),
            Err(RegistryError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ComplianceEngine>();
    }
}
