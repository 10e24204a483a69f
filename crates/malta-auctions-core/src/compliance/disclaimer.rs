//! Disclaimer text selection

use super::config::DisclaimerTexts;
use crate::asset::{AssetType, AuctionAsset};
use crate::error::{RegistryError, Result};
use crate::types::Disposition;

const LEVEL_PLACEHOLDER: &str = "{level}";

/// Picks the legal notice shown next to an asset
#[derive(Debug, Clone)]
pub struct DisclaimerGenerator {
    texts: DisclaimerTexts,
}

impl DisclaimerGenerator {
    pub fn new(texts: &DisclaimerTexts, top_verification_level: u32) -> Result<Self> {
        let mut texts = texts.clone();
        texts.blocked = texts
            .blocked
            .replace(LEVEL_PLACEHOLDER, &top_verification_level.to_string());

        for (name, text) in [
            ("blocked", &texts.blocked),
            ("review", &texts.review),
            ("currency", &texts.currency),
            ("vessel", &texts.vessel),
            ("contraband", &texts.contraband),
            ("general", &texts.general),
        ] {
            if text.trim().is_empty() {
                return Err(RegistryError::ConfigurationError(format!(
                    "disclaimer text '{}' cannot be empty",
                    name
                )));
            }
        }

        Ok(Self { texts })
    }

    /// Select the disclaimer for an asset already classified as `disposition`
    pub fn generate(&self, asset: &AuctionAsset, disposition: Disposition) -> &str {
        match disposition {
            Disposition::Blocked => &self.texts.blocked,
            Disposition::Review => &self.texts.review,
            Disposition::Clear => match asset.asset_type {
                AssetType::Currency => &self.texts.currency,
                AssetType::Vessel => &self.texts.vessel,
                _ if asset.contraband_type.is_some() => &self.texts.contraband,
                _ => &self.texts.general,
            },
        }
    }
}
