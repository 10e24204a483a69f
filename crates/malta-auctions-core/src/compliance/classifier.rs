//! Sanctions classifier

use crate::asset::{AuctionAsset, SeizureReason};
use crate::types::Disposition;

/// Assigns a `Disposition` to an asset from its description, origin and
/// seizure reason. Matching is case-insensitive substring search.
#[derive(Debug, Clone)]
pub struct Classifier {
    blocked_entities: Vec<String>,
    sanctioned_origins: Vec<String>,
    sanctioned_keywords: Vec<String>,
}

impl Classifier {
    pub fn new(
        blocked_entities: &[String],
        sanctioned_origins: &[String],
        sanctioned_keywords: &[String],
    ) -> Self {
        Self {
            blocked_entities: normalize_terms(blocked_entities),
            sanctioned_origins: normalize_terms(sanctioned_origins),
            sanctioned_keywords: normalize_terms(sanctioned_keywords),
        }
    }

    /// Classify an asset. The first matching rule wins: blocked entity,
    /// sanctions seizure, sanctioned origin, sanctioned keyword.
    pub fn classify(&self, asset: &AuctionAsset) -> Disposition {
        let description = asset.description.to_lowercase();
        let origin = asset
            .origin
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        if contains_any(&description, &self.blocked_entities) {
            Disposition::Blocked
        } else if asset.seizure_reason == SeizureReason::Sanctions {
            Disposition::Blocked
        } else if contains_any(&origin, &self.sanctioned_origins) {
            Disposition::Review
        } else if contains_any(&description, &self.sanctioned_keywords) {
            Disposition::Review
        } else {
            Disposition::Clear
        }
    }

    /// Whether an origin string names a sanctioned country
    pub fn is_sanctioned_origin(&self, origin: &str) -> bool {
        contains_any(&origin.to_lowercase(), &self.sanctioned_origins)
    }
}

/// Lower-case the terms and drop blank entries, which would otherwise match
/// every text.
pub(crate) fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// `haystack` must already be lower-cased.
pub(crate) fn contains_any(haystack: &str, terms: &[String]) -> bool {
    !haystack.is_empty() && terms.iter().any(|t| haystack.contains(t.as_str()))
}
