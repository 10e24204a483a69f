//! Rule tables for the compliance engine
//!
//! Every list and text the engine consults lives here so deployments can
//! tune them from configuration. The defaults reproduce the catalog's
//! production rules.

use serde::{Deserialize, Serialize};

/// Complete rule set for sanctions screening, redaction and disclaimers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Entities whose mention in a description blocks the asset outright
    pub blocked_entities: Vec<String>,

    /// Countries of origin that send an asset to review
    pub sanctioned_origins: Vec<String>,

    /// Description keywords that send an asset to review
    pub sanctioned_keywords: Vec<String>,

    /// Bidder jurisdictions that may not take part in auctions
    pub sanctioned_regions: Vec<String>,

    /// Verification level required to bid on blocked assets
    pub top_verification_level: u32,

    pub redaction: RedactionConfig,

    pub disclaimers: DisclaimerTexts,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        let sanctioned_origins = strings(&[
            "Russia",
            "Belarus",
            "North Korea",
            "Iran",
            "Syria",
            "Libya",
        ]);

        let mut sanctioned_regions = sanctioned_origins.clone();
        sanctioned_regions.extend(strings(&["Crimea", "Donetsk", "Luhansk"]));

        Self {
            blocked_entities: strings(&["Khalifa Haftar", "LNA", "Bayda"]),
            sanctioned_origins,
            sanctioned_keywords: strings(&[
                "sanctioned",
                "illegal",
                "prohibited",
                "restricted",
                "UN resolution",
                "resolution 1973",
                "embargo",
            ]),
            sanctioned_regions,
            top_verification_level: 4,
            redaction: RedactionConfig::default(),
            disclaimers: DisclaimerTexts::default(),
        }
    }
}

/// Patterns and replacement markers used by the redactor
///
/// Patterns use `regex` syntax. The vessel pattern must capture the vessel
/// word (`vessel`, `ship`, `boat`) in group 1. Identifiers are upper-case
/// letters and digits and must contain a digit, so phrasings such as
/// "passport number" or "account no." never stand in for the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    pub passport_pattern: String,
    pub passport_marker: String,
    pub account_pattern: String,
    pub account_marker: String,
    pub name_pattern: String,
    pub name_marker: String,
    pub vessel_name_pattern: String,
    pub vessel_name_marker: String,
    /// Inserted between the kept head and tail of a long serial number
    pub serial_mask: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            passport_pattern: r"(?i:\bpassport)(?:\s+(?i:number|no\.?))?\s*[#:]?\s*[A-Z0-9]*[0-9][A-Z0-9]{4,}"
                .to_string(),
            passport_marker: "passport #REDACTED".to_string(),
            account_pattern: r"(?i:\baccount)(?:\s+(?i:number|no\.?))?\s*[#:]?\s*[0-9]{6,}"
                .to_string(),
            account_marker: "account #REDACTED".to_string(),
            name_pattern: r"(?:Mr\.|Mrs\.|Ms\.|Dr\.)\s+[A-Z][a-z]+\s+[A-Z][a-z]+".to_string(),
            name_marker: "[REDACTED NAME]".to_string(),
            vessel_name_pattern: r#"(?i)\b(vessel|ship|boat)\s+"[^"]+""#.to_string(),
            vessel_name_marker: "[REDACTED]".to_string(),
            serial_mask: "XXXX".to_string(),
        }
    }
}

/// Disclaimer texts, one per screening outcome
///
/// `{level}` in the blocked text is replaced with the configured top
/// verification level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclaimerTexts {
    pub blocked: String,
    pub review: String,
    pub currency: String,
    pub vessel: String,
    pub contraband: String,
    pub general: String,
}

impl Default for DisclaimerTexts {
    fn default() -> Self {
        Self {
            blocked: "WARNING: This asset is subject to international sanctions. Bidding is \
                      restricted to Level {level} verified entities only. UN Resolution \
                      compliance verification required."
                .to_string(),
            review: "NOTICE: This asset requires additional compliance review. Bidders must \
                     provide enhanced due diligence documentation."
                .to_string(),
            currency: "COMPLIANCE NOTICE: Currency transactions are subject to anti-money \
                       laundering regulations. Bidders must provide source of funds \
                       documentation."
                .to_string(),
            vessel: "MARITIME NOTICE: Vessel transfer subject to Transport Malta regulations. \
                     New owner must register vessel within 14 days of purchase."
                .to_string(),
            contraband: "CONTRABAND NOTICE: This asset was seized as contraband. Special \
                         permits may be required for possession or transfer."
                .to_string(),
            general: "LEGAL NOTICE: This asset is sold as-is with no warranties. Buyer is \
                      responsible for all transfer fees and taxes."
                .to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
