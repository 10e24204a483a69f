//! Redaction of personal and identifying details

use regex::{Captures, NoExpand, Regex};

use super::config::RedactionConfig;
use crate::asset::{AssetType, AuctionAsset, SeizureReason};
use crate::error::{RegistryError, Result};

/// Serials shorter than this are masked entirely
const MIN_ANCHORED_SERIAL_LEN: usize = 8;

/// Characters kept at each end of a long serial
const SERIAL_ANCHOR_LEN: usize = 4;

const FULL_MASK_CHAR: char = 'X';

/// Masks serial numbers and strips identifiers from descriptions.
///
/// Running the redactor over its own output changes nothing: the passport
/// and account markers carry no digit, which both identifier patterns
/// require; the name marker has no honorific; and a redacted vessel name
/// matches the vessel pattern again but is replaced with the same text.
///
/// Pattern redaction is best effort. Identifiers written in forms the
/// patterns do not anticipate pass through unchanged.
#[derive(Debug, Clone)]
pub struct Redactor {
    passport: Regex,
    passport_marker: String,
    account: Regex,
    account_marker: String,
    name: Regex,
    name_marker: String,
    vessel_name: Regex,
    vessel_name_marker: String,
    serial_mask: String,
}

impl Redactor {
    /// Compile the configured patterns
    pub fn new(config: &RedactionConfig) -> Result<Self> {
        let vessel_name = Regex::new(&config.vessel_name_pattern)?;
        if vessel_name.captures_len() < 2 {
            return Err(RegistryError::ConfigurationError(
                "vessel_name_pattern must capture the vessel word in group 1".to_string(),
            ));
        }

        Ok(Self {
            passport: Regex::new(&config.passport_pattern)?,
            passport_marker: non_empty("passport_marker", &config.passport_marker)?,
            account: Regex::new(&config.account_pattern)?,
            account_marker: non_empty("account_marker", &config.account_marker)?,
            name: Regex::new(&config.name_pattern)?,
            name_marker: non_empty("name_marker", &config.name_marker)?,
            vessel_name,
            vessel_name_marker: non_empty("vessel_name_marker", &config.vessel_name_marker)?,
            serial_mask: non_empty("serial_mask", &config.serial_mask)?,
        })
    }

    /// Produce a redacted copy of `asset`
    pub fn redact(&self, asset: &AuctionAsset) -> AuctionAsset {
        let mut redacted = asset.clone();

        if asset.asset_type == AssetType::Currency {
            if let Some(ref serials) = asset.serial_numbers {
                redacted.serial_numbers =
                    Some(serials.iter().map(|s| self.mask_serial(s)).collect());
            }
        }

        let names_sensitive = asset.seizure_reason == SeizureReason::Sanctions
            || !asset.legal_status.un_sanctions_compliance;
        redacted.description = self.redact_description(&asset.description, names_sensitive);

        if asset.asset_type == AssetType::Vessel && !asset.legal_status.un_sanctions_compliance {
            redacted.description = self
                .vessel_name
                .replace_all(&redacted.description, |caps: &Captures| {
                    format!("{} \"{}\"", &caps[1], self.vessel_name_marker)
                })
                .into_owned();
        }

        redacted
    }

    fn redact_description(&self, description: &str, names_sensitive: bool) -> String {
        let text = self
            .passport
            .replace_all(description, NoExpand(&self.passport_marker));
        let text = self
            .account
            .replace_all(&text, NoExpand(&self.account_marker))
            .into_owned();

        if names_sensitive {
            self.name
                .replace_all(&text, NoExpand(&self.name_marker))
                .into_owned()
        } else {
            text
        }
    }

    /// Keep the first and last four characters of long serials
    pub fn mask_serial(&self, serial: &str) -> String {
        let chars: Vec<char> = serial.chars().collect();
        if chars.len() < MIN_ANCHORED_SERIAL_LEN {
            return std::iter::repeat(FULL_MASK_CHAR).take(chars.len()).collect();
        }

        let head: String = chars[..SERIAL_ANCHOR_LEN].iter().collect();
        let tail: String = chars[chars.len() - SERIAL_ANCHOR_LEN..].iter().collect();
        format!("{}{}{}", head, self.serial_mask, tail)
    }
}

fn non_empty(field: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(RegistryError::ConfigurationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(value.to_string())
}
