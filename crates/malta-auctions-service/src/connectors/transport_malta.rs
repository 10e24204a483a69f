//! Transport Malta warrants of arrest
//!
//! The official notices page lists warrants of arrest against vessels as
//! `<p>` and `<h3>` blocks. Each block mentioning a warrant is mapped to a
//! vessel asset seized for debt, with the warrant reference as court order.

use malta_auctions_core::{AssetType, AuctionAsset, SeizureReason};
use regex::Regex;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::ConnectorOutput;
use crate::error::{ServiceError, ServiceResult};

/// Source name stamped on warrant assets
pub const TRANSPORT_MALTA_SOURCE: &str = "Transport Malta";

/// Default notices page
pub const DEFAULT_NOTICES_URL: &str =
    "https://www.transport.gov.mt/maritime/local-waters/official-notices/warrants-of-arrest-124";

/// Default timeout for fetching the notices page
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

const UNKNOWN_VESSEL: &str = "Unknown Vessel";

/// Where and how to fetch warrant notices
#[derive(Debug, Clone)]
pub struct TransportMaltaConfig {
    pub notices_url: String,
    pub timeout: Duration,
}

impl Default for TransportMaltaConfig {
    fn default() -> Self {
        Self {
            notices_url: DEFAULT_NOTICES_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

/// Compiled extraction patterns
#[derive(Debug, Clone)]
struct NoticePatterns {
    block: Regex,
    tag: Regex,
    whitespace: Regex,
    warrant_id: Regex,
    quoted_vessel: Regex,
    bare_vessel: Regex,
    imo: Regex,
    debt: Regex,
}

impl NoticePatterns {
    fn compile() -> ServiceResult<Self> {
        Ok(Self {
            block: Regex::new(r"(?is)<(p|h3)\b[^>]*>(.*?)</(?:p|h3)\s*>")?,
            tag: Regex::new(r"(?s)<[^>]*>")?,
            whitespace: Regex::new(r"\s+")?,
            warrant_id: Regex::new(r"MT/ARR/\d{4}-\d{3}")?,
            quoted_vessel: Regex::new(r#"(?i)vessel\s+"([^"]+)""#)?,
            bare_vessel: Regex::new(r"(?i)vessel\s+(\S+)")?,
            imo: Regex::new(r"(?i)IMO\s+(\d+)")?,
            debt: Regex::new(r"€\s*([0-9][0-9,.]*)")?,
        })
    }
}

/// Parses warrant notices and fetches them from Transport Malta
#[derive(Debug, Clone)]
pub struct TransportMaltaConnector {
    client: reqwest::Client,
    config: TransportMaltaConfig,
    patterns: NoticePatterns,
}

impl TransportMaltaConnector {
    pub fn new(config: TransportMaltaConfig) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("malta-auctions/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            patterns: NoticePatterns::compile()?,
        })
    }

    pub fn notices_url(&self) -> &str {
        &self.config.notices_url
    }

    /// Download the notices page
    #[instrument(skip(self), fields(url = %self.config.notices_url))]
    pub async fn fetch(&self) -> ServiceResult<String> {
        let response = self
            .client
            .get(&self.config.notices_url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        info!(bytes = body.len(), "Fetched warrant notices");
        Ok(body)
    }

    /// Extract warrant assets from a notices page
    pub fn parse(&self, html: &str) -> ServiceResult<ConnectorOutput> {
        if html.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "Warrant notices page is empty".to_string(),
            ));
        }

        let mut output = ConnectorOutput::default();
        let notices = self
            .patterns
            .block
            .captures_iter(html)
            .map(|caps| self.block_text(&caps[2]))
            .filter(|text| text.contains("Warrant of Arrest") || text.contains("MT/ARR"));

        for (index, text) in notices.enumerate() {
            let record_no = index + 1;
            match self.map_notice(&text) {
                Some(asset) => output.push(record_no, asset),
                None => {
                    warn!(record = record_no, "Warrant notice without a warrant reference");
                    output.skip(record_no, "Missing warrant reference (MT/ARR/NNNN-NNN)");
                }
            }
        }

        debug!(
            mapped = output.assets.len(),
            skipped = output.skipped.len(),
            "Parsed warrant notices"
        );
        Ok(output)
    }

    /// Plain text of a block: tags stripped, entities decoded, spaces collapsed
    fn block_text(&self, inner_html: &str) -> String {
        let without_tags = self.patterns.tag.replace_all(inner_html, " ");
        let decoded = decode_entities(&without_tags);
        self.patterns
            .whitespace
            .replace_all(&decoded, " ")
            .trim()
            .to_string()
    }

    fn map_notice(&self, text: &str) -> Option<AuctionAsset> {
        let warrant_id = self.patterns.warrant_id.find(text)?.as_str().to_string();

        let vessel_name = self
            .patterns
            .quoted_vessel
            .captures(text)
            .or_else(|| self.patterns.bare_vessel.captures(text))
            .map(|caps| caps[1].trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_VESSEL.to_string());

        let imo_number = self
            .patterns
            .imo
            .captures(text)
            .map(|caps| caps[1].to_string());

        let debt_amount = self
            .patterns
            .debt
            .captures(text)
            .map(|caps| format!("€{}", caps[1].trim_end_matches(|c: char| c == '.' || c == ',')))
            .unwrap_or_else(|| "Unknown".to_string());

        let description = match imo_number {
            Some(ref imo) => format!("{} (IMO: {})", vessel_name, imo),
            None => vessel_name,
        };

        let mut builder = AuctionAsset::builder(
            AssetType::Vessel,
            SeizureReason::Debt,
            description,
            TRANSPORT_MALTA_SOURCE,
        )
        .un_sanctions_compliance(true)
        .court_order(warrant_id.clone())
        .arrest_warrant_id(warrant_id)
        .debt_amount(debt_amount);

        if let Some(imo) = imo_number {
            builder = builder.imo_number(imo);
        }

        builder.build().ok()
    }
}

/// Decode the entities that appear in the notices markup
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace(|c: char| c == '\u{201C}' || c == '\u{201D}', "\"")
        .replace("&euro;", "€")
        .replace("&#8364;", "€")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTICES: &str = r#"
        <div class="content-inner">
          <h3>Warrants of Arrest</h3>
          <p>Warrant of Arrest MT/ARR/2024-017 issued against the vessel &quot;Sea Breeze&quot;
             (IMO 9123456) for unpaid port dues of &euro;214,500.</p>
          <p>Notice <strong>MT/ARR/2024-018</strong>: vessel Aurora arrested in Grand Harbour.</p>
          <p>Warrant of Arrest pending publication.</p>
          <p>Office hours are 08:00 to 12:00.</p>
        </div>
    "#;

    fn connector() -> TransportMaltaConnector {
        TransportMaltaConnector::new(TransportMaltaConfig::default()).unwrap()
    }

    #[test]
    fn test_parses_full_notice() {
        let output = connector().parse(NOTICES).unwrap();
        assert_eq!(output.assets.len(), 2);

        let (_, asset) = &output.assets[0];
        assert_eq!(asset.asset_type, AssetType::Vessel);
        assert_eq!(asset.seizure_reason, SeizureReason::Debt);
        assert!(asset.legal_status.un_sanctions_compliance);
        assert_eq!(
            asset.legal_status.local_court_order.as_deref(),
            Some("MT/ARR/2024-017")
        );
        assert_eq!(asset.arrest_warrant_id.as_deref(), Some("MT/ARR/2024-017"));
        assert_eq!(asset.imo_number.as_deref(), Some("9123456"));
        assert_eq!(asset.description, "Sea Breeze (IMO: 9123456)");
        assert_eq!(asset.debt_amount.as_deref(), Some("€214,500"));
        assert_eq!(asset.source, TRANSPORT_MALTA_SOURCE);
    }

    #[test]
    fn test_bare_vessel_name_and_unknown_debt() {
        let output = connector().parse(NOTICES).unwrap();
        let (_, asset) = &output.assets[1];
        assert_eq!(asset.description, "Aurora");
        assert!(asset.imo_number.is_none());
        assert_eq!(asset.debt_amount.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_notice_without_reference_is_skipped() {
        let output = connector().parse(NOTICES).unwrap();
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].record, 3);
    }

    #[test]
    fn test_unrelated_blocks_are_ignored() {
        let output = connector()
            .parse("<p>Office hours are 08:00 to 12:00.</p>")
            .unwrap();
        assert!(output.assets.is_empty());
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_missing_vessel_name() {
        let output = connector()
            .parse("<p>Warrant of Arrest MT/ARR/2023-101 issued.</p>")
            .unwrap();
        assert_eq!(output.assets[0].1.description, UNKNOWN_VESSEL);
    }

    #[test]
    fn test_empty_page_rejected() {
        assert!(connector().parse("").is_err());
    }
}
