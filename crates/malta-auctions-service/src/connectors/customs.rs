//! Customs Department seizure reports
//!
//! Reports arrive as CSV with a header row. Recognised columns are `type`,
//! `origin`, `value`, `date`, `serials` (`;`-separated), `make`, `model`,
//! `year` and `length`; all are optional and unknown columns are ignored.

use chrono::{DateTime, NaiveDate, Utc};
use malta_auctions_core::{
    AssetType, AuctionAsset, ComplianceEngine, ContrabandType, SeizureReason,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::ConnectorOutput;
use crate::error::{ServiceError, ServiceResult};

/// Source name stamped on customs assets
pub const CUSTOMS_SOURCE: &str = "Customs Department";

const UNKNOWN: &str = "Unknown";

/// One row of a customs report
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CustomsRecord {
    #[serde(rename = "type")]
    kind: Option<String>,
    origin: Option<String>,
    value: Option<String>,
    date: Option<String>,
    serials: Option<String>,
    make: Option<String>,
    model: Option<String>,
    year: Option<String>,
    length: Option<String>,
}

/// Maps customs CSV reports to assets
#[derive(Debug, Clone)]
pub struct CustomsConnector {
    engine: Arc<ComplianceEngine>,
}

impl CustomsConnector {
    pub fn new(engine: Arc<ComplianceEngine>) -> Self {
        Self { engine }
    }

    /// Parse a full report
    pub fn parse(&self, csv_data: &str) -> ServiceResult<ConnectorOutput> {
        if csv_data.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "Customs report is empty".to_string(),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.trim().as_bytes());

        // Fail the whole report when the header row itself is unreadable
        reader.headers()?;

        let mut output = ConnectorOutput::default();
        for (index, result) in reader.deserialize::<CustomsRecord>().enumerate() {
            let record_no = index + 1;
            match result {
                Ok(record) => match self.map_record(record) {
                    Ok(asset) => output.push(record_no, asset),
                    Err(reason) => {
                        warn!(record = record_no, %reason, "Skipping customs record");
                        output.skip(record_no, reason);
                    }
                },
                Err(e) => {
                    warn!(record = record_no, error = %e, "Unreadable customs record");
                    output.skip(record_no, format!("Unreadable record: {}", e));
                }
            }
        }

        debug!(
            mapped = output.assets.len(),
            skipped = output.skipped.len(),
            "Parsed customs report"
        );
        Ok(output)
    }

    fn map_record(&self, record: CustomsRecord) -> Result<AuctionAsset, String> {
        let kind = non_blank(&record.kind).unwrap_or_default();
        let origin = non_blank(&record.origin);
        let value = non_blank(&record.value);

        let asset_type = asset_type_for(kind);
        let sanctioned = origin
            .map(|o| self.engine.is_sanctioned_origin(o))
            .unwrap_or(false);
        let seizure_reason = if sanctioned {
            SeizureReason::Sanctions
        } else {
            SeizureReason::Contraband
        };

        let mut builder = AuctionAsset::builder(
            asset_type,
            seizure_reason,
            describe(&record, kind, origin, value),
            CUSTOMS_SOURCE,
        )
        .un_sanctions_compliance(!sanctioned)
        .value(value.map(|v| format!("€{}", v)).unwrap_or_else(|| UNKNOWN.to_string()))
        .origin(origin.unwrap_or(UNKNOWN));

        if let Some(date) = non_blank(&record.date) {
            builder = builder.date_added(parse_date(date)?);
        }

        if let Some(contraband_type) = contraband_type_for(kind) {
            builder = builder.contraband_type(contraband_type);
        }

        if asset_type == AssetType::Currency {
            if let Some(serials) = non_blank(&record.serials) {
                let serials: Vec<String> = serials
                    .split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                if !serials.is_empty() {
                    builder = builder.serial_numbers(serials);
                }
            }
        }

        builder.build().map_err(|e| e.to_string())
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn asset_type_for(kind: &str) -> AssetType {
    let kind = kind.to_lowercase();
    if contains_any(&kind, &["vessel", "boat", "ship"]) {
        AssetType::Vessel
    } else if contains_any(&kind, &["currency", "money", "cash"]) {
        AssetType::Currency
    } else if contains_any(&kind, &["car", "vehicle", "truck"]) {
        AssetType::Vehicle
    } else if contains_any(&kind, &["property", "house", "land"]) {
        AssetType::RealEstate
    } else {
        AssetType::Vehicle
    }
}

fn contraband_type_for(kind: &str) -> Option<ContrabandType> {
    let kind = kind.to_lowercase();
    if contains_any(&kind, &["drug", "narcotic"]) {
        Some(ContrabandType::Drugs)
    } else if contains_any(&kind, &["weapon", "firearm", "ammunition"]) {
        Some(ContrabandType::Weapons)
    } else if contains_any(&kind, &["currency", "money", "cash"]) {
        Some(ContrabandType::Currency)
    } else {
        None
    }
}

fn describe(record: &CustomsRecord, kind: &str, origin: Option<&str>, value: Option<&str>) -> String {
    let lowered = kind.to_lowercase();

    if lowered.contains("currency") {
        format!(
            "{} currency shipment ({})",
            origin.unwrap_or("Unknown origin"),
            value
                .map(|v| format!("€{}", v))
                .unwrap_or_else(|| "value unknown".to_string())
        )
    } else if lowered.contains("vehicle") {
        let name: Vec<&str> = [&record.make, &record.model, &record.year]
            .into_iter()
            .filter_map(non_blank)
            .collect();
        let origin = origin.unwrap_or("Unknown origin");
        if name.is_empty() {
            format!("Vehicle ({})", origin)
        } else {
            format!("{} ({})", name.join(" "), origin)
        }
    } else if lowered.contains("vessel") {
        let length = non_blank(&record.length)
            .map(|l| format!("{}m ", l))
            .unwrap_or_default();
        format!(
            "{}{} from {}",
            length,
            kind,
            origin.unwrap_or("unknown origin")
        )
    } else {
        let kind = if kind.is_empty() { "Item" } else { kind };
        format!("{} from {}", kind, origin.unwrap_or("unknown origin"))
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates
fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("Unrecognised date: {}", raw))
}
