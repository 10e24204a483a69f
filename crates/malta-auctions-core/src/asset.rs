//! Seized asset model
//!
//! This module defines the `AuctionAsset` record that flows through the
//! catalog, together with the closed vocabularies used to describe it.
//! Field names serialize in camelCase because that is what the catalog's
//! front end consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RegistryError, Result};
use crate::types::{AssetId, Disposition};

/// Kinds of seized assets offered at auction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Land or buildings
    RealEstate,
    /// Ships and boats, usually under a warrant of arrest
    Vessel,
    /// Seized cash
    Currency,
    /// Cars, trucks and other road vehicles
    Vehicle,
}

impl AssetType {
    /// All asset types, in catalog order
    pub const ALL: [AssetType; 4] = [
        AssetType::RealEstate,
        AssetType::Vessel,
        AssetType::Currency,
        AssetType::Vehicle,
    ];

    /// Get the string representation of the asset type
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::RealEstate => "real_estate",
            AssetType::Vessel => "vessel",
            AssetType::Currency => "currency",
            AssetType::Vehicle => "vehicle",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        AssetType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RegistryError::InvalidAssetType(s.to_string()))
    }
}

/// Legal basis for the seizure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeizureReason {
    Sanctions,
    Debt,
    Contraband,
}

impl SeizureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeizureReason::Sanctions => "sanctions",
            SeizureReason::Debt => "debt",
            SeizureReason::Contraband => "contraband",
        }
    }
}

impl fmt::Display for SeizureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeizureReason {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sanctions" => Ok(SeizureReason::Sanctions),
            "debt" => Ok(SeizureReason::Debt),
            "contraband" => Ok(SeizureReason::Contraband),
            other => Err(RegistryError::InvalidSeizureReason(other.to_string())),
        }
    }
}

/// Category of contraband an asset was seized as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContrabandType {
    Drugs,
    Weapons,
    Currency,
}

impl ContrabandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContrabandType::Drugs => "drugs",
            ContrabandType::Weapons => "weapons",
            ContrabandType::Currency => "currency",
        }
    }
}

impl fmt::Display for ContrabandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContrabandType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "drugs" => Ok(ContrabandType::Drugs),
            "weapons" => Ok(ContrabandType::Weapons),
            "currency" => Ok(ContrabandType::Currency),
            other => Err(RegistryError::InvalidContrabandType(other.to_string())),
        }
    }
}

/// Legal standing of a seized asset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalStatus {
    /// Whether the asset is compliant with UN sanctions regimes
    pub un_sanctions_compliance: bool,

    /// Reference of the Maltese court order authorising the sale
    #[serde(default)]
    pub local_court_order: Option<String>,
}

impl LegalStatus {
    pub fn new(un_sanctions_compliance: bool, local_court_order: Option<String>) -> Self {
        Self {
            un_sanctions_compliance,
            local_court_order,
        }
    }
}

/// A seized asset listed in the auction catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionAsset {
    /// Storage identifier, assigned on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AssetId>,

    #[serde(rename = "type")]
    pub asset_type: AssetType,

    pub seizure_reason: SeizureReason,

    pub legal_status: LegalStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraband_type: Option<ContrabandType>,

    /// IMO number for vessels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imo_number: Option<String>,

    /// Warrant of arrest reference for vessels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrest_warrant_id: Option<String>,

    pub description: String,

    /// Outstanding debt, as a display string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_amount: Option<String>,

    /// Estimated value, as a display string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Country or region the asset came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Name of the ingestion source
    pub source: String,

    pub date_added: DateTime<Utc>,

    /// Banknote serial numbers, currency assets only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_numbers: Option<Vec<String>>,

    /// Classifier verdict, set on display copies only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanction_status: Option<Disposition>,

    /// Disclaimer text, set on display copies only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_disclaimer: Option<String>,
}

impl AuctionAsset {
    /// Create a builder for constructing an asset
    pub fn builder(
        asset_type: AssetType,
        seizure_reason: SeizureReason,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> AuctionAssetBuilder {
        AuctionAssetBuilder::new(asset_type, seizure_reason, description, source)
    }

    /// Validate the asset before it is screened or stored
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(RegistryError::ValidationError(
                "Asset description cannot be empty".to_string(),
            ));
        }

        if self.source.trim().is_empty() {
            return Err(RegistryError::ValidationError(
                "Asset source cannot be empty".to_string(),
            ));
        }

        if self.serial_numbers.is_some() && self.asset_type != AssetType::Currency {
            return Err(RegistryError::ValidationError(format!(
                "Serial numbers are only allowed on currency assets, not {}",
                self.asset_type
            )));
        }

        if let Some(ref serials) = self.serial_numbers {
            if serials.iter().any(|s| s.trim().is_empty()) {
                return Err(RegistryError::ValidationError(
                    "Serial numbers cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Whether the asset is one of the display-processed copies
    pub fn is_display_copy(&self) -> bool {
        self.sanction_status.is_some() || self.compliance_disclaimer.is_some()
    }

    /// Drop the fields that only exist on display copies
    pub fn clear_display_fields(&mut self) {
        self.sanction_status = None;
        self.compliance_disclaimer = None;
    }
}

/// Builder for constructing `AuctionAsset` instances
#[derive(Debug)]
pub struct AuctionAssetBuilder {
    asset: AuctionAsset,
}

impl AuctionAssetBuilder {
    /// Create a new builder with the required fields
    pub fn new(
        asset_type: AssetType,
        seizure_reason: SeizureReason,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            asset: AuctionAsset {
                id: None,
                asset_type,
                seizure_reason,
                legal_status: LegalStatus::default(),
                contraband_type: None,
                imo_number: None,
                arrest_warrant_id: None,
                description: description.into(),
                debt_amount: None,
                value: None,
                origin: None,
                source: source.into(),
                date_added: Utc::now(),
                serial_numbers: None,
                sanction_status: None,
                compliance_disclaimer: None,
            },
        }
    }

    pub fn id(mut self, id: AssetId) -> Self {
        self.asset.id = Some(id);
        self
    }

    pub fn legal_status(mut self, legal_status: LegalStatus) -> Self {
        self.asset.legal_status = legal_status;
        self
    }

    /// Set the UN sanctions compliance flag
    pub fn un_sanctions_compliance(mut self, compliant: bool) -> Self {
        self.asset.legal_status.un_sanctions_compliance = compliant;
        self
    }

    pub fn court_order(mut self, order: impl Into<String>) -> Self {
        self.asset.legal_status.local_court_order = Some(order.into());
        self
    }

    pub fn contraband_type(mut self, contraband_type: ContrabandType) -> Self {
        self.asset.contraband_type = Some(contraband_type);
        self
    }

    pub fn imo_number(mut self, imo: impl Into<String>) -> Self {
        self.asset.imo_number = Some(imo.into());
        self
    }

    pub fn arrest_warrant_id(mut self, warrant_id: impl Into<String>) -> Self {
        self.asset.arrest_warrant_id = Some(warrant_id.into());
        self
    }

    pub fn debt_amount(mut self, amount: impl Into<String>) -> Self {
        self.asset.debt_amount = Some(amount.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.asset.value = Some(value.into());
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.asset.origin = Some(origin.into());
        self
    }

    pub fn date_added(mut self, date_added: DateTime<Utc>) -> Self {
        self.asset.date_added = date_added;
        self
    }

    pub fn serial_numbers(mut self, serials: Vec<String>) -> Self {
        self.asset.serial_numbers = Some(serials);
        self
    }

    /// Build the asset, validating it first
    pub fn build(self) -> Result<AuctionAsset> {
        self.asset.validate()?;
        Ok(self.asset)
    }
}
