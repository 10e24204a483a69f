//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Asset identifier using ULID (Universally Unique Lexicographically Sortable Identifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Ulid);

impl AssetId {
    /// Generate a new AssetId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Create AssetId from a ULID
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// Get the underlying ULID
    pub fn as_ulid(&self) -> &Ulid {
        &self.0
    }

    /// Parse from string
    pub fn from_string(s: &str) -> Result<Self, String> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| format!("Invalid AssetId: {}", e))
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetId::from_string(s)
    }
}

/// Sanctions verdict assigned to an asset by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    /// Sale is restricted to top-tier verified bidders
    Blocked,
    /// Asset needs enhanced due diligence before sale
    Review,
    /// No sanctions concerns found
    Clear,
}

impl Disposition {
    /// Get the wire representation of the disposition
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocked => "BLOCKED",
            Self::Review => "REVIEW",
            Self::Clear => "CLEAR",
        }
    }

    /// Whether the asset passed screening without findings
    pub fn is_clear(&self) -> bool {
        *self == Self::Clear
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disposition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BLOCKED" => Ok(Self::Blocked),
            "REVIEW" => Ok(Self::Review),
            "CLEAR" => Ok(Self::Clear),
            _ => Err(format!("Invalid disposition: {}", s)),
        }
    }
}
