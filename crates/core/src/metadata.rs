//! Offer metadata
//!
//! Snapshot stored with every offer at submission so later catalog edits never
//! change what the customer was shown. Blobs written before the snapshot was
//! versioned carry no breakdown and decode as [`OfferMetadata::Legacy`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::pricing::PriceBreakdown;

const SCHEMA_VERSION_TAG: &str = "schema_version";

/// Human-readable labels of everything selected when the offer was made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOptions {
    /// Device model name.
    pub model_name: String,

    /// Brand name.
    pub brand: String,

    /// Category name.
    pub category: String,

    /// Condition tier name.
    pub condition_name: String,

    /// Carrier variant name, if one was selected.
    pub carrier_name: Option<String>,

    /// Storage variant name, if one was selected.
    pub storage_name: Option<String>,

    /// Original box included.
    pub has_box: bool,

    /// Original charger included.
    pub has_charger: bool,
}

/// Versioned snapshot layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema_version", rename_all = "snake_case")]
pub enum VersionedMetadata {
    /// Breakdown plus selection labels.
    V1 {
        /// Price breakdown at submission.
        breakdown: PriceBreakdown,

        /// Selected option labels at submission.
        selections: SelectedOptions,
    },
}

/// Whatever labels an unversioned blob happened to carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMetadata {
    /// Device model name, if recorded.
    #[serde(default)]
    pub model_name: Option<String>,

    /// Condition name, if recorded.
    #[serde(default)]
    pub condition_name: Option<String>,

    /// Carrier name, if recorded.
    #[serde(default)]
    pub carrier_name: Option<String>,

    /// Storage name, if recorded.
    #[serde(default)]
    pub storage_name: Option<String>,
}

/// Metadata stored alongside an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfferMetadata {
    /// A snapshot in a known schema version.
    Versioned(VersionedMetadata),

    /// A blob predating versioned snapshots.
    Legacy(LegacyMetadata),
}

/// A stored blob tagged with a schema version that does not decode as it.
#[derive(Debug, Error)]
#[error("unreadable metadata snapshot tagged {tag}: {source}")]
pub struct DamagedSnapshot {
    /// The `schema_version` value the blob carried.
    pub tag: Value,

    #[source]
    source: serde_json::Error,
}

/// How an offer's price should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayedPrice<'a> {
    /// The full itemized breakdown is available.
    Itemized(&'a PriceBreakdown),

    /// Only the stored quoted price is known.
    QuotedOnly(u64),
}

impl OfferMetadata {
    /// Build the current snapshot layout.
    pub fn current(breakdown: PriceBreakdown, selections: SelectedOptions) -> Self {
        Self::Versioned(VersionedMetadata::V1 {
            breakdown,
            selections,
        })
    }

    /// Decode a stored blob.
    ///
    /// Untagged blobs are legacy; whatever labels they carry are kept.
    ///
    /// # Errors
    ///
    /// Returns [`DamagedSnapshot`] when the blob carries a `schema_version` but
    /// does not decode as a known snapshot layout.
    pub fn decode(value: Value) -> Result<Self, DamagedSnapshot> {
        let Some(tag) = value.get(SCHEMA_VERSION_TAG).cloned() else {
            return Ok(Self::Legacy(serde_json::from_value(value).unwrap_or_default()));
        };

        serde_json::from_value(value)
            .map(Self::Versioned)
            .map_err(|source| DamagedSnapshot { tag, source })
    }

    /// Stand-in for a snapshot that could not be read.
    pub fn unreadable() -> Self {
        Self::Legacy(LegacyMetadata::default())
    }

    /// The breakdown captured at submission, when the snapshot has one.
    pub fn breakdown(&self) -> Option<&PriceBreakdown> {
        match self {
            Self::Versioned(VersionedMetadata::V1 { breakdown, .. }) => Some(breakdown),
            Self::Legacy(_) => None,
        }
    }

    /// Model name as recorded at submission.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            Self::Versioned(VersionedMetadata::V1 { selections, .. }) => {
                Some(selections.model_name.as_str())
            }
            Self::Legacy(legacy) => legacy.model_name.as_deref(),
        }
    }

    /// Condition name as recorded at submission.
    pub fn condition_name(&self) -> Option<&str> {
        match self {
            Self::Versioned(VersionedMetadata::V1 { selections, .. }) => {
                Some(selections.condition_name.as_str())
            }
            Self::Legacy(legacy) => legacy.condition_name.as_deref(),
        }
    }

    /// Presentation of the price, falling back to `quoted_price` for legacy offers.
    ///
    /// `quoted_price` is the offer's current price; when an administrator revised it
    /// the snapshot breakdown no longer matches and the quoted price wins.
    pub fn displayed_price(&self, quoted_price: u64) -> DisplayedPrice<'_> {
        match self.breakdown() {
            Some(breakdown) if breakdown.final_price == quoted_price => {
                DisplayedPrice::Itemized(breakdown)
            }
            _ => DisplayedPrice::QuotedOnly(quoted_price),
        }
    }
}
