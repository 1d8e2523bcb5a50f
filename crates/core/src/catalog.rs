//! Catalog

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building catalog values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Condition multipliers scale a base price and must not be negative.
    #[error("condition multiplier must not be negative, got {0}")]
    NegativeMultiplier(Decimal),

    /// The variant type string is neither `carrier` nor `storage`.
    #[error("unknown variant type \"{0}\"")]
    UnknownVariantType(String),
}

/// A non-negative factor applied to a device's base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Multiplier(Decimal);

impl Multiplier {
    /// Create a multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NegativeMultiplier`] when `value` is below zero.
    pub fn new(value: Decimal) -> Result<Self, CatalogError> {
        if value < Decimal::ZERO {
            return Err(CatalogError::NegativeMultiplier(value));
        }

        Ok(Self(value))
    }

    /// The multiplier as a decimal.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Multiplier {
    type Error = CatalogError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Multiplier> for Decimal {
    fn from(multiplier: Multiplier) -> Self {
        multiplier.0
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The kind of option a device variant describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantType {
    /// Network carrier lock.
    Carrier,

    /// Storage capacity.
    Storage,
}

impl VariantType {
    /// Stable string form used in storage and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Carrier => "carrier",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantType {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "carrier" => Ok(Self::Carrier),
            "storage" => Ok(Self::Storage),
            other => Err(CatalogError::UnknownVariantType(other.to_string())),
        }
    }
}

/// Which variant types a device model offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantFlags {
    /// The model is sold with carrier variants.
    pub carrier: bool,

    /// The model is sold with storage variants.
    pub storage: bool,
}

impl VariantFlags {
    /// Whether variants of the given type may be selected for this model.
    pub const fn allows(self, variant_type: VariantType) -> bool {
        match variant_type {
            VariantType::Carrier => self.carrier,
            VariantType::Storage => self.storage,
        }
    }
}
