//! Pricing
//!
//! Trade-in quotes are computed in minor currency units:
//!
//! 1. `after_condition = base_price * multiplier`, rounded half away from zero.
//! 2. `total = after_condition + carrier + storage + box_bonus + charger_bonus`.
//! 3. `final_price = max(0, total)`.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Multiplier;

/// Default bonus for returning the original box, in minor units.
pub const DEFAULT_BOX_BONUS: i64 = 5_00;

/// Default bonus for returning the original charger, in minor units.
pub const DEFAULT_CHARGER_BONUS: i64 = 5_00;

/// Default display currency for quotes.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Errors that can occur while pricing a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An intermediate amount does not fit the minor-unit integer range.
    #[error("price calculation overflowed")]
    Overflow,
}

/// Flat accessory bonuses and the currency quotes are displayed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Bonus added when the original box is included.
    pub box_bonus: i64,

    /// Bonus added when the original charger is included.
    pub charger_bonus: i64,

    /// ISO 4217 code used when formatting amounts.
    pub currency: String,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            box_bonus: DEFAULT_BOX_BONUS,
            charger_bonus: DEFAULT_CHARGER_BONUS,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// The condition tier chosen for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSelection {
    /// Display name, e.g. "Like New".
    pub name: String,

    /// Factor applied to the base price.
    pub multiplier: Multiplier,
}

/// A chosen carrier or storage option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelection {
    /// Display name, e.g. "Unlocked" or "256GB".
    pub name: String,

    /// Signed flat adjustment in minor units.
    pub adjustment: i64,
}

/// Everything needed to price one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfiguration {
    /// The model's base price in minor units.
    pub base_price: u64,

    /// Selected condition; a quote cannot be produced without one.
    pub condition: Option<ConditionSelection>,

    /// Selected carrier variant, if the model has any and one was chosen.
    pub carrier: Option<VariantSelection>,

    /// Selected storage variant, if the model has any and one was chosen.
    pub storage: Option<VariantSelection>,

    /// Original box included.
    pub has_box: bool,

    /// Original charger included.
    pub has_charger: bool,
}

/// Itemized record of how a quote was reached.
///
/// Persisted verbatim with an offer so it can be redisplayed after catalog edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Base price of the model.
    pub base_price: u64,

    /// Name of the selected condition.
    pub condition_name: String,

    /// Multiplier of the selected condition.
    pub condition_multiplier: Multiplier,

    /// Base price after the condition multiplier.
    pub price_after_condition: u64,

    /// Name of the carrier variant, when one was selected.
    pub carrier_name: Option<String>,

    /// Carrier adjustment; zero when no carrier variant applies.
    pub carrier_adjustment: i64,

    /// Name of the storage variant, when one was selected.
    pub storage_name: Option<String>,

    /// Storage adjustment; zero when no storage variant applies.
    pub storage_adjustment: i64,

    /// Bonus for the original box; zero when not included.
    pub box_bonus: i64,

    /// Bonus for the original charger; zero when not included.
    pub charger_bonus: i64,

    /// Final offer, floored at zero.
    pub final_price: u64,
}

/// A selection the configuration is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSelection {
    /// No condition tier has been chosen.
    Condition,
}

/// Outcome of pricing a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Quote {
    /// The configuration is complete and priced.
    Priced(PriceBreakdown),

    /// The configuration lacks a required selection.
    Incomplete {
        /// What still has to be chosen.
        missing: MissingSelection,
    },
}

impl Quote {
    /// The final price, if the configuration could be priced.
    pub fn final_price(&self) -> Option<u64> {
        self.breakdown().map(|breakdown| breakdown.final_price)
    }

    /// The breakdown, if the configuration could be priced.
    pub fn breakdown(&self) -> Option<&PriceBreakdown> {
        match self {
            Self::Priced(breakdown) => Some(breakdown),
            Self::Incomplete { .. } => None,
        }
    }
}

/// Price a device configuration.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when an amount leaves the `i64`/`u64` range.
pub fn quote(config: &DeviceConfiguration, rules: &PricingRules) -> Result<Quote, PricingError> {
    let Some(condition) = &config.condition else {
        return Ok(Quote::Incomplete {
            missing: MissingSelection::Condition,
        });
    };

    let price_after_condition = apply_multiplier(config.base_price, condition.multiplier)?;

    let carrier_adjustment = config.carrier.as_ref().map_or(0, |v| v.adjustment);
    let storage_adjustment = config.storage.as_ref().map_or(0, |v| v.adjustment);
    let box_bonus = if config.has_box { rules.box_bonus } else { 0 };
    let charger_bonus = if config.has_charger {
        rules.charger_bonus
    } else {
        0
    };

    let total = [carrier_adjustment, storage_adjustment, box_bonus, charger_bonus]
        .into_iter()
        .map(i128::from)
        .fold(i128::from(price_after_condition), |acc, term| acc + term);

    let final_price = u64::try_from(total.max(0)).map_err(|_overflow| PricingError::Overflow)?;

    Ok(Quote::Priced(PriceBreakdown {
        base_price: config.base_price,
        condition_name: condition.name.clone(),
        condition_multiplier: condition.multiplier,
        price_after_condition,
        carrier_name: config.carrier.as_ref().map(|v| v.name.clone()),
        carrier_adjustment,
        storage_name: config.storage.as_ref().map(|v| v.name.clone()),
        storage_adjustment,
        box_bonus,
        charger_bonus,
        final_price,
    }))
}

fn apply_multiplier(base_price: u64, multiplier: Multiplier) -> Result<u64, PricingError> {
    Decimal::from(base_price)
        .checked_mul(multiplier.value())
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_u64())
        .ok_or(PricingError::Overflow)
}
