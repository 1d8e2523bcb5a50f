//! Pricing Config

use clap::Args;
use tradein::{
    offers::{DEFAULT_EXPIRY_DAYS, ExpiryPolicy},
    pricing::PricingRules,
};
use tradein_app::context::AppSettings;

/// Accessory bonuses, display currency and the offer expiry window.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Days a submitted offer stays open
    #[arg(long, env = "OFFER_EXPIRY_DAYS", default_value_t = DEFAULT_EXPIRY_DAYS)]
    pub offer_expiry_days: u32,

    /// Bonus for the original box, in minor units
    #[arg(long, env = "BOX_BONUS_MINOR", default_value_t = 500)]
    pub box_bonus_minor: i64,

    /// Bonus for the original charger, in minor units
    #[arg(long, env = "CHARGER_BONUS_MINOR", default_value_t = 500)]
    pub charger_bonus_minor: i64,

    /// ISO 4217 code quotes are displayed in
    #[arg(long, env = "PRICING_CURRENCY", default_value = "USD")]
    pub pricing_currency: String,
}

impl PricingConfig {
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            pricing: PricingRules {
                box_bonus: self.box_bonus_minor,
                charger_bonus: self.charger_bonus_minor,
                currency: self.pricing_currency.clone(),
            },
            expiry: ExpiryPolicy::new(self.offer_expiry_days),
        }
    }
}
