//! Quote request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein::{
    money::format_minor,
    pricing::{MissingSelection, PriceBreakdown, Quote},
};
use tradein_app::domain::quotes::models::{QuoteRequest, ResolvedQuote};

/// Device configuration to price
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteRequestBody {
    pub model: Uuid,
    #[serde(default)]
    pub condition: Option<Uuid>,
    #[serde(default)]
    pub carrier: Option<Uuid>,
    #[serde(default)]
    pub storage: Option<Uuid>,
    #[serde(default)]
    pub has_box: bool,
    #[serde(default)]
    pub has_charger: bool,
}

impl From<QuoteRequestBody> for QuoteRequest {
    fn from(body: QuoteRequestBody) -> Self {
        QuoteRequest {
            model: body.model.into(),
            condition: body.condition.map(Into::into),
            carrier: body.carrier.map(Into::into),
            storage: body.storage.map(Into::into),
            has_box: body.has_box,
            has_charger: body.has_charger,
        }
    }
}

/// Itemized price breakdown, amounts in minor units
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct BreakdownResponse {
    pub base_price: u64,
    pub condition_name: String,

    /// Decimal multiplier, e.g. `"0.75"`
    pub condition_multiplier: String,
    pub price_after_condition: u64,
    pub carrier_name: Option<String>,
    pub carrier_adjustment: i64,
    pub storage_name: Option<String>,
    pub storage_adjustment: i64,
    pub box_bonus: i64,
    pub charger_bonus: i64,
    pub final_price: u64,
}

impl From<&PriceBreakdown> for BreakdownResponse {
    fn from(breakdown: &PriceBreakdown) -> Self {
        Self {
            base_price: breakdown.base_price,
            condition_name: breakdown.condition_name.clone(),
            condition_multiplier: breakdown.condition_multiplier.to_string(),
            price_after_condition: breakdown.price_after_condition,
            carrier_name: breakdown.carrier_name.clone(),
            carrier_adjustment: breakdown.carrier_adjustment,
            storage_name: breakdown.storage_name.clone(),
            storage_adjustment: breakdown.storage_adjustment,
            box_bonus: breakdown.box_bonus,
            charger_bonus: breakdown.charger_bonus,
            final_price: breakdown.final_price,
        }
    }
}

/// Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    /// `priced` or `incomplete`
    pub status: String,

    /// The selection still required when incomplete
    pub missing: Option<String>,
    pub breakdown: Option<BreakdownResponse>,
    pub final_price: Option<u64>,

    /// Final price formatted in `currency`
    pub formatted_price: Option<String>,
    pub currency: String,
    pub model_name: String,
    pub brand: String,
    pub category: String,
    pub image_url: Option<String>,
    pub condition_name: Option<String>,
    pub carrier_name: Option<String>,
    pub storage_name: Option<String>,
    pub has_box: bool,
    pub has_charger: bool,
}

impl From<ResolvedQuote> for QuoteResponse {
    fn from(resolved: ResolvedQuote) -> Self {
        let (status, missing, breakdown) = match &resolved.quote {
            Quote::Priced(breakdown) => ("priced", None, Some(BreakdownResponse::from(breakdown))),
            Quote::Incomplete { missing } => ("incomplete", Some(missing_label(*missing)), None),
        };

        let final_price = resolved.quote.final_price();

        Self {
            status: status.to_string(),
            missing,
            breakdown,
            final_price,
            formatted_price: final_price
                .and_then(|price| i64::try_from(price).ok())
                .and_then(|price| format_minor(price, &resolved.currency).ok()),
            currency: resolved.currency,
            model_name: resolved.model_name,
            brand: resolved.brand,
            category: resolved.category,
            image_url: resolved.image_url,
            condition_name: resolved.condition_name,
            carrier_name: resolved.carrier_name,
            storage_name: resolved.storage_name,
            has_box: resolved.has_box,
            has_charger: resolved.has_charger,
        }
    }
}

fn missing_label(missing: MissingSelection) -> String {
    match missing {
        MissingSelection::Condition => "condition".to_string(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use testresult::TestResult;
    use tradein::{
        catalog::Multiplier,
        pricing::{PriceBreakdown, Quote},
    };
    use tradein_app::domain::quotes::models::ResolvedQuote;

    /// 400.00 at 0.75, +40.00 storage, +5.00 box: 345.00.
    pub(crate) fn make_breakdown() -> TestResult<PriceBreakdown> {
        Ok(PriceBreakdown {
            base_price: 400_00,
            condition_name: "Good".to_string(),
            condition_multiplier: Multiplier::new(Decimal::from_str("0.75")?)?,
            price_after_condition: 300_00,
            carrier_name: None,
            carrier_adjustment: 0,
            storage_name: Some("256GB".to_string()),
            storage_adjustment: 40_00,
            box_bonus: 5_00,
            charger_bonus: 0,
            final_price: 345_00,
        })
    }

    pub(crate) fn make_resolved_quote(quote: Quote) -> ResolvedQuote {
        let priced = matches!(quote, Quote::Priced(_));

        ResolvedQuote {
            quote,
            model_name: "iPhone 13".to_string(),
            brand: "Apple".to_string(),
            category: "phone".to_string(),
            image_url: None,
            condition_name: priced.then(|| "Good".to_string()),
            carrier_name: None,
            storage_name: Some("256GB".to_string()),
            has_box: true,
            has_charger: false,
            currency: "USD".to_string(),
        }
    }
}
