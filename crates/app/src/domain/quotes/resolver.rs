//! Turns catalog references into a priced quote.

use sqlx::{Postgres, Transaction};
use tradein::{
    catalog::VariantType,
    pricing::{ConditionSelection, DeviceConfiguration, PricingRules, VariantSelection, quote},
};

use crate::domain::{
    catalog::{
        models::{Condition, DeviceModel, Variant, VariantUuid},
        repository::PgCatalogRepository,
    },
    quotes::{
        errors::QuotesServiceError,
        models::{QuoteRequest, ResolvedQuote},
    },
};

#[derive(Debug, Clone)]
pub(crate) struct QuoteResolver {
    repository: PgCatalogRepository,
    rules: PricingRules,
}

impl QuoteResolver {
    pub(crate) fn new(rules: PricingRules) -> Self {
        Self {
            repository: PgCatalogRepository::new(),
            rules,
        }
    }

    pub(crate) async fn resolve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: &QuoteRequest,
    ) -> Result<ResolvedQuote, QuotesServiceError> {
        let model = self
            .repository
            .get_model(tx, request.model)
            .await
            .map_err(|e| not_found_as(e, QuotesServiceError::ModelNotFound))?;

        if !model.is_quotable() {
            return Err(QuotesServiceError::ModelNotFound);
        }

        let condition = match request.condition {
            Some(uuid) => Some(
                self.repository
                    .get_condition(tx, uuid)
                    .await
                    .map_err(|e| not_found_as(e, QuotesServiceError::ConditionNotFound))?,
            ),
            None => None,
        };

        let carrier = self.variant(tx, request.carrier).await?;
        let storage = self.variant(tx, request.storage).await?;

        let configuration = build_configuration(
            &model,
            condition.as_ref(),
            carrier.as_ref(),
            storage.as_ref(),
            request.has_box,
            request.has_charger,
        )?;

        Ok(ResolvedQuote {
            quote: quote(&configuration, &self.rules)?,
            model_name: model.name,
            brand: model.brand,
            category: model.category,
            image_url: model.image_url,
            condition_name: condition.map(|c| c.name),
            carrier_name: carrier.map(|v| v.name),
            storage_name: storage.map(|v| v.name),
            has_box: request.has_box,
            has_charger: request.has_charger,
            currency: self.rules.currency.clone(),
        })
    }

    async fn variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: Option<VariantUuid>,
    ) -> Result<Option<Variant>, QuotesServiceError> {
        let Some(uuid) = variant else {
            return Ok(None);
        };

        self.repository
            .get_variant(tx, uuid)
            .await
            .map(Some)
            .map_err(|e| not_found_as(e, QuotesServiceError::VariantNotFound))
    }
}

fn not_found_as(error: sqlx::Error, not_found: QuotesServiceError) -> QuotesServiceError {
    match error {
        sqlx::Error::RowNotFound => not_found,
        other => QuotesServiceError::Sql(other),
    }
}

/// Check the selected variants against the model and assemble calculator input.
pub(crate) fn build_configuration(
    model: &DeviceModel,
    condition: Option<&Condition>,
    carrier: Option<&Variant>,
    storage: Option<&Variant>,
    has_box: bool,
    has_charger: bool,
) -> Result<DeviceConfiguration, QuotesServiceError> {
    Ok(DeviceConfiguration {
        base_price: model.base_price,
        condition: condition.map(|c| ConditionSelection {
            name: c.name.clone(),
            multiplier: c.multiplier,
        }),
        carrier: select_variant(model, carrier, VariantType::Carrier)?,
        storage: select_variant(model, storage, VariantType::Storage)?,
        has_box,
        has_charger,
    })
}

fn select_variant(
    model: &DeviceModel,
    variant: Option<&Variant>,
    expected: VariantType,
) -> Result<Option<VariantSelection>, QuotesServiceError> {
    let Some(variant) = variant else {
        return Ok(None);
    };

    if variant.model_uuid != model.uuid {
        return Err(QuotesServiceError::VariantMismatch);
    }

    if variant.variant_type != expected {
        return Err(QuotesServiceError::WrongVariantType { expected });
    }

    if !model.variant_flags().allows(expected) {
        return Err(QuotesServiceError::VariantNotOffered(expected));
    }

    Ok(Some(VariantSelection {
        name: variant.name.clone(),
        adjustment: variant.price_adjustment,
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use tradein::catalog::Multiplier;

    use crate::domain::catalog::models::{ConditionUuid, DeviceModelUuid};

    use super::*;

    fn phone(carrier: bool, storage: bool) -> DeviceModel {
        DeviceModel {
            uuid: DeviceModelUuid::new(),
            name: "iPhone 14".to_string(),
            brand: "Apple".to_string(),
            category: "Phones".to_string(),
            base_price: 400_00,
            has_carrier_variants: carrier,
            has_storage_variants: storage,
            image_url: None,
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    fn good() -> TestResult<Condition> {
        Ok(Condition {
            uuid: ConditionUuid::new(),
            name: "Good".to_string(),
            multiplier: Multiplier::new(Decimal::new(75, 2))?,
            description: None,
            display_order: 1,
            created_at: Timestamp::UNIX_EPOCH,
        })
    }

    fn variant(model: &DeviceModel, variant_type: VariantType, name: &str, adj: i64) -> Variant {
        Variant {
            uuid: VariantUuid::new(),
            model_uuid: model.uuid,
            variant_type,
            name: name.to_string(),
            price_adjustment: adj,
            display_order: 0,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn builds_configuration_from_catalog_rows() -> TestResult {
        let model = phone(true, true);
        let condition = good()?;
        let carrier = variant(&model, VariantType::Carrier, "Unlocked", 20_00);
        let storage = variant(&model, VariantType::Storage, "256GB", 50_00);

        let config = build_configuration(
            &model,
            Some(&condition),
            Some(&carrier),
            Some(&storage),
            true,
            false,
        )?;

        assert_eq!(config.base_price, 400_00);
        assert_eq!(config.condition.map(|c| c.name).as_deref(), Some("Good"));
        assert_eq!(config.carrier.map(|c| c.adjustment), Some(20_00));
        assert_eq!(config.storage.map(|s| s.name).as_deref(), Some("256GB"));
        assert!(config.has_box);
        assert!(!config.has_charger);

        Ok(())
    }

    #[test]
    fn unselected_variants_are_allowed() -> TestResult {
        let model = phone(true, true);

        let config = build_configuration(&model, Some(&good()?), None, None, false, false)?;

        assert!(config.carrier.is_none());
        assert!(config.storage.is_none());

        Ok(())
    }

    #[test]
    fn variant_of_another_model_is_rejected() {
        let model = phone(true, true);
        let other = phone(true, true);
        let carrier = variant(&other, VariantType::Carrier, "Verizon", 0);

        let result = build_configuration(&model, None, Some(&carrier), None, false, false);

        assert!(matches!(result, Err(QuotesServiceError::VariantMismatch)));
    }

    #[test]
    fn storage_variant_in_carrier_slot_is_rejected() {
        let model = phone(true, true);
        let storage = variant(&model, VariantType::Storage, "128GB", 0);

        let result = build_configuration(&model, None, Some(&storage), None, false, false);

        assert!(matches!(
            result,
            Err(QuotesServiceError::WrongVariantType {
                expected: VariantType::Carrier
            })
        ));
    }

    #[test]
    fn variant_kind_the_model_does_not_offer_is_rejected() {
        let model = phone(false, true);
        let carrier = variant(&model, VariantType::Carrier, "AT&T", -10_00);

        let result = build_configuration(&model, None, Some(&carrier), None, false, false);

        assert!(matches!(
            result,
            Err(QuotesServiceError::VariantNotOffered(VariantType::Carrier))
        ));
    }
}
