//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tradein::catalog::{Multiplier, VariantType};

use crate::{
    database::{price_column, price_from_row},
    domain::catalog::models::{
        Condition, ConditionUuid, DeviceModel, DeviceModelUpdate, DeviceModelUuid, NewCondition,
        NewDeviceModel, NewVariant, Variant, VariantUuid,
    },
};

const LIST_MODELS_SQL: &str = include_str!("sql/list_models.sql");
const GET_MODEL_SQL: &str = include_str!("sql/get_model.sql");
const CREATE_MODEL_SQL: &str = include_str!("sql/create_model.sql");
const UPDATE_MODEL_SQL: &str = include_str!("sql/update_model.sql");
const DELETE_MODEL_SQL: &str = include_str!("sql/delete_model.sql");
const LIST_CONDITIONS_SQL: &str = include_str!("sql/list_conditions.sql");
const GET_CONDITION_SQL: &str = include_str!("sql/get_condition.sql");
const CREATE_CONDITION_SQL: &str = include_str!("sql/create_condition.sql");
const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const GET_VARIANT_SQL: &str = include_str!("sql/get_variant.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_models(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        include_inactive: bool,
    ) -> Result<Vec<DeviceModel>, sqlx::Error> {
        query_as::<Postgres, DeviceModel>(LIST_MODELS_SQL)
            .bind(include_inactive)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_model(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        model: DeviceModelUuid,
    ) -> Result<DeviceModel, sqlx::Error> {
        query_as::<Postgres, DeviceModel>(GET_MODEL_SQL)
            .bind(model.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_model(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        model: NewDeviceModel,
    ) -> Result<DeviceModel, sqlx::Error> {
        query_as::<Postgres, DeviceModel>(CREATE_MODEL_SQL)
            .bind(model.uuid.into_uuid())
            .bind(model.name)
            .bind(model.brand)
            .bind(model.category)
            .bind(price_column(model.base_price, "base_price")?)
            .bind(model.has_carrier_variants)
            .bind(model.has_storage_variants)
            .bind(model.image_url)
            .bind(model.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_model(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        model: DeviceModelUuid,
        update: DeviceModelUpdate,
    ) -> Result<DeviceModel, sqlx::Error> {
        query_as::<Postgres, DeviceModel>(UPDATE_MODEL_SQL)
            .bind(model.into_uuid())
            .bind(update.name)
            .bind(update.brand)
            .bind(update.category)
            .bind(price_column(update.base_price, "base_price")?)
            .bind(update.has_carrier_variants)
            .bind(update.has_storage_variants)
            .bind(update.image_url)
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_model(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        model: DeviceModelUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_MODEL_SQL)
            .bind(model.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_conditions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Condition>, sqlx::Error> {
        query_as::<Postgres, Condition>(LIST_CONDITIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_condition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        condition: ConditionUuid,
    ) -> Result<Condition, sqlx::Error> {
        query_as::<Postgres, Condition>(GET_CONDITION_SQL)
            .bind(condition.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_condition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        condition: NewCondition,
    ) -> Result<Condition, sqlx::Error> {
        query_as::<Postgres, Condition>(CREATE_CONDITION_SQL)
            .bind(condition.uuid.into_uuid())
            .bind(condition.name)
            .bind(condition.multiplier.value())
            .bind(condition.description)
            .bind(condition.display_order)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        model: DeviceModelUuid,
    ) -> Result<Vec<Variant>, sqlx::Error> {
        query_as::<Postgres, Variant>(LIST_VARIANTS_SQL)
            .bind(model.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<Variant, sqlx::Error> {
        query_as::<Postgres, Variant>(GET_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: NewVariant,
    ) -> Result<Variant, sqlx::Error> {
        query_as::<Postgres, Variant>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.model_uuid.into_uuid())
            .bind(variant.variant_type.as_str())
            .bind(variant.name)
            .bind(variant.price_adjustment)
            .bind(variant.display_order)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for DeviceModel {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: DeviceModelUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            brand: row.try_get("brand")?,
            category: row.try_get("category")?,
            base_price: price_from_row(row, "base_price")?,
            has_carrier_variants: row.try_get("has_carrier_variants")?,
            has_storage_variants: row.try_get("has_storage_variants")?,
            image_url: row.try_get("image_url")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Condition {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let multiplier = Multiplier::new(row.try_get::<Decimal, _>("multiplier")?).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "multiplier".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            uuid: ConditionUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            multiplier,
            description: row.try_get("description")?,
            display_order: row.try_get("display_order")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Variant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let variant_type = row
            .try_get::<String, _>("variant_type")?
            .parse::<VariantType>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "variant_type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            model_uuid: DeviceModelUuid::from_uuid(row.try_get("model_uuid")?),
            variant_type,
            name: row.try_get("name")?,
            price_adjustment: row.try_get("price_adjustment")?,
            display_order: row.try_get("display_order")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
