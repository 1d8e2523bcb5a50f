//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{
            Condition, DeviceModel, DeviceModelDetails, DeviceModelUpdate, DeviceModelUuid,
            NewCondition, NewDeviceModel, NewVariant, Variant,
        },
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_models(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<DeviceModel>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let models = self
            .repository
            .list_models(&mut tx, include_inactive)
            .await?;

        tx.commit().await?;

        Ok(models)
    }

    async fn get_model(
        &self,
        model: DeviceModelUuid,
    ) -> Result<DeviceModelDetails, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let model = self.repository.get_model(&mut tx, model).await?;
        let variants = self.repository.list_variants(&mut tx, model.uuid).await?;

        tx.commit().await?;

        Ok(DeviceModelDetails { model, variants })
    }

    async fn create_model(
        &self,
        model: NewDeviceModel,
    ) -> Result<DeviceModel, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_model(&mut tx, model).await?;

        tx.commit().await?;

        info!(model = %created.uuid, name = %created.name, "device model created");

        Ok(created)
    }

    async fn update_model(
        &self,
        model: DeviceModelUuid,
        update: DeviceModelUpdate,
    ) -> Result<DeviceModel, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_model(&mut tx, model, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_model(&self, model: DeviceModelUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_model(&mut tx, model).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%model, "device model retired");

        Ok(())
    }

    async fn list_conditions(&self) -> Result<Vec<Condition>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let conditions = self.repository.list_conditions(&mut tx).await?;

        tx.commit().await?;

        Ok(conditions)
    }

    async fn create_condition(
        &self,
        condition: NewCondition,
    ) -> Result<Condition, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_condition(&mut tx, condition).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_variant(&self, variant: NewVariant) -> Result<Variant, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let model = self
            .repository
            .get_model(&mut tx, variant.model_uuid)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => CatalogServiceError::InvalidReference,
                other => other.into(),
            })?;

        if !model.variant_flags().allows(variant.variant_type) {
            return Err(CatalogServiceError::VariantNotOffered(variant.variant_type));
        }

        let created = self.repository.create_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List device models that have not been retired, optionally including inactive ones.
    async fn list_models(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<DeviceModel>, CatalogServiceError>;

    /// Retrieve a model together with its variants.
    async fn get_model(
        &self,
        model: DeviceModelUuid,
    ) -> Result<DeviceModelDetails, CatalogServiceError>;

    async fn create_model(&self, model: NewDeviceModel) -> Result<DeviceModel, CatalogServiceError>;

    async fn update_model(
        &self,
        model: DeviceModelUuid,
        update: DeviceModelUpdate,
    ) -> Result<DeviceModel, CatalogServiceError>;

    /// Soft-delete a model. Existing offers keep referencing it.
    async fn delete_model(&self, model: DeviceModelUuid) -> Result<(), CatalogServiceError>;

    /// Condition tiers in display order.
    async fn list_conditions(&self) -> Result<Vec<Condition>, CatalogServiceError>;

    async fn create_condition(
        &self,
        condition: NewCondition,
    ) -> Result<Condition, CatalogServiceError>;

    /// Add a carrier or storage option to a model that offers that kind of variant.
    async fn create_variant(&self, variant: NewVariant) -> Result<Variant, CatalogServiceError>;
}
