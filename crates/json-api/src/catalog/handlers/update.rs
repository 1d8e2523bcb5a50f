//! Update Device Model Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein_app::domain::catalog::models::DeviceModelUpdate;

use crate::{
    catalog::{errors::into_status_error, models::DeviceModelResponse},
    extensions::*,
    state::State,
};

/// Update Device Model Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateDeviceModelRequest {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub base_price: u64,
    pub has_carrier_variants: bool,
    pub has_storage_variants: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<UpdateDeviceModelRequest> for DeviceModelUpdate {
    fn from(request: UpdateDeviceModelRequest) -> Self {
        DeviceModelUpdate {
            name: request.name,
            brand: request.brand,
            category: request.category,
            base_price: request.base_price,
            has_carrier_variants: request.has_carrier_variants,
            has_storage_variants: request.has_storage_variants,
            image_url: request.image_url,
            is_active: request.is_active,
        }
    }
}

/// Update Device Model Handler
#[endpoint(
    tags("catalog"),
    summary = "Update Device Model",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Device model updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Device model not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "catalog.models.update",
    skip(model, json, depot),
    fields(model_uuid = tracing::field::Empty, base_price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    model: PathParam<Uuid>,
    json: JsonBody<UpdateDeviceModelRequest>,
    depot: &mut Depot,
) -> Result<Json<DeviceModelResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let model = model.into_inner();

    let span = tracing::Span::current();

    span.record("model_uuid", tracing::field::display(model));
    span.record("base_price", request.base_price);

    let updated = state
        .app
        .catalog
        .update_model(model.into(), request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(model_uuid = %model, "updated device model");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tradein_app::domain::catalog::{CatalogServiceError, models::DeviceModelUuid};

    use crate::{
        catalog::models::fixtures::make_model,
        test_helpers::{TestServices, admin_service, catalog_mock},
    };

    use super::*;

    fn make_service(services: TestServices) -> Service {
        admin_service(
            services,
            Router::with_path("admin/catalog/models/{model}").put(handler),
        )
    }

    fn request_body() -> serde_json::Value {
        json!({
            "name": "iPhone 13",
            "brand": "Apple",
            "category": "phone",
            "base_price": 35000,
            "has_carrier_variants": false,
            "has_storage_variants": true,
            "is_active": false,
        })
    }

    #[tokio::test]
    async fn test_update_model_success() -> TestResult {
        let uuid = DeviceModelUuid::new();

        let services = TestServices {
            catalog: catalog_mock(|catalog| {
                catalog
                    .expect_update_model()
                    .once()
                    .withf(move |model, update| {
                        *model == uuid && update.base_price == 350_00 && !update.is_active
                    })
                    .return_once(move |_, update| {
                        let mut model = make_model(uuid);
                        model.base_price = update.base_price;
                        model.is_active = update.is_active;

                        Ok(model)
                    });
            }),
            ..TestServices::default()
        };

        let mut res = TestClient::put(format!("http://example.com/admin/catalog/models/{uuid}"))
            .json(&request_body())
            .send(&make_service(services))
            .await;

        let body: DeviceModelResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.base_price, 350_00);
        assert!(!body.is_active, "model should be deactivated");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_model_returns_404() -> TestResult {
        let uuid = DeviceModelUuid::new();

        let services = TestServices {
            catalog: catalog_mock(|catalog| {
                catalog
                    .expect_update_model()
                    .once()
                    .return_once(|_, _| Err(CatalogServiceError::NotFound));
            }),
            ..TestServices::default()
        };

        let res = TestClient::put(format!("http://example.com/admin/catalog/models/{uuid}"))
            .json(&request_body())
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
