//! Remove Box Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use tradein::tradein_box::TradeInBox;

use crate::{extensions::*, state::State, tradein_box::errors::into_status_error};

/// Remove Box Item Handler
///
/// Removing an item that is not in the box is not an error.
#[endpoint(
    tags("box"),
    summary = "Remove Box Item",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Item removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing session"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_400()?;
    let item = item.into_inner();

    let removed = TradeInBox::new(state.boxes.session(session))
        .remove_item(item)
        .map_err(into_status_error)?;

    if removed.is_none() {
        tracing::debug!(item_id = %item, "box item already absent");
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use tradein::tradein_box::SessionStore;

    use crate::{
        test_helpers::{TEST_SESSION, TestServices, box_service},
        tradein_box::{models::fixtures::make_box_item, session::SESSION_HEADER},
    };

    use super::*;

    fn make_service(boxes: SessionStore) -> Service {
        box_service(
            TestServices::default(),
            boxes,
            Router::with_path("box/items/{item}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_removes_only_that_item() -> TestResult {
        let boxes = SessionStore::new();
        let mut tradein_box = TradeInBox::new(boxes.session(TEST_SESSION));
        let kept = tradein_box.add_item(make_box_item(10_00))?;
        let removed = tradein_box.add_item(make_box_item(20_00))?;

        let res = TestClient::delete(format!("http://example.com/box/items/{removed}"))
            .add_header(SESSION_HEADER, TEST_SESSION.to_string(), true)
            .send(&make_service(boxes))
            .await;

        let remaining = tradein_box.items()?;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.first().map(|item| item.id), Some(kept));

        Ok(())
    }

    #[tokio::test]
    async fn test_absent_item_is_no_content() -> TestResult {
        let res = TestClient::delete(format!("http://example.com/box/items/{}", Uuid::now_v7()))
            .add_header(SESSION_HEADER, TEST_SESSION.to_string(), true)
            .send(&make_service(SessionStore::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
