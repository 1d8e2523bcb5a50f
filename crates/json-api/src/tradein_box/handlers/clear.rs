//! Clear Box Handler

use std::sync::Arc;

use salvo::prelude::*;

use tradein::tradein_box::TradeInBox;

use crate::{extensions::*, state::State, tradein_box::errors::into_status_error};

/// Clear Box Handler
#[endpoint(
    tags("box"),
    summary = "Clear Trade-in Box",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Box emptied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing session"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_400()?;

    TradeInBox::new(state.boxes.session(session))
        .clear()
        .map_err(into_status_error)?;

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

    #[tokio::test]
    async fn test_clear_empties_box() -> TestResult {
        let boxes = SessionStore::new();

        TradeInBox::new(boxes.session(TEST_SESSION)).add_item(make_box_item(50_00))?;

        let res = TestClient::delete("http://example.com/box")
            .add_header(SESSION_HEADER, TEST_SESSION.to_string(), true)
            .send(&box_service(
                TestServices::default(),
                boxes.clone(),
                Router::with_path("box").delete(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));
        assert_eq!(TradeInBox::new(boxes.session(TEST_SESSION)).item_count()?, 0);
        assert_eq!(boxes.active_sessions()?, 0);

        Ok(())
    }
}
