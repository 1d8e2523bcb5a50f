//! Session middleware.

use salvo::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::extensions::*;

/// Header carrying the browsing session id.
pub(crate) const SESSION_HEADER: &str = "x-session-id";

/// Resolve the `X-Session-Id` header to a session or answer `400`.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(session) = extract_session(req) else {
        warn!("request without a usable session id");

        res.render(StatusError::bad_request().brief("Missing or invalid X-Session-Id header"));
        ctrl.skip_rest();

        return;
    };

    depot.insert_session(session);

    ctrl.call_next(req, depot, res).await;
}

fn extract_session(req: &Request) -> Option<Uuid> {
    let value = req.headers().get(SESSION_HEADER)?.to_str().ok()?;

    Uuid::try_parse(value.trim()).ok()
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::TEST_SESSION;

    use super::*;

    #[salvo::handler]
    async fn echo_session(depot: &mut Depot, res: &mut Response) {
        let session = depot
            .session_or_400()
            .map_or_else(|_missing| "missing".to_string(), |session| session.to_string());

        res.render(session);
    }

    fn make_service() -> Service {
        Service::new(Router::new().hoop(handler).get(echo_session))
    }

    #[tokio::test]
    async fn test_session_header_reaches_handler() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header(SESSION_HEADER, TEST_SESSION.to_string(), true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, TEST_SESSION.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_header_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_header_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(SESSION_HEADER, "not-a-session", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
