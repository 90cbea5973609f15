//! Shared HTTP response helpers for the work-item endpoints.
//!
//! Centralizes status-code checks (401/403 → [`TargetError::Auth`],
//! other non-success → the caller's error variant with status and body) so
//! the query and write paths stay focused on request construction and
//! response mapping.

use pab_core::TargetError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. `on_failure` builds the error
/// for any non-success status other than 401/403, from the status code and
/// the response body.
pub async fn check_response(
    resp: reqwest::Response,
    on_failure: fn(u16, String) -> TargetError,
) -> Result<reqwest::Response, TargetError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(TargetError::Auth {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        return Err(on_failure(
            status.as_u16(),
            resp.text().await.unwrap_or_default(),
        ));
    }
    Ok(resp)
}

/// Read a success body as text.
pub async fn read_body(resp: reqwest::Response) -> Result<String, TargetError> {
    resp.text().await.map_err(transport)
}

/// Map a connection-level `reqwest` failure.
pub fn transport(err: reqwest::Error) -> TargetError {
    TargetError::Transport(err.to_string())
}

pub const fn write_failed(status: u16, body: String) -> TargetError {
    TargetError::WriteFailed { status, body }
}

pub const fn query_failed(status: u16, body: String) -> TargetError {
    TargetError::QueryFailed { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp, write_failed).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_unauthorized_is_auth() {
        let err = check_response(mock_response(401, ""), write_failed)
            .await
            .unwrap_err();
        assert!(matches!(err, TargetError::Auth { status: 401 }));
    }

    #[tokio::test]
    async fn check_response_forbidden_is_auth() {
        let err = check_response(mock_response(403, ""), query_failed)
            .await
            .unwrap_err();
        assert!(matches!(err, TargetError::Auth { status: 403 }));
    }

    #[tokio::test]
    async fn check_response_write_error_keeps_body() {
        let resp = mock_response(400, "TF401320: Rule Error for field Title");
        let err = check_response(resp, write_failed).await.unwrap_err();
        match err {
            TargetError::WriteFailed { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "TF401320: Rule Error for field Title");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_query_error() {
        let err = check_response(mock_response(500, "boom"), query_failed)
            .await
            .unwrap_err();
        assert!(matches!(err, TargetError::QueryFailed { status: 500, .. }));
    }
}
