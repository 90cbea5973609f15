//! Shared HTTP response helpers for the `ProjectServer` endpoints.

use pab_core::SourceError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **401 / 403** → [`SourceError::Auth`]
/// - **Non-success status** → [`SourceError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(SourceError::Auth {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        return Err(SourceError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Read the body of a single-entity GET. A 404 means the entity does not
/// exist and yields `None`.
pub async fn read_entity(resp: reqwest::Response) -> Result<Option<String>, SourceError> {
    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    read_body(resp).await.map(Some)
}

/// Read the body of a collection GET. Every non-success status, 404 included,
/// is an error.
pub async fn read_body(resp: reqwest::Response) -> Result<String, SourceError> {
    check_response(resp).await?.text().await.map_err(transport)
}

/// Map a connection-level `reqwest` failure.
pub fn transport(err: reqwest::Error) -> SourceError {
    SourceError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16) -> reqwest::Response {
        with_body(status, "")
    }

    fn with_body(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_auth() {
        let err = check_response(mock_response(401)).await.unwrap_err();
        assert!(matches!(err, SourceError::Auth { status: 401 }));
    }

    #[tokio::test]
    async fn check_response_api_error() {
        let err = check_response(mock_response(500)).await.unwrap_err();
        assert!(matches!(err, SourceError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200)).await.is_ok());
    }

    #[tokio::test]
    async fn missing_entity_is_none() {
        assert_eq!(read_entity(mock_response(404)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn entity_body_is_returned() {
        let body = read_entity(with_body(200, r#"{"Id":"6f1c"}"#)).await.unwrap();
        assert_eq!(body.as_deref(), Some(r#"{"Id":"6f1c"}"#));
    }

    #[tokio::test]
    async fn entity_server_error_is_not_swallowed() {
        let err = read_entity(mock_response(503)).await.unwrap_err();
        assert!(matches!(err, SourceError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn missing_collection_is_an_api_error() {
        let err = read_body(with_body(404, "Not Found")).await.unwrap_err();
        assert!(matches!(err, SourceError::Api { status: 404, ref message } if message == "Not Found"));
    }
}
