//! Classification of failed pyLoad API calls.

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// A pyLoad API call that failed in a way worth explaining to the user.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Login rejected or session no longer valid (pyLoad answers 401/403)
    #[error("Authentication failed: {0}. Check the pyLoad username and password.")]
    AuthenticationFailed(String),
    /// Unknown API method or wrong base URL (HTTP 404)
    #[error("Not found: {0}. Is the pyLoad URL correct?")]
    NotFound(String),
    /// Other client errors (bad arguments, unknown package id, ...)
    #[error("Request error: {0}")]
    ClientError(String),
    /// pyLoad itself failed
    #[error("pyLoad server error: {0}")]
    ServerError(String),
}

/// Maps an unsuccessful HTTP status of `method` to an [`ApiError`].
pub fn classify_status(status: StatusCode, method: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ApiError::AuthenticationFailed(format!("{} returned HTTP {}", method, status.as_u16()))
        }
        StatusCode::NOT_FOUND => ApiError::NotFound(format!("API method {}", method)),
        s if s.is_server_error() => {
            ApiError::ServerError(format!("{} returned HTTP {}", method, s.as_u16()))
        }
        s => ApiError::ClientError(format!("{} returned HTTP {}", method, s.as_u16())),
    }
}

/// Passes successful responses through, classifies everything else.
pub fn check_status(response: Response, method: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(classify_status(status, method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::AuthenticationFailed("login".to_string());
        assert!(err.to_string().contains("Authentication failed"));
        assert!(err.to_string().contains("username and password"));

        let err = ApiError::NotFound("API method getCollectorData".to_string());
        assert!(err.to_string().contains("getCollectorData"));

        let err = ApiError::ServerError("HTTP 500".to_string());
        assert!(err.to_string().contains("server error"));
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "login"),
            ApiError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "addFiles"),
            ApiError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "addFiles"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "addFiles"),
            ApiError::ClientError(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "addFiles"),
            ApiError::ServerError(_)
        ));
    }

    #[tokio::test]
    async fn test_check_status_passes_success() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(200)
            .create_async()
            .await;

        let response = reqwest::get(server.url()).await.unwrap();
        assert!(check_status(response, "test").is_ok());
    }

    #[tokio::test]
    async fn test_check_status_classifies_failure() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(500)
            .create_async()
            .await;

        let response = reqwest::get(server.url()).await.unwrap();
        let err = check_status(response, "getQueueData").unwrap_err();
        assert!(matches!(err, ApiError::ServerError(_)));
    }
}
