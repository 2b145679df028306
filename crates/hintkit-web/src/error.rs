//! HTTP error responses.
//!
//! Every failure leaves the server as `{"error": <fixed message>}`. Causes are
//! logged where they happen and never serialized.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hintkit::HintResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid request body")]
    BadRequest,
    /// Completion failed; carries the exercise's user-facing message.
    #[error("{0}")]
    Service(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(HintResponse::failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Service("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn service_message_is_passed_through() {
        assert_eq!(ApiError::Service("שגיאה".into()).to_string(), "שגיאה");
        assert_eq!(ApiError::MethodNotAllowed.to_string(), "Method not allowed");
    }
}
