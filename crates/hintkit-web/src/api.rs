//! Hint endpoint handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use hintkit::{HintRequest, HintResponse, Tutor};
use tracing::warn;

use crate::error::ApiError;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub tutor: Arc<Tutor>,
}

/// POST: produce a hint.
///
/// Returns `200 {hint}` for a generated or terminal hint, `500 {error}` when
/// the completion service fails, and `400 {error}` when the body does not
/// decode into a hint request.
pub async fn post_hint(
    State(app): State<AppState>,
    payload: Result<Json<HintRequest>, JsonRejection>,
) -> Result<Json<HintResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected hint request body");
        ApiError::BadRequest
    })?;

    match app.tutor.produce_hint(&request).await {
        HintResponse::Failure { error } => Err(ApiError::Service(error)),
        hint => Ok(Json(hint)),
    }
}

/// OPTIONS without CORS preflight headers. Preflights proper are answered by
/// the CORS layer before reaching this handler.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
