use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::time::Duration;
use validator::Validate;

use crate::modules::caption::{
    error::RelayError,
    schema::{CaptionRequest, CaptionResponse},
};
use crate::services::captioner::{CaptionError, Captioner};
use crate::AppState;

pub async fn process(
    State(state): State<AppState>,
    payload: Result<Json<CaptionRequest>, JsonRejection>,
) -> Result<Json<CaptionResponse>, RelayError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!(error = %e.body_text(), "Invalid request");
        RelayError::InvalidFormat
    })?;

    let response = relay_caption(
        state.captioner.as_ref(),
        state.config.request_timeout,
        request,
    )
    .await?;

    Ok(Json(response))
}

/// Validates one request and makes exactly one bounded call to the captioner.
pub async fn relay_caption(
    captioner: &dyn Captioner,
    timeout: Duration,
    request: CaptionRequest,
) -> Result<CaptionResponse, RelayError> {
    if request.validate().is_err() {
        tracing::warn!("Rejected request with empty image_base64");
        return Err(RelayError::MissingImage);
    }

    tracing::info!(size = request.image_base64.len(), "Processing image request");

    let caption = tokio::time::timeout(timeout, captioner.caption(&request.image_base64))
        .await
        .unwrap_or_else(|_| Err(CaptionError::Timeout(timeout)))
        .map_err(|e| {
            tracing::error!(error = %e, unavailable = e.is_unavailable(), "Caption service error");
            RelayError::from(e)
        })?;

    let response = CaptionResponse::from_caption(caption);
    tracing::info!(caption = %response.caption, "Successfully generated caption");

    Ok(response)
}
