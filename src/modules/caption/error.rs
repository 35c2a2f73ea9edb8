use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::caption::schema::ErrorResponse;
use crate::services::captioner::CaptionError;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid request format")]
    InvalidFormat,
    #[error("image_base64 is required")]
    MissingImage,
    #[error("Failed to generate caption")]
    Caption(#[from] CaptionError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidFormat | RelayError::MissingImage => StatusCode::BAD_REQUEST,
            RelayError::Caption(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        // Display never includes the downstream detail, only the variant's message.
        let body = Json(ErrorResponse { error: self.to_string() });
        (self.status(), body).into_response()
    }
}
