use serde::{Deserialize, Serialize};
use validator::Validate;

pub const FALLBACK_CAPTION: &str = "No caption generated";

#[derive(Debug, Deserialize, Validate)]
pub struct CaptionRequest {
    #[validate(length(min = 1, message = "image_base64 is required"))]
    pub image_base64: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CaptionResponse {
    pub caption: String,
}

impl CaptionResponse {
    /// Substitutes the fallback text for an empty caption.
    pub fn from_caption(caption: String) -> Self {
        if caption.is_empty() {
            Self { caption: FALLBACK_CAPTION.to_string() }
        } else {
            Self { caption }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
