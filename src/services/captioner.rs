use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("caption service timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("caption service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CaptionError {
    /// True when the collaborator could not be reached in time, as opposed
    /// to answering with something we cannot use.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CaptionError::Timeout(_) | CaptionError::Transport(_))
    }
}

/// The one thing the relay needs from the captioning collaborator.
#[async_trait]
pub trait Captioner: Send + Sync {
    async fn caption(&self, image_base64: &str) -> Result<String, CaptionError>;
}

#[derive(Debug, Serialize)]
struct CaptionPayload<'a> {
    image_base64: &'a str,
}

#[derive(Debug, Deserialize)]
struct CaptionReply {
    #[serde(default)]
    caption: String,
}

#[derive(Clone)]
pub struct HttpCaptioner {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpCaptioner {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CaptionError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }
}

#[async_trait]
impl Captioner for HttpCaptioner {
    async fn caption(&self, image_base64: &str) -> Result<String, CaptionError> {
        let response = self
            .client
            .post(&self.url)
            .json(&CaptionPayload { image_base64 })
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(CaptionError::Status { status, body });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let reply: CaptionReply = serde_json::from_slice(&body)
            .map_err(|e| CaptionError::InvalidResponse(e.to_string()))?;

        Ok(reply.caption)
    }
}

impl HttpCaptioner {
    fn classify(&self, err: reqwest::Error) -> CaptionError {
        if err.is_timeout() {
            CaptionError::Timeout(self.timeout)
        } else {
            CaptionError::Transport(err)
        }
    }
}
