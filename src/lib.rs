use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::RelayConfig;
use crate::services::captioner::{CaptionError, Captioner, HttpCaptioner};

pub mod config;
pub mod middleware;
pub mod modules;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub captioner: Arc<dyn Captioner>,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    pub fn new(config: RelayConfig, captioner: Arc<dyn Captioner>) -> Self {
        Self {
            captioner,
            config: Arc::new(config),
        }
    }

    /// State backed by the HTTP collaborator named in `config`.
    pub fn from_config(config: RelayConfig) -> Result<Self, CaptionError> {
        let captioner = HttpCaptioner::new(&config.caption_service_url, config.request_timeout)?;
        Ok(Self::new(config, Arc::new(captioner)))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(modules::health::routes::routes())
        .merge(modules::caption::routes::routes())
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::cors::cors,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
