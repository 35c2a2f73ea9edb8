use axum::{routing::post, Router};

use crate::modules::caption::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/process", post(controller::process))
}
