//! HTTP API.
//!
//! - `POST /push` ingests one usage report
//! - `GET /test` liveness check

pub mod handlers;

use axum::routing::{get, post};
use axum::Router;

use crate::storage::recorder::Recorder;

pub fn router(recorder: Recorder) -> Router {
    Router::new()
        .route("/push", post(handlers::handle_push))
        .route("/test", get(handlers::handle_test))
        .with_state(recorder)
}
