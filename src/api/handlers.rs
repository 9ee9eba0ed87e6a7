//! Request handlers.

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::header::AsHeaderName;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::pipeline::context::RequestContext;
use crate::pipeline::ingestion::ingest;
use crate::storage::recorder::Recorder;

/// Body returned for any failed report. Details stay in the server log.
pub const ERROR_BODY: &str = r#"{"error_message": "unable to process request"}"#;

pub(crate) async fn handle_test() -> &'static str {
    "ok"
}

pub(crate) async fn handle_push(
    State(recorder): State<Recorder>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = RequestContext::new(
        &remote.to_string(),
        header_str(&headers, "x-forwarded-for"),
        header_str(&headers, header::USER_AGENT),
    );

    match ingest(&recorder, &ctx, &body).await {
        Ok(()) => json_response(StatusCode::OK, "{}"),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            json_response(status, ERROR_BODY)
        }
    }
}

fn header_str<K: AsHeaderName>(headers: &HeaderMap, name: K) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn json_response(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
