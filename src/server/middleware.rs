// HTTP middleware

use crate::server::ServerState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request tracing middleware: assigns a request id, logs both ends of the
/// request and feeds the request metrics.
pub async fn trace_request_mw(
    State(state): State<ServerState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();

    state.metrics.inc_requests_total();
    state.metrics.inc_requests_in_flight();
    tracing::debug!(request_id = %request_id, "→ {} {}", method, uri);

    let mut response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();
    state.metrics.dec_requests_in_flight();
    state
        .metrics
        .record_request_duration(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));

    tracing::debug!(
        request_id = %request_id,
        "← {} {} {} ({:?})",
        method,
        uri,
        status.as_u16(),
        duration
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
