// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request logging middleware.
//!
//! Logs every request on the way in and once the handler has answered.
//! Runs inside the request-id layers, so both records carry `x-request-id`.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// Header set by `tower_http::request_id::SetRequestIdLayer`.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    info!(request_id = %request_id, method = %method, path = %path, "Request received");

    let response = next.run(request).await;

    info!(
        request_id = %request_id,
        status = response.status().as_u16(),
        "Request complete"
    );
    response
}
