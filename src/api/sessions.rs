// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Server-side session demo endpoints.

use axum::{extract::State, http::HeaderMap};

use crate::{
    auth::cookie::{self, CookieOptions, AUTHORIZATION_COOKIE},
    error::ApiError,
    session::SESSION_COOKIE,
    state::AppState,
};

const DEMO_SESSION_VALUE: &str = "Robbie Auth";

/// Get or create the caller's session and store a value in it.
#[utoipa::path(
    get,
    path = "/api/create-session",
    tag = "Sessions",
    responses((status = 200, description = "Session attribute stored", body = String))
)]
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, &'static str), ApiError> {
    let presented = cookie::read(&headers, SESSION_COOKIE);
    let (session_id, _) = state.sessions.get_or_create(presented.as_deref()).await;

    if !state
        .sessions
        .set_attribute(session_id, AUTHORIZATION_COOKIE, DEMO_SESSION_VALUE)
        .await
    {
        return Err(ApiError::internal("Session vanished before it could be used"));
    }

    let mut response_headers = HeaderMap::new();
    cookie::set_cookie(
        &mut response_headers,
        SESSION_COOKIE,
        &session_id.to_string(),
        &CookieOptions {
            http_only: true,
            ..CookieOptions::default()
        },
    );
    Ok((response_headers, "createSession"))
}

/// Read the value stored by `create-session`. Never creates a session.
#[utoipa::path(
    get,
    path = "/api/get-session",
    tag = "Sessions",
    responses(
        (status = 200, description = "Session attribute", body = String),
        (status = 404, description = "No live session")
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<String, ApiError> {
    let session_id = cookie::read(&headers, SESSION_COOKIE)
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    let value = state
        .sessions
        .get_attribute(&session_id, AUTHORIZATION_COOKIE)
        .await
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    let value = value.unwrap_or_else(|| "null".to_string());
    tracing::info!(value = %value, "Session attribute read");
    Ok(format!("getSession : {value}"))
}
