// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT demo endpoints.

use axum::{extract::State, http::HeaderMap};

use crate::{
    auth::{cookie, AuthError, Role},
    error::ApiError,
    state::AppState,
};

const DEMO_SUBJECT: &str = "Robbie";

/// Issue a token for the demo user and store it in the `Authorization` cookie.
#[utoipa::path(
    get,
    path = "/api/create-jwt",
    tag = "JWT",
    responses((status = 200, description = "Token issued", body = String))
)]
pub async fn create_jwt(State(state): State<AppState>) -> Result<(HeaderMap, String), ApiError> {
    let token = state
        .tokens
        .mint(DEMO_SUBJECT, Role::User)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    let mut headers = HeaderMap::new();
    cookie::write_token(&token, &mut headers);

    Ok((headers, format!("createJwt : {token}")))
}

/// Verify the token in the `Authorization` cookie and echo its identity.
#[utoipa::path(
    get,
    path = "/api/get-jwt",
    tag = "JWT",
    responses(
        (status = 200, description = "Subject and role", body = String),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn get_jwt(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<String, AuthError> {
    let user = state.tokens.authenticate(&headers)?;
    tracing::info!(username = %user.username, role = %user.role, "Token verified");
    Ok(format!("getJwt : {}, {}", user.username, user.role))
}
