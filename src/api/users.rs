// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

use crate::{
    auth::cookie,
    error::ApiError,
    models::{IdentityResponse, LoginRequest, SignupRequest, UserResponse},
    state::AppState,
    users::SignupError,
};

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::MissingField(_) => ApiError::bad_request(err.to_string()),
            SignupError::DuplicateUsername | SignupError::DuplicateEmail => {
                ApiError::conflict(err.to_string())
            }
            SignupError::InvalidAdminToken => ApiError::forbidden(err.to_string()),
            SignupError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            SignupError::Password(_) | SignupError::Join(_) => {
                tracing::error!(error = %err, "Registration failed");
                ApiError::internal("Internal error")
            }
        }
    }
}

/// Register a new user.
///
/// Passwords are stored as Argon2id hashes. Setting `admin` requires the
/// server's admin token.
#[utoipa::path(
    post,
    path = "/api/user/signup",
    request_body = SignupRequest,
    tag = "Users",
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Blank field"),
        (status = 403, description = "Wrong admin token"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.users.signup(request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Check credentials and issue a token cookie for the user's role.
#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = LoginRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Logged in; `Authorization` cookie set", body = IdentityResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<IdentityResponse>), ApiError> {
    let user = state.users.login(&request.username, &request.password).await?;

    let token = state
        .tokens
        .mint(&user.username, user.role)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    let mut headers = HeaderMap::new();
    cookie::write_token(&token, &mut headers);

    Ok((
        headers,
        Json(IdentityResponse {
            username: user.username,
            role: user.role,
        }),
    ))
}
