// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Opaque cookie demo endpoints.

use axum::http::HeaderMap;

use crate::{
    auth::cookie::{self, CookieOptions, AUTHORIZATION_COOKIE},
    error::ApiError,
};

/// Lifetime of the demo cookie (30 minutes).
const DEMO_COOKIE_MAX_AGE: i64 = 30 * 60;

const DEMO_COOKIE_VALUE: &str = "Robbie Auth";

/// Store a plain value in the `Authorization` cookie.
#[utoipa::path(
    get,
    path = "/api/create-cookie",
    tag = "Cookies",
    responses((status = 200, description = "Cookie set", body = String))
)]
pub async fn create_cookie() -> (HeaderMap, &'static str) {
    let mut headers = HeaderMap::new();
    cookie::set_cookie(
        &mut headers,
        AUTHORIZATION_COOKIE,
        DEMO_COOKIE_VALUE,
        &CookieOptions {
            max_age_seconds: Some(DEMO_COOKIE_MAX_AGE),
            ..CookieOptions::default()
        },
    );
    (headers, "createCookie")
}

/// Echo the decoded `Authorization` cookie.
#[utoipa::path(
    get,
    path = "/api/get-cookie",
    tag = "Cookies",
    responses(
        (status = 200, description = "Cookie value", body = String),
        (status = 400, description = "Cookie missing")
    )
)]
pub async fn get_cookie(headers: HeaderMap) -> Result<String, ApiError> {
    let value = cookie::read(&headers, AUTHORIZATION_COOKIE).ok_or_else(|| {
        ApiError::bad_request("Required cookie 'Authorization' is not present")
    })?;
    tracing::info!(value = %value, "Cookie read");
    Ok(format!("getCookie : {value}"))
}
