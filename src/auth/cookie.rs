// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cookie transport for tokens and other values.
//!
//! Values are percent-encoded before they are placed in a cookie, since a
//! cookie value may not contain a space (the `Bearer ` prefix has one).
//! Spaces are written as `%20`; on the way back both `%20` and `+` decode to a
//! space so cookies issued with form-style encoding still read correctly.

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use percent_encoding::percent_decode_str;
use tracing::error;

/// Cookie carrying the prefixed token.
pub const AUTHORIZATION_COOKIE: &str = "Authorization";

/// Attributes of a cookie written by this server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: &'static str,
    /// `None` makes it a session cookie
    pub max_age_seconds: Option<i64>,
    pub http_only: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/",
            max_age_seconds: None,
            http_only: false,
        }
    }
}

/// Percent-encode a value for use in a cookie.
pub fn encode_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Reverse [`encode_value`]. Returns `None` if the bytes are not UTF-8.
pub fn decode_value(raw: &str) -> Option<String> {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8()
        .ok()
        .map(|value| value.into_owned())
}

/// Append a `Set-Cookie` header with the encoded `value`.
pub fn set_cookie(headers: &mut HeaderMap, name: &str, value: &str, options: &CookieOptions) {
    let mut cookie = format!("{name}={}; Path={}", encode_value(value), options.path);
    if let Some(max_age) = options.max_age_seconds {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    if options.http_only {
        cookie.push_str("; HttpOnly");
    }

    match HeaderValue::from_str(&cookie) {
        Ok(header) => {
            headers.append(SET_COOKIE, header);
        }
        Err(e) => error!(cookie = name, error = %e, "Failed to build Set-Cookie header"),
    }
}

/// Store a prefixed token in the `Authorization` cookie.
///
/// Path `/`, no expiry: the token's own `exp` bounds its lifetime.
pub fn write_token(token: &str, headers: &mut HeaderMap) {
    set_cookie(headers, AUTHORIZATION_COOKIE, token, &CookieOptions::default());
}

/// Find the first cookie called `name` and return its decoded value.
///
/// Missing cookies and values that fail to decode both yield `None`.
pub fn read(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| decode_value(value.trim_matches('"')))
}
