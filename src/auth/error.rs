// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Why a presented token failed verification.
///
/// The display strings are the fixed messages written to the log. They never
/// contain token material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// MAC mismatch or tampered header/payload
    #[error("Invalid JWT signature")]
    BadSignature,
    /// Not three base64url segments, or not JSON
    #[error("Malformed JWT token")]
    Malformed,
    /// `exp` is at or before the current time
    #[error("Expired JWT token")]
    Expired,
    /// Algorithm other than HS256, or unknown token type
    #[error("Unsupported JWT token")]
    Unsupported,
    /// Payload decoded but lacks the required members
    #[error("JWT claims is empty")]
    EmptyClaims,
}

impl VerifyError {
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::BadSignature => "bad_signature",
            VerifyError::Malformed => "malformed",
            VerifyError::Expired => "expired",
            VerifyError::Unsupported => "unsupported",
            VerifyError::EmptyClaims => "empty_claims",
        }
    }
}

/// Per-request authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No cookie, a blank value, or no `Bearer ` prefix
    #[error("Not Found Token")]
    MissingToken,
    /// A token was present but did not verify
    #[error(transparent)]
    Rejected(#[from] VerifyError),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
    error_code: &'static str,
}

impl AuthError {
    /// Every authentication failure is a 401.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for AuthError {
    /// The body is identical for every variant so a client cannot tell an
    /// expired token from a forged one.
    fn into_response(self) -> Response {
        let body = Json(AuthErrorBody {
            error: "Authentication required",
            error_code: "unauthorized",
        });
        (self.status_code(), body).into_response()
    }
}
