// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token issuance and verification.
//!
//! Tokens are compact JWS strings carried with a `Bearer ` prefix:
//!
//! ```text
//! Bearer base64url(header).base64url(payload).base64url(hmac_sha256)
//! ```
//!
//! The payload always holds `sub`, `auth`, `iat` and `exp`, with `exp` one
//! hour after `iat`. Verification is a pure function of the token, the key
//! and the injected [`Clock`], so a [`TokenCodec`] can be shared by every
//! request without locking.

use std::sync::Arc;

use axum::http::HeaderMap;
use base64ct::{Base64UrlUnpadded, Encoding};
use jsonwebtoken::{errors::ErrorKind, Algorithm, Header, Validation};
use serde::Deserialize;
use tracing::error;

use super::claims::{AuthenticatedUser, Claims, RawClaims};
use super::clock::{Clock, SystemClock};
use super::cookie::{self, AUTHORIZATION_COOKIE};
use super::error::{AuthError, VerifyError};
use super::key::KeyMaterial;
use super::roles::Role;

/// Prefix of the token wire form.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Token lifetime (60 minutes).
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Failure to issue a token.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error("token subject must not be empty")]
    EmptySubject,

    #[error("failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Only the members needed to reject foreign headers before verifying.
#[derive(Deserialize)]
struct RawHeader {
    #[serde(default)]
    alg: Option<String>,
    #[serde(default)]
    typ: Option<String>,
}

/// Issues and verifies tokens with a single HS256 key.
pub struct TokenCodec {
    key: KeyMaterial,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec that reads wall-clock time.
    pub fn new(key: KeyMaterial) -> Self {
        Self::with_clock(key, Arc::new(SystemClock))
    }

    pub fn with_clock(key: KeyMaterial, clock: Arc<dyn Clock>) -> Self {
        // Expiry is checked against the injected clock, not by jsonwebtoken.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key,
            clock,
            validation,
        }
    }

    /// Issue a prefixed token for `subject` with `role`, valid for one hour.
    pub fn mint(&self, subject: &str, role: Role) -> Result<String, MintError> {
        if subject.is_empty() {
            return Err(MintError::EmptySubject);
        }

        let iat = self.clock.now_seconds();
        let claims = Claims {
            sub: subject.to_string(),
            auth: role.to_string(),
            iat,
            exp: iat + TOKEN_TTL_SECONDS,
        };

        // Header serializes as {"typ":"JWT","alg":"HS256"}; member order is not
        // part of the signed contract.
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            self.key.encoding_key(),
        )?;

        Ok(format!("{BEARER_PREFIX}{token}"))
    }

    /// Remove the `Bearer ` prefix.
    ///
    /// Blank input or input without the prefix is a [`AuthError::MissingToken`].
    /// An already stripped token is therefore rejected rather than passed through.
    pub fn strip_prefix(raw: &str) -> Result<&str, AuthError> {
        if raw.trim().is_empty() {
            error!("Not Found Token");
            return Err(AuthError::MissingToken);
        }

        raw.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
            error!("Not Found Token");
            AuthError::MissingToken
        })
    }

    /// Verify signature and expiry of a compact token and return its claims.
    ///
    /// Never panics; every failure maps to a [`VerifyError`] and is logged once.
    pub fn verify(&self, compact: &str) -> Result<Claims, VerifyError> {
        self.decode(compact).inspect_err(|e| {
            error!(kind = e.kind(), "{e}");
        })
    }

    fn decode(&self, compact: &str) -> Result<Claims, VerifyError> {
        check_header(compact)?;

        let data = jsonwebtoken::decode::<RawClaims>(
            compact,
            self.key.decoding_key(),
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => VerifyError::BadSignature,
            ErrorKind::InvalidAlgorithm => VerifyError::Unsupported,
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            _ => VerifyError::Malformed,
        })?;

        let claims = data
            .claims
            .into_claims()
            .ok_or(VerifyError::EmptyClaims)?;

        if claims.exp <= self.clock.now_seconds() {
            return Err(VerifyError::Expired);
        }

        Ok(claims)
    }

    /// Read subject and role from verified claims.
    pub fn extract(&self, claims: &Claims) -> Result<AuthenticatedUser, VerifyError> {
        let role = claims.auth.parse::<Role>().map_err(|_| {
            error!(kind = VerifyError::Malformed.kind(), "Unknown role claim");
            VerifyError::Malformed
        })?;

        Ok(AuthenticatedUser {
            username: claims.sub.clone(),
            role,
        })
    }

    /// Resolve the caller from the `Authorization` cookie.
    ///
    /// No cookie or no prefix is [`AuthError::MissingToken`]; a token that
    /// fails verification is [`AuthError::Rejected`].
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthenticatedUser, AuthError> {
        let Some(raw) = cookie::read(headers, AUTHORIZATION_COOKIE) else {
            error!("Not Found Token");
            return Err(AuthError::MissingToken);
        };

        let token = Self::strip_prefix(&raw)?;
        let claims = self.verify(token)?;
        Ok(self.extract(&claims)?)
    }
}

/// Reject anything that is not a three-segment HS256 JWT before verifying.
fn check_header(compact: &str) -> Result<(), VerifyError> {
    let mut segments = compact.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(VerifyError::Malformed);
    };

    let bytes = Base64UrlUnpadded::decode_vec(header).map_err(|_| VerifyError::Malformed)?;
    let header: RawHeader = serde_json::from_slice(&bytes).map_err(|_| VerifyError::Malformed)?;

    if header.alg.as_deref() != Some("HS256") {
        return Err(VerifyError::Unsupported);
    }

    match header.typ.as_deref() {
        None | Some("JWT") => Ok(()),
        Some(_) => Err(VerifyError::Unsupported),
    }
}
