// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};

use super::roles::Role;

/// Claims of a token issued by this server.
///
/// Field order is the serialized order in the payload segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role name, `USER` or `ADMIN`
    pub auth: String,
    /// Issued at, seconds since epoch
    pub iat: i64,
    /// Expiration, seconds since epoch
    pub exp: i64,
}

/// Claims as they arrive over the wire, before checking required members.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub auth: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl RawClaims {
    /// Returns `None` when any required member is absent or `sub` is empty.
    pub(crate) fn into_claims(self) -> Option<Claims> {
        let sub = self.sub.filter(|sub| !sub.is_empty())?;
        Some(Claims {
            sub,
            auth: self.auth?,
            iat: self.iat?,
            exp: self.exp?,
        })
    }
}

/// Authenticated user information extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Username (`sub` claim)
    pub username: String,
    /// Role (`auth` claim)
    pub role: Role,
}
