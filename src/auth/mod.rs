// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Signed bearer tokens (HS256 JWT) carried in an `Authorization` cookie.
//!
//! ## Issuance
//!
//! 1. `TokenCodec::mint(username, role)` signs `{sub, auth, iat, exp}` with
//!    the configured key and returns `Bearer <jwt>`
//! 2. `cookie::write_token` percent-encodes it into the `Authorization` cookie
//!
//! ## Verification
//!
//! 1. `cookie::read` recovers the prefixed token from the request
//! 2. `TokenCodec::strip_prefix` removes `Bearer `
//! 3. `TokenCodec::verify` checks the MAC, then `exp` against the clock
//! 4. `TokenCodec::extract` yields the username and `Role`
//!
//! ## Security
//!
//! - HS256 only; any other `alg` is rejected before verification
//! - No clock skew leeway: a token is dead at `exp`
//! - Failures are logged by kind but every one answers the same 401

pub mod claims;
pub mod clock;
pub mod cookie;
pub mod error;
pub mod key;
pub mod password;
pub mod roles;
pub mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AuthError, VerifyError};
pub use key::KeyMaterial;
pub use password::{Argon2Hasher, PasswordHasher};
pub use roles::Role;
pub use token::{TokenCodec, BEARER_PREFIX};
