// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET_KEY` | Base64 HMAC secret (`jwt.secret.key`), at least 32 bytes decoded | Required |
//! | `ADMIN_TOKEN` | Shared secret granting `ADMIN` at signup (`admin.token`) | Unset (admin signup refused) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::net::SocketAddr;

use crate::logging::LogFormat;

/// Environment variable holding the base64-encoded JWT signing secret.
pub const JWT_SECRET_KEY_ENV: &str = "JWT_SECRET_KEY";

/// Environment variable holding the admin registration secret.
pub const ADMIN_TOKEN_ENV: &str = "ADMIN_TOKEN";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET_KEY is not set")]
    MissingSecret,

    #[error("JWT_SECRET_KEY is not valid base64")]
    InvalidSecretEncoding,

    #[error("JWT_SECRET_KEY decodes to {len} bytes, HS256 requires at least {min}")]
    SecretTooShort { len: usize, min: usize },

    #[error("PORT is not a valid port: {0}")]
    InvalidPort(String),

    #[error("invalid bind address: {0}")]
    InvalidBindAddress(String),
}

/// Application configuration resolved from the environment.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base64 secret, decoded into key material by `auth::KeyMaterial`.
    pub jwt_secret_key: String,
    pub admin_token: Option<String>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret_key = lookup(JWT_SECRET_KEY_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            jwt_secret_key,
            admin_token: lookup(ADMIN_TOKEN_ENV).filter(|token| !token.is_empty()),
            log_format: lookup(LOG_FORMAT_ENV)
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or_default(),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidBindAddress(addr))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret_key", &"<redacted>")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .field("log_format", &self.log_format)
            .finish()
    }
}
