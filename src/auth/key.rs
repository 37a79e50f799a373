// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 signing key derived from the configured secret.

use base64ct::{Base64, Encoding};
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::config::ConfigError;

/// HMAC-SHA-256 requires keys of at least 256 bits.
pub const MIN_SECRET_LEN: usize = 32;

/// Signing and verification keys for HS256.
///
/// Built once at startup and shared read-only afterwards. The raw secret is
/// not retained and the key never appears in `Debug` output.
#[derive(Clone)]
pub struct KeyMaterial {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyMaterial {
    /// Decode a base64 secret and wrap it as an HS256 key.
    pub fn from_base64(secret_base64: &str) -> Result<Self, ConfigError> {
        let bytes = Base64::decode_vec(secret_base64.trim())
            .map_err(|_| ConfigError::InvalidSecretEncoding)?;
        Self::from_bytes(&bytes)
    }

    /// Wrap raw secret bytes as an HS256 key.
    pub fn from_bytes(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                len: secret.len(),
                min: MIN_SECRET_LEN,
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial(HS256, <redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "c2VjcmV0LXNlY3JldC1zZWNyZXQtc2VjcmV0LXNlY3JldC0=";

    #[test]
    fn accepts_long_enough_secret() {
        assert!(KeyMaterial::from_base64(SECRET).is_ok());
    }

    #[test]
    fn rejects_short_secret() {
        let result = KeyMaterial::from_base64("YQ==");
        assert!(matches!(
            result,
            Err(ConfigError::SecretTooShort { len: 1, min: MIN_SECRET_LEN })
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = KeyMaterial::from_base64("not base64 at all!");
        assert!(matches!(result, Err(ConfigError::InvalidSecretEncoding)));
    }

    #[test]
    fn rejects_raw_bytes_below_minimum() {
        assert!(KeyMaterial::from_bytes(&[7u8; MIN_SECRET_LEN - 1]).is_err());
        assert!(KeyMaterial::from_bytes(&[7u8; MIN_SECRET_LEN]).is_ok());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = KeyMaterial::from_base64(SECRET).unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("redacted"));
    }
}
