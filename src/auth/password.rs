// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing.

use ring::rand::{SecureRandom, SystemRandom};

/// Salt length in bytes.
const SALT_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("failed to generate salt")]
    Salt,

    #[error("password hash error: {0}")]
    Hash(#[from] argon2::Error),
}

/// An adaptive, salted password hash.
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh salt. The result is self-describing.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Check `plaintext` against a value produced by [`PasswordHasher::hash`].
    ///
    /// An unparsable `hashed` value is a mismatch, not an error.
    fn matches(&self, plaintext: &str, hashed: &str) -> bool;
}

/// Argon2id with PHC-encoded output.
pub struct Argon2Hasher {
    config: argon2::Config<'static>,
    rng: SystemRandom,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::with_config(hash_config())
    }

    pub fn with_config(config: argon2::Config<'static>) -> Self {
        Self {
            config,
            rng: SystemRandom::new(),
        }
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt).map_err(|_| PasswordError::Salt)?;
        Ok(argon2::hash_encoded(plaintext.as_bytes(), &salt, &self.config)?)
    }

    fn matches(&self, plaintext: &str, hashed: &str) -> bool {
        argon2::verify_encoded(hashed, plaintext.as_bytes()).unwrap_or(false)
    }
}

pub fn hash_config() -> argon2::Config<'static> {
    let mut config = argon2::Config::default();

    config.variant = argon2::Variant::Argon2id;
    config.lanes = 1;
    config.time_cost = 3;
    config.mem_cost = 19 * 1024;
    config.hash_length = 32;

    config
}

/// Cheap parameters so test suites stay fast.
#[cfg(test)]
pub(crate) fn test_hasher() -> Argon2Hasher {
    let mut config = hash_config();
    config.time_cost = 1;
    config.mem_cost = 256;
    Argon2Hasher::with_config(config)
}
