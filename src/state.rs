// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{Argon2Hasher, KeyMaterial, PasswordHasher, TokenCodec};
use crate::session::SessionStore;
use crate::store::InMemoryUserStore;
use crate::users::UserService;

/// Shared handles for request handlers.
///
/// Everything is constructed explicitly at startup; nothing is looked up
/// from globals.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenCodec>,
    pub sessions: SessionStore,
    pub users: UserService,
}

impl AppState {
    pub fn new(tokens: TokenCodec, admin_token: Option<String>) -> Self {
        Self::with_hasher(tokens, Arc::new(Argon2Hasher::new()), admin_token)
    }

    pub fn with_hasher(
        tokens: TokenCodec,
        hasher: Arc<dyn PasswordHasher>,
        admin_token: Option<String>,
    ) -> Self {
        let store = Arc::new(RwLock::new(InMemoryUserStore::new()));
        Self {
            tokens: Arc::new(tokens),
            sessions: SessionStore::new(),
            users: UserService::new(store, hasher, admin_token),
        }
    }

    /// Build state from a base64 secret with wall-clock time.
    pub fn from_secret(
        secret_base64: &str,
        admin_token: Option<String>,
    ) -> Result<Self, crate::config::ConfigError> {
        let key = KeyMaterial::from_base64(secret_base64)?;
        Ok(Self::new(TokenCodec::new(key), admin_token))
    }
}
