// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User registration and credential checks.

use std::sync::Arc;

use chrono::Utc;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::PasswordError;
use crate::auth::{PasswordHasher, Role};
use crate::models::{SignupRequest, User};
use crate::store::{InMemoryUserStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("{0} must not be blank")]
    MissingField(&'static str),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Admin token is incorrect; registration refused")]
    InvalidAdminToken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Password hash error: {0}")]
    Password(#[from] PasswordError),

    #[error("Join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<StoreError> for SignupError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(_) => SignupError::DuplicateUsername,
            StoreError::DuplicateEmail(_) => SignupError::DuplicateEmail,
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<RwLock<InMemoryUserStore>>,
    hasher: Arc<dyn PasswordHasher>,
    admin_token: Option<String>,
}

impl UserService {
    pub fn new(
        store: Arc<RwLock<InMemoryUserStore>>,
        hasher: Arc<dyn PasswordHasher>,
        admin_token: Option<String>,
    ) -> Self {
        Self {
            store,
            hasher,
            admin_token,
        }
    }

    /// Register a new user.
    ///
    /// Usernames and emails must be unique. Requesting `admin` requires the
    /// configured admin token; with no token configured nobody can become admin.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, SignupError> {
        let SignupRequest {
            username,
            password,
            email,
            admin,
            admin_token,
        } = request;

        for (field, value) in [("username", &username), ("password", &password), ("email", &email)] {
            if value.trim().is_empty() {
                return Err(SignupError::MissingField(field));
            }
        }

        {
            let store = self.store.read().await;
            if store.find_by_username(&username).is_some() {
                return Err(SignupError::DuplicateUsername);
            }
            if store.find_by_email(&email).is_some() {
                return Err(SignupError::DuplicateEmail);
            }
        }

        let role = if admin {
            if !self.admin_token_matches(&admin_token) {
                warn!(username = %username, "Admin signup with wrong admin token");
                return Err(SignupError::InvalidAdminToken);
            }
            Role::Admin
        } else {
            Role::User
        };

        let hasher = self.hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

        let user = User {
            id: Uuid::new_v4(),
            username,
            password_hash,
            email,
            role,
            created_at: Utc::now(),
        };

        // The store re-checks uniqueness under the write lock.
        let user = self.store.write().await.save(user)?;
        info!(username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    /// Check a username and password.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, SignupError> {
        let user = self
            .store
            .read()
            .await
            .find_by_username(username)
            .ok_or(SignupError::InvalidCredentials)?;

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || hasher.matches(&password, &hash)).await?;

        if !matches {
            warn!(username = %username, "Login with wrong password");
            return Err(SignupError::InvalidCredentials);
        }
        Ok(user)
    }

    fn admin_token_matches(&self, presented: &str) -> bool {
        match &self.admin_token {
            Some(expected) => expected.as_bytes().ct_eq(presented.as_bytes()).into(),
            None => false,
        }
    }
}
