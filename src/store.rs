// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user repository.
//!
//! Usernames and emails are unique; uniqueness is enforced on `save`.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::User;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: HashMap<Uuid, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.email == email)
            .cloned()
    }

    pub fn save(&mut self, user: User) -> Result<User, StoreError> {
        if let Some(existing) = self.find_by_username(&user.username) {
            if existing.id != user.id {
                return Err(StoreError::DuplicateUsername(user.username));
            }
        }
        if let Some(existing) = self.find_by_email(&user.email) {
            if existing.id != user.id {
                return Err(StoreError::DuplicateEmail(user.email));
            }
        }

        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.users.len()
    }
}
