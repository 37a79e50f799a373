// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies used by the REST API. All types derive
//! `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Users**: the stored user entity and its public view
//! - **Registration**: signup and login bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Role;

// =============================================================================
// User Models
// =============================================================================

/// A registered user. The password is only ever held as a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

// =============================================================================
// Registration Models
// =============================================================================

/// Request to register a new user.
///
/// Setting `admin` requires `admin_token` to match the server's admin secret.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    /// Request the `ADMIN` role
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub admin_token: String,
}

/// Request to log in with a username and password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Identity carried by a verified token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct IdentityResponse {
    pub username: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_request_defaults_to_non_admin() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"username":"Robbie","password":"pw","email":"robbie@example.com"}"#,
        )
        .unwrap();
        assert!(!request.admin);
        assert_eq!(request.admin_token, "");
    }

    #[test]
    fn user_response_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "Robbie".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            email: "robbie@example.com".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert_eq!(
            json,
            r#"{"username":"Robbie","email":"robbie@example.com","role":"ADMIN"}"#
        );
    }
}
