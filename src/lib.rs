// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth Demo Server - JWT, cookie and session authentication over HTTP
//!
//! Issues HS256-signed tokens carrying a subject and a role, hands them to
//! browsers in the `Authorization` cookie, and verifies them on the way back.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, key material, cookies and password hashing
//! - `session` - In-memory server-side sessions
//! - `users` - Registration and login over the in-memory user store

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod session;
pub mod state;
pub mod store;
pub mod users;
