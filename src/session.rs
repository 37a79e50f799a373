// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Server-side sessions.
//!
//! The client holds only a random session id (cookie `SESSIONID`); the
//! attributes stay in memory on the server. Sessions idle for longer than the
//! TTL are dropped the next time the store is touched.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "SESSIONID";

/// Idle timeout (30 minutes).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

struct Session {
    attributes: HashMap<String, String>,
    last_accessed: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            attributes: HashMap::new(),
            last_accessed: Instant::now(),
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Return the live session named by `id`, or create a new one.
    ///
    /// The boolean is `true` when a new session was created.
    pub async fn get_or_create(&self, id: Option<&str>) -> (Uuid, bool) {
        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions);

        if let Some(id) = id.and_then(|raw| Uuid::parse_str(raw).ok()) {
            if let Some(session) = sessions.get_mut(&id) {
                session.last_accessed = Instant::now();
                return (id, false);
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(id, Session::new());
        tracing::debug!(session_id = %id, "Session created");
        (id, true)
    }

    /// Set an attribute on a live session. Returns `false` if there is none.
    pub async fn set_attribute(&self, id: Uuid, name: &str, value: impl Into<String>) -> bool {
        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions);

        match sessions.get_mut(&id) {
            Some(session) => {
                session.last_accessed = Instant::now();
                session.attributes.insert(name.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    /// Read an attribute from a live session.
    ///
    /// `None` if the session does not exist or has expired; `Some(None)` if
    /// it exists but has no such attribute.
    pub async fn get_attribute(&self, id: &str, name: &str) -> Option<Option<String>> {
        let id = Uuid::parse_str(id).ok()?;
        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions);

        let session = sessions.get_mut(&id)?;
        session.last_accessed = Instant::now();
        Some(session.attributes.get(name).cloned())
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn purge_expired(&self, sessions: &mut HashMap<Uuid, Session>) {
        let ttl = self.ttl;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_accessed.elapsed() < ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "Expired sessions removed");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
