use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distr::Alphanumeric};
use tokio::sync::Mutex;
use tracing::debug;

use crate::qobuz::QobuzApi;

/// Inactivity after which a session is dropped.
pub const SESSION_TTL_HOURS: i64 = 2;

/// Server-side record binding a logged-in user to an authenticated client.
#[derive(Clone)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub client: Arc<dyn QobuzApi>,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, client: Arc<dyn QobuzApi>) -> Self {
        let now = Utc::now();
        Self {
            session_id: generate_session_id(),
            user_id: user_id.into(),
            client,
            created_at: now,
            last_accessed_at: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_accessed_at > ttl
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("last_accessed_at", &self.last_accessed_at)
            .finish_non_exhaustive()
    }
}

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Storage for live sessions.
///
/// Every operation is atomic with respect to the others; `get` both reads
/// and refreshes `last_accessed_at`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session and marks it as used, or `None` if unknown or expired.
    async fn get(&self, session_id: &str) -> Option<Session>;

    async fn put(&self, session: Session);

    async fn remove(&self, session_id: &str);

    /// Drops every expired session and returns how many were removed.
    async fn sweep(&self) -> usize;
}

pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(SESSION_TTL_HOURS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    fn sweep_locked(&self, sessions: &mut HashMap<String, Session>) -> usize {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now, self.ttl));
        before - sessions.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();

        let expired = match sessions.get_mut(session_id) {
            Some(session) if !session.is_expired_at(now, self.ttl) => {
                session.last_accessed_at = now;
                return Some(session.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!(session_id, "dropping expired session");
            sessions.remove(session_id);
        }
        None
    }

    async fn put(&self, session: Session) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.session_id.clone(), session);
        let swept = self.sweep_locked(&mut sessions);
        if swept > 0 {
            debug!(swept, "swept expired sessions");
        }
    }

    async fn remove(&self, session_id: &str) {
        self.sessions.lock().await.remove(session_id);
    }

    async fn sweep(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        self.sweep_locked(&mut sessions)
    }
}
