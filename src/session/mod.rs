//! Server-side session storage.
//!
//! Sessions are keyed by an opaque id carried in an HTTP-only cookie. The
//! store is pluggable behind [`SessionStore`]; the in-memory implementation
//! backs a single-process deployment and the test suite, an external store
//! can be swapped in without touching the handlers.

use async_trait::async_trait;
use dashmap::DashMap;

/// What a login establishes and the access guards consult.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub user_id: i64,
    pub user_type: String,
    pub logged_in: bool,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session_id: &str, data: SessionData);
    async fn get(&self, session_id: &str) -> Option<SessionData>;
    async fn remove(&self, session_id: &str);
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, SessionData>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session_id: &str, data: SessionData) {
        self.sessions.insert(session_id.to_string(), data);
    }

    async fn get(&self, session_id: &str) -> Option<SessionData> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }

    async fn remove(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_get_remove_roundtrip() {
        let store = MemorySessionStore::new();

        store
            .insert(
                "abc",
                SessionData {
                    user_id: 7,
                    user_type: "car_owner".to_string(),
                    logged_in: true,
                },
            )
            .await;

        let data = store.get("abc").await.unwrap();
        assert_eq!(data.user_id, 7);
        assert_eq!(data.user_type, "car_owner");
        assert!(data.logged_in);

        store.remove("abc").await;
        assert!(store.get("abc").await.is_none());
    }

    #[tokio::test]
    async fn unknown_session_is_none() {
        let store = MemorySessionStore::new();
        assert!(store.get("missing").await.is_none());
    }
}
