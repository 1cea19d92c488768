//! Session Registry
//!
//! Name-keyed map of live sessions. The write lock is taken only for map
//! mutation, never across process I/O.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::session::Session;
use crate::error::{Error, Result};

/// Registry of terminal sessions keyed by name
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `session` under its name unless the name is taken
    pub async fn reserve(&self, session: Arc<Session>) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.name()) {
            return Err(Error::AlreadyExists {
                name: session.name().to_string(),
            });
        }
        sessions.insert(session.name().to_string(), session);
        Ok(())
    }

    pub async fn get(&self, name: &str) -> Option<Arc<Session>> {
        self.sessions.read().await.get(name).cloned()
    }

    /// Like [`get`](Self::get), but missing names are an error
    pub async fn require(&self, name: &str) -> Result<Arc<Session>> {
        self.get(name).await.ok_or_else(|| Error::not_found(name))
    }

    /// All sessions, in no particular order
    pub async fn sessions(&self) -> Vec<Arc<Session>> {
        self.sessions.read().await.values().cloned().collect()
    }

    pub async fn remove(&self, name: &str) -> Option<Arc<Session>> {
        self.sessions.write().await.remove(name)
    }

    /// Remove `session` only if the name still maps to this same instance
    pub async fn evict(&self, session: &Session) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get(session.name()) {
            Some(current) if current.id() == session.id() => {
                sessions.remove(session.name());
                true
            }
            _ => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
