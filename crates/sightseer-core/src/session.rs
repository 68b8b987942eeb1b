//! Per-conversation search state
//!
//! Handlers never touch a shared map directly: they go through a
//! [`SessionStore`], which hands out one lock per conversation so a
//! read-modify-write on a conversation cannot interleave with another event
//! for the same conversation. Different conversations never block each other.

use crate::config::DEFAULT_SESSION_CAPACITY;
use crate::pagination::PaginationState;
use async_trait::async_trait;
use moka::future::Cache;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Stable identifier of a chat, used as the session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(pub i64);

impl From<i64> for ConversationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exclusive access to one conversation's state. `None` means no search yet.
pub type SessionGuard = OwnedMutexGuard<Option<PaginationState>>;

/// Storage for pagination state keyed by conversation
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lock the state of `id` until the guard is dropped.
    async fn lock(&self, id: ConversationId) -> SessionGuard;

    /// Snapshot of the stored state.
    async fn get(&self, id: ConversationId) -> Option<PaginationState> {
        self.lock(id).await.clone()
    }

    /// Replace the stored state.
    async fn put(&self, id: ConversationId, state: PaginationState) {
        *self.lock(id).await = Some(state);
    }

    /// Remove and return the stored state.
    async fn delete(&self, id: ConversationId) -> Option<PaginationState> {
        self.lock(id).await.take()
    }
}

/// Process-local session store; contents are lost on restart.
#[derive(Clone)]
pub struct InMemorySessionStore {
    /// Moka cache storing conversation -> state slot
    slots: Cache<ConversationId, Arc<Mutex<Option<PaginationState>>>>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY)
    }
}

impl InMemorySessionStore {
    /// Creates a store holding at most `max_capacity` conversations.
    ///
    /// Least recently used conversations are evicted beyond that bound.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            slots: Cache::builder().max_capacity(max_capacity).build(),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn lock(&self, id: ConversationId) -> SessionGuard {
        let slot = self
            .slots
            .get_with(id, async { Arc::new(Mutex::new(None)) })
            .await;
        slot.lock_owned().await
    }
}
