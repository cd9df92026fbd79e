//! Session registry implementation
//!
//! The authoritative set of live sessions, and the fan-out path that
//! enqueues one identical snapshot frame into every session's outbound
//! queue after a successful reservation.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::handle::SessionHandle;

/// Registry of all live sessions
///
/// Thread-safe via `RwLock`. Mutated only by the accept and teardown
/// paths; read by the broadcaster. Independent of the inventory locks, and
/// never held across an enqueue.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<u64, SessionHandle>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session; called exactly once per accepted connection
    pub async fn insert(&self, handle: SessionHandle) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(handle.id(), handle);

        tracing::info!(clients = sessions.len(), "Client connected");
    }

    /// Remove a session; idempotent
    ///
    /// Read-path and write-path failures on the same session may race to
    /// remove it; removing an absent entry is a no-op. Returns whether the
    /// entry was present.
    pub async fn remove(&self, session_id: u64) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(&session_id).is_some();

        if removed {
            tracing::info!(clients = sessions.len(), "Client disconnected");
        }
        removed
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Enqueue one identical frame into every live session's outbound queue
    ///
    /// Takes a point-in-time view of the registry; sessions added or
    /// removed while the frames are enqueued may or may not receive this
    /// broadcast. Per-session enqueue failures are left to that session's
    /// own teardown. Returns the number of sessions the frame reached.
    pub async fn broadcast(&self, text: &str) -> usize {
        let targets: Vec<SessionHandle> = {
            let sessions = self.sessions.read().await;
            sessions.values().cloned().collect()
        };

        let mut delivered = 0;
        for handle in &targets {
            if handle.enqueue_text(text) {
                delivered += 1;
            }
        }

        tracing::info!(
            targets = targets.len(),
            delivered = delivered,
            "Broadcasting update"
        );
        delivered
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
