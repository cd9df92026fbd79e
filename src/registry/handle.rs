//! Session enqueue handles
//!
//! A handle is the narrow capability the registry holds for one live
//! session: an id and the sending half of the session's outbound queue.
//! The session itself retains sole ownership of its lifecycle; a handle
//! can only enqueue, never read or close.

use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// Enqueue capability for one live session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: u64,
    outbound: mpsc::UnboundedSender<Message>,
}

impl SessionHandle {
    /// Create a handle over a session's outbound queue
    pub fn new(id: u64, outbound: mpsc::UnboundedSender<Message>) -> Self {
        Self { id, outbound }
    }

    /// The session's unique id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Enqueue an outbound message, preserving FIFO order
    ///
    /// Returns `false` when the session is tearing down and its queue is
    /// gone; the caller must not treat that as an error, the session's own
    /// teardown handles removal.
    pub fn enqueue(&self, message: Message) -> bool {
        self.outbound.send(message).is_ok()
    }

    /// Enqueue one outbound text frame
    pub fn enqueue_text(&self, text: impl Into<String>) -> bool {
        self.enqueue(Message::text(text))
    }
}
