//! Per-connection session handling
//!
//! One [`Connection`] per client: a read loop that processes one inbound
//! frame at a time, and a writer task that keeps a single write in flight
//! while preserving FIFO order. Teardown is strictly local to the session.

pub mod connection;
pub mod state;

pub use connection::Connection;
pub use state::{SessionPhase, SessionState};
