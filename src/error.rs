//! Crate-level error types
//!
//! Transport failures are always scoped to the connection they occurred on;
//! the serving process itself never terminates because a session failed.

use std::fmt;
use std::io;

use tokio_tungstenite::tungstenite;

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug)]
pub enum Error {
    /// I/O failure on the listener or a connection
    Io(io::Error),
    /// WebSocket protocol failure on a connection
    WebSocket(tungstenite::Error),
    /// The WebSocket handshake did not complete within the configured timeout
    HandshakeTimeout,
    /// The session's outbound queue is gone (session is tearing down)
    SessionClosed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::WebSocket(e) => write!(f, "WebSocket error: {}", e),
            Error::HandshakeTimeout => write!(f, "WebSocket handshake timed out"),
            Error::SessionClosed => write!(f, "Session outbound queue closed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::WebSocket(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Self {
        Error::WebSocket(e)
    }
}
