//! Session state machine
//!
//! Tracks one connection from TCP accept to teardown.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// TCP connected, WebSocket handshake not complete
    Connecting,
    /// Handshake complete, initial snapshot not yet queued
    Accepted,
    /// Serving frames (concurrent read and write paths)
    Active,
    /// Teardown in progress
    Closing,
    /// Session closed
    Closed,
}

/// Per-session state
#[derive(Debug)]
pub struct SessionState {
    /// Unique session ID
    pub id: u64,

    /// Remote peer address
    pub peer_addr: SocketAddr,

    /// Current phase
    pub phase: SessionPhase,

    /// Connection start time
    pub connected_at: Instant,

    /// Time of the last inbound activity (frame, ping or pong)
    pub last_activity: Instant,

    /// Text frames received
    pub frames_received: u64,
}

impl SessionState {
    /// Create state for a freshly accepted TCP connection
    pub fn new(id: u64, peer_addr: SocketAddr) -> Self {
        let now = Instant::now();
        Self {
            id,
            peer_addr,
            phase: SessionPhase::Connecting,
            connected_at: now,
            last_activity: now,
            frames_received: 0,
        }
    }

    /// WebSocket handshake completed
    pub fn accept(&mut self) {
        if self.phase == SessionPhase::Connecting {
            self.phase = SessionPhase::Accepted;
        }
    }

    /// Initial snapshot queued; session is serving
    pub fn activate(&mut self) {
        if self.phase == SessionPhase::Accepted {
            self.phase = SessionPhase::Active;
        }
    }

    /// Begin teardown; idempotent from any phase
    pub fn close(&mut self) {
        if self.phase != SessionPhase::Closed {
            self.phase = SessionPhase::Closing;
        }
    }

    /// Teardown finished
    pub fn finish(&mut self) {
        self.phase = SessionPhase::Closed;
    }

    /// Record inbound activity
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Record one inbound text frame
    pub fn on_frame(&mut self) {
        self.frames_received += 1;
        self.touch();
    }

    /// Time since the last inbound activity
    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Session duration
    pub fn duration(&self) -> Duration {
        self.connected_at.elapsed()
    }

    /// Check if the session is serving
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn state() -> SessionState {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080);
        SessionState::new(1, addr)
    }

    #[test]
    fn test_session_lifecycle() {
        let mut state = state();

        assert_eq!(state.phase, SessionPhase::Connecting);

        state.accept();
        assert_eq!(state.phase, SessionPhase::Accepted);

        state.activate();
        assert_eq!(state.phase, SessionPhase::Active);
        assert!(state.is_active());

        state.close();
        assert_eq!(state.phase, SessionPhase::Closing);

        state.finish();
        assert_eq!(state.phase, SessionPhase::Closed);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut state = state();
        state.accept();
        state.activate();

        state.close();
        state.close();
        assert_eq!(state.phase, SessionPhase::Closing);

        state.finish();
        state.close();
        // A finished session stays closed
        assert_eq!(state.phase, SessionPhase::Closed);
    }

    #[test]
    fn test_activate_requires_accept() {
        let mut state = state();

        state.activate();
        assert_eq!(state.phase, SessionPhase::Connecting);
    }

    #[test]
    fn test_frame_counter() {
        let mut state = state();

        state.on_frame();
        state.on_frame();
        assert_eq!(state.frames_received, 2);
    }
}
