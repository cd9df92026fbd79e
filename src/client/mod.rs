//! WebSocket booking client
//!
//! Client-side counterpart of the server: connect, request snapshots,
//! book seats, observe broadcast updates. Used by the demos and the
//! end-to-end tests.

pub mod booking;

pub use booking::{BookingClient, ClientEvent};
