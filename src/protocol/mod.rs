//! Inbound frame grammar
//!
//! One WebSocket text message is one logical frame. Parsing only splits a
//! frame into its fields; numeric validation of seat tokens is the booking
//! coordinator's job.

pub mod request;

pub use request::{BookingRequest, InboundFrame};
