//! Real-time cinema seat booking server over WebSocket
//!
//! Clients hold one persistent connection each, issue booking requests,
//! and receive both a direct reply and a broadcast snapshot whenever any
//! client's reservation mutates the shared seat inventory.
//!
//! # Architecture
//!
//! ```text
//!   [Client] ──frame──► Session ──► BookingCoordinator ──► Catalog
//!                          │               │            (per-show RwLock,
//!                          │       direct reply queued    all-or-nothing
//!                          │               │               reservations)
//!                          ◄───────────────┘
//!                          │ on successful reservation
//!                          ▼
//!                   SessionRegistry::broadcast ──► every live session,
//!                                                  including the requester
//! ```
//!
//! Per-session frame order is preserved by a single-consumer writer task;
//! no ordering is guaranteed across different connections. A transport
//! failure tears down only the affected session and never the server.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use cinema_rs::catalog::{Catalog, TextFormatter};
//! use cinema_rs::server::{CinemaServer, ServerConfig};
//!
//! # async fn example() -> cinema_rs::Result<()> {
//! let catalog = Arc::new(
//!     Catalog::builder()
//!         .show("Inception", "2025-09-11 19:30", "PVR")
//!         .build(),
//! );
//!
//! let server = CinemaServer::new(ServerConfig::default(), catalog, TextFormatter);
//! server.run().await
//! # }
//! ```

pub mod booking;
pub mod catalog;
pub mod client;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod session;

pub use error::{Error, Result};
