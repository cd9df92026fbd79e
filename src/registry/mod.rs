//! Live-session registry and broadcast fan-out
//!
//! The registry tracks every live connection and routes update snapshots
//! to all of them after a successful reservation.
//!
//! # Architecture
//!
//! ```text
//!                     Arc<SessionRegistry>
//!                ┌──────────────────────────┐
//!                │ sessions: HashMap<u64,   │
//!                │   SessionHandle {        │
//!                │     outbound: mpsc::Tx,  │
//!                │   }                      │
//!                │ >                        │
//!                └────────────┬─────────────┘
//!                             │ broadcast(snapshot)
//!          ┌──────────────────┼──────────────────┐
//!          ▼                  ▼                  ▼
//!     [Session 1]        [Session 2]        [Session 3]
//!     writer task        writer task        writer task
//!          │                  │                  │
//!          └──► one in-flight write per connection ──► WebSocket
//! ```
//!
//! Each handle is only an enqueue capability; the session keeps sole
//! ownership of its connection and its teardown. Removal is idempotent, so
//! racing read-path and write-path failures are harmless.

pub mod handle;
pub mod store;

pub use handle::SessionHandle;
pub use store::SessionRegistry;
